//! Gemini `generateContent` client
//!
//! This module implements the request/response types of the Gemini REST
//! API that structured generation needs, error handling, and the HTTP client.
//! Every call is exactly one outbound request: no caching, no coalescing and
//! no automatic retry.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::schema::{self, SchemaType};

// =============================================================================
// Error Types
// =============================================================================

/// Generation service error with HTTP status and message
///
/// This represents errors returned by the generation service as well as
/// network failures (status 0) and unreadable responses.
///
/// # Examples
/// ```
/// use genai_client::GenAiError;
///
/// let error = GenAiError::new(503, "UNAVAILABLE", "The model is overloaded");
/// assert_eq!(error.status(), 503);
/// assert!(error.is_server_error());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenAiError {
    /// HTTP status code (0 when no response was received)
    status: u16,
    /// Error code (e.g., "INVALID_ARGUMENT", "NetworkError")
    error: String,
    /// Human-readable error message
    message: String,
}

impl GenAiError {
    /// Create a new error
    pub fn new(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status,
            error: error.into(),
            message: message.into(),
        }
    }

    /// Get the HTTP status code
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Get the error code
    pub fn error(&self) -> &str {
        &self.error
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Check if the service itself failed (HTTP 5xx)
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Check if the request never produced an HTTP response
    pub fn is_network_error(&self) -> bool {
        self.status == 0 && self.error == "NetworkError"
    }
}

impl std::fmt::Display for GenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Generation error {}: {} - {}",
            self.status, self.error, self.message
        )
    }
}

impl std::error::Error for GenAiError {}

// =============================================================================
// Request Types
// =============================================================================

/// A single part of a content message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// Text payload
    #[serde(default)]
    pub text: Option<String>,
}

/// A content message (one conversational turn)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// Author role ("user" or "model")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Message parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    /// Create a user turn holding a single text part
    pub fn user_text(text: impl Into<String>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part { text: Some(text.into()) }],
        }
    }
}

/// Generation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Output MIME type (e.g., "application/json")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    /// Output shape constraint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<SchemaType>,
}

/// Body of a `generateContent` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// Conversation contents
    pub contents: Vec<Content>,
    /// Generation options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Create a plain text request
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            generation_config: None,
        }
    }

    /// Create a request whose output must be JSON matching `schema`
    pub fn structured(prompt: impl Into<String>, schema: SchemaType) -> Self {
        Self {
            contents: vec![Content::user_text(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        }
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// A generated candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Generated content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (e.g., "STOP", "MAX_TOKENS")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

/// Body returned by `generateContent`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    ///
    /// Returns `None` when there is no candidate or it carries no text.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();

        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Standard error response format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details inside [`ErrorResponse`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Numeric code (mirrors the HTTP status)
    #[serde(default)]
    pub code: u16,
    /// Error message
    #[serde(default)]
    pub message: String,
    /// Status name (e.g., "INVALID_ARGUMENT")
    #[serde(default)]
    pub status: String,
}

// =============================================================================
// Client Configuration
// =============================================================================

/// Default service URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Configuration for the generation client
#[derive(Debug, Clone)]
pub struct GenAiClientConfig {
    /// Base service URL
    pub base_url: String,
    /// API credential sent as `x-goog-api-key`
    pub api_key: String,
    /// Model name
    pub model: String,
    /// Request timeout (`None` waits indefinitely)
    pub timeout: Option<Duration>,
    /// User agent string
    pub user_agent: String,
    /// Custom headers to include in all requests
    pub default_headers: HashMap<String, String>,
}

impl Default for GenAiClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            timeout: None,
            user_agent: format!("Marketing-Compass/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HashMap::new(),
        }
    }
}

impl GenAiClientConfig {
    /// Create a new config with an API key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Set the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// URL of the `generateContent` endpoint for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

// =============================================================================
// Client Implementation
// =============================================================================

use reqwest::{Client as ReqwestClient, Response as ReqwestResponse};

/// Client for the Gemini `generateContent` endpoint
///
/// # Examples
/// ```no_run
/// use genai_client::{GenAiClient, GenAiClientConfig, SchemaType};
///
/// async fn example() -> Result<(), Box<dyn std::error::Error>> {
///     let client = GenAiClient::new(GenAiClientConfig::new("api-key"))?;
///     let text = client
///         .generate_json("List three colors", SchemaType::array(SchemaType::string()))
///         .await?;
///     println!("{}", text);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GenAiClient {
    /// HTTP client
    client: ReqwestClient,
    /// Configuration
    config: GenAiClientConfig,
}

impl GenAiClient {
    /// Create a new client
    pub fn new(config: GenAiClientConfig) -> Result<Self, GenAiError> {
        let mut builder = ReqwestClient::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| {
            GenAiError::new(0, "ClientBuild", format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self { client, config })
    }

    /// Submit a prompt with an output-shape constraint and return the raw JSON text
    ///
    /// The text is trimmed but not parsed.
    pub async fn generate_json(
        &self,
        prompt: impl Into<String>,
        schema: SchemaType,
    ) -> Result<String, GenAiError> {
        let request = GenerateContentRequest::structured(prompt, schema);
        let response = self.generate_content(&request).await?;

        response
            .text()
            .map(|text| text.trim().to_string())
            .ok_or_else(|| GenAiError::new(200, "EmptyResponse", "Response carried no text"))
    }

    /// Submit a prompt and decode the answer into `T`, validating it against `schema` first
    pub async fn generate_structured<T>(
        &self,
        prompt: impl Into<String>,
        schema: SchemaType,
    ) -> crate::Result<T>
    where
        T: DeserializeOwned,
    {
        let text = self.generate_json(prompt, schema.clone()).await?;
        Ok(schema::parse_validated(&text, &schema)?)
    }

    /// Execute a raw `generateContent` call
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let url = self.config.endpoint();
        tracing::debug!(model = %self.config.model, "dispatching generateContent request");

        let mut req = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(request);

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        let response = req.send().await.map_err(|e| {
            GenAiError::new(0, "NetworkError", format!("Request failed: {}", e))
        })?;

        self.parse_response(response).await
    }

    /// Parse a reqwest response into a `GenerateContentResponse`
    async fn parse_response(
        &self,
        response: ReqwestResponse,
    ) -> Result<GenerateContentResponse, GenAiError> {
        let status = response.status().as_u16();

        if !response.status().is_success() {
            let error_body = response.text().await.unwrap_or_default();

            return match serde_json::from_str::<ErrorResponse>(&error_body) {
                Ok(error_response) => Err(GenAiError::new(
                    status,
                    error_response.error.status,
                    error_response.error.message,
                )),
                Err(_) => Err(GenAiError::new(
                    status,
                    "Unknown",
                    format!("HTTP {}: {}", status, error_body),
                )),
            };
        }

        let body = response.text().await.map_err(|e| {
            GenAiError::new(status, "ParseError", format!("Failed to read response: {}", e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            GenAiError::new(status, "ParseError", format!("Failed to parse JSON: {}", e))
        })
    }

    /// Get the client configuration
    pub fn config(&self) -> &GenAiClientConfig {
        &self.config
    }

    /// Get the configured model
    pub fn model(&self) -> &str {
        &self.config.model
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_server() {
        let error = GenAiError::new(503, "UNAVAILABLE", "Service is down");
        assert_eq!(error.status(), 503);
        assert_eq!(error.error(), "UNAVAILABLE");
        assert_eq!(error.message(), "Service is down");
        assert!(error.is_server_error());
        assert!(!error.is_network_error());
    }

    #[test]
    fn test_error_client() {
        let error = GenAiError::new(400, "INVALID_ARGUMENT", "Bad input");
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_error_network() {
        let error = GenAiError::new(0, "NetworkError", "Request failed");
        assert!(error.is_network_error());
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_error_display() {
        let error = GenAiError::new(404, "NOT_FOUND", "Model not found");
        let display = format!("{}", error);
        assert!(display.contains("404"));
        assert!(display.contains("NOT_FOUND"));
        assert!(display.contains("Model not found"));
    }

    #[test]
    fn test_structured_request_serde() {
        let request = GenerateContentRequest::structured("hello", SchemaType::string());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(json["generationConfig"]["responseSchema"]["type"], "STRING");
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let json = serde_json::to_value(GenerateContentRequest::text("hi")).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_response_text_concatenates_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "[1," }, { "text": "2]" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn test_response_text_empty() {
        assert_eq!(GenerateContentResponse::default().text(), None);

        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_client_config_default() {
        let config = GenAiClientConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.timeout, None);
        assert!(config.user_agent.starts_with("Marketing-Compass/"));
    }

    #[test]
    fn test_client_config_builder() {
        let config = GenAiClientConfig::new("secret")
            .with_base_url("https://custom.server/")
            .with_model("gemini-test")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("CustomAgent/1.0")
            .with_header("X-Custom", "value");

        assert_eq!(config.api_key, "secret");
        assert_eq!(config.timeout, Some(Duration::from_secs(60)));
        assert_eq!(config.user_agent, "CustomAgent/1.0");
        assert_eq!(config.default_headers.get("X-Custom"), Some(&"value".to_string()));
        assert_eq!(
            config.endpoint(),
            "https://custom.server/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_client_new() {
        let client = GenAiClient::new(GenAiClientConfig::new("key").with_model("m")).unwrap();
        assert_eq!(client.model(), "m");
        assert_eq!(client.config().api_key, "key");
    }
}
