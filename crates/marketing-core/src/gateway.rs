//! Generation gateway
//!
//! The single boundary between the application and the generation service.
//! Every operation builds its prompt, sends exactly one request constrained by
//! its response-shape descriptor, validates the answer and decodes it. All
//! transport and decode failures collapse into one user-facing message per
//! operation; the underlying cause stays reachable through
//! [`std::error::Error::source`].

use async_trait::async_trait;
use genai_client::schema::{self, SchemaType};
use genai_client::GenAiClient;
use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

use crate::imc::{ImcBrief, ImcPlan};
use crate::keywords::{BroadKeywords, Keyword, KeywordDetails};
use crate::metrics::EstimatedMetrics;
use crate::prompts;
use crate::schemas;
use crate::strategy::ContentStrategy;

// =============================================================================
// Error Types
// =============================================================================

/// Gateway operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Keywords for the four fixed categories
    FetchBroadKeywords,
    /// Keywords for an ad-hoc search term
    DiscoverKeywords,
    /// Deep-dive analysis of one keyword
    FetchKeywordDetails,
    /// Content strategy for one keyword
    GenerateContentStrategy,
    /// Rate estimates for a budget scenario
    EstimateMetrics,
    /// IMC plan for a brief
    GenerateImcPlan,
}

impl Operation {
    /// Operation name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Operation::FetchBroadKeywords => "fetch_broad_keywords",
            Operation::DiscoverKeywords => "discover_keywords",
            Operation::FetchKeywordDetails => "fetch_keyword_details",
            Operation::GenerateContentStrategy => "generate_content_strategy",
            Operation::EstimateMetrics => "estimate_metrics",
            Operation::GenerateImcPlan => "generate_imc_plan",
        }
    }

    /// User-facing message when the operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::FetchBroadKeywords => "Failed to fetch keywords from Gemini API.",
            Operation::DiscoverKeywords => "Failed to discover keywords from Gemini API.",
            Operation::FetchKeywordDetails => "Failed to fetch keyword details from Gemini API.",
            Operation::GenerateContentStrategy => {
                "Failed to generate content strategy from Gemini API."
            }
            Operation::EstimateMetrics => "Failed to estimate metrics from Gemini API.",
            Operation::GenerateImcPlan => "Failed to generate IMC plan from Gemini API.",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Message shown when keyword discovery hits a server-side or transport failure
pub const SERVICE_UNAVAILABLE_MESSAGE: &str = "An internal error occurred with the AI service. \
     Please try a different search term or try again later.";

/// Gateway error types
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The input was rejected before any request was sent
    #[error("{0}")]
    InvalidInput(String),

    /// The request failed or its answer could not be decoded
    #[error("{}", .operation.failure_message())]
    Failed {
        /// Failing operation
        operation: Operation,
        /// Underlying cause
        #[source]
        source: genai_client::Error,
    },

    /// The service failed internally while discovering keywords
    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable {
        /// Failing operation
        operation: Operation,
        /// Underlying cause
        #[source]
        source: genai_client::Error,
    },
}

impl GatewayError {
    /// Wrap a generation failure for `operation`
    pub fn failed(operation: Operation, source: impl Into<genai_client::Error>) -> Self {
        GatewayError::Failed {
            operation,
            source: source.into(),
        }
    }

    /// Operation that failed, if a request was made
    pub fn operation(&self) -> Option<Operation> {
        match self {
            GatewayError::InvalidInput(_) => None,
            GatewayError::Failed { operation, .. }
            | GatewayError::ServiceUnavailable { operation, .. } => Some(*operation),
        }
    }

    /// Check if the input was rejected before dispatch
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, GatewayError::InvalidInput(_))
    }
}

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

// =============================================================================
// Gateway Trait
// =============================================================================

/// Structured generation operations used by the views
#[async_trait]
pub trait MarketingGateway: Send + Sync {
    /// Keywords for the four fixed categories
    async fn fetch_broad_keywords(&self) -> Result<BroadKeywords>;

    /// Up to fifteen keywords related to `term`
    ///
    /// A blank term is rejected without contacting the service.
    async fn discover_keywords(&self, term: &str) -> Result<Vec<Keyword>>;

    /// Deep-dive analysis of `keyword`
    async fn fetch_keyword_details(&self, keyword: &str) -> Result<KeywordDetails>;

    /// Content and SEO strategy for `keyword`
    async fn generate_content_strategy(&self, keyword: &str) -> Result<ContentStrategy>;

    /// Rate estimates for a campaign budget and scenario
    ///
    /// Fields missing from or malformed in the answer are coerced to 0.
    async fn estimate_metrics(&self, budget: f64, scenario: &str) -> Result<EstimatedMetrics>;

    /// IMC plan for a brief
    async fn generate_imc_plan(&self, brief: &ImcBrief) -> Result<ImcPlan>;
}

// =============================================================================
// Gemini Implementation
// =============================================================================

/// Gateway backed by the Gemini `generateContent` endpoint
#[derive(Debug, Clone)]
pub struct GeminiGateway {
    client: GenAiClient,
}

impl GeminiGateway {
    /// Create a gateway over an existing client
    pub fn new(client: GenAiClient) -> Self {
        Self { client }
    }

    /// Get the underlying client
    pub fn client(&self) -> &GenAiClient {
        &self.client
    }

    async fn structured<T>(&self, operation: Operation, prompt: String, schema: SchemaType) -> Result<T>
    where
        T: DeserializeOwned,
    {
        tracing::debug!(operation = %operation, "requesting structured generation");
        self.client
            .generate_structured(prompt, schema)
            .await
            .map_err(|source| failure(operation, source))
    }
}

fn failure(operation: Operation, source: genai_client::Error) -> GatewayError {
    tracing::error!(operation = %operation, error = %source, "generation request failed");

    if operation == Operation::DiscoverKeywords
        && (source.is_server_error() || source.is_network_error())
    {
        GatewayError::ServiceUnavailable { operation, source }
    } else {
        GatewayError::Failed { operation, source }
    }
}

#[async_trait]
impl MarketingGateway for GeminiGateway {
    async fn fetch_broad_keywords(&self) -> Result<BroadKeywords> {
        self.structured(
            Operation::FetchBroadKeywords,
            prompts::broad_keywords(),
            schemas::broad_keywords(),
        )
        .await
    }

    async fn discover_keywords(&self, term: &str) -> Result<Vec<Keyword>> {
        if term.trim().is_empty() {
            return Err(GatewayError::InvalidInput(
                "Search term must not be empty.".to_string(),
            ));
        }

        self.structured(
            Operation::DiscoverKeywords,
            prompts::discover_keywords(term),
            schemas::discovered_keywords(),
        )
        .await
    }

    async fn fetch_keyword_details(&self, keyword: &str) -> Result<KeywordDetails> {
        self.structured(
            Operation::FetchKeywordDetails,
            prompts::keyword_details(keyword),
            schemas::keyword_details(),
        )
        .await
    }

    async fn generate_content_strategy(&self, keyword: &str) -> Result<ContentStrategy> {
        self.structured(
            Operation::GenerateContentStrategy,
            prompts::content_strategy(keyword),
            schemas::content_strategy(),
        )
        .await
    }

    async fn estimate_metrics(&self, budget: f64, scenario: &str) -> Result<EstimatedMetrics> {
        if !(budget.is_finite() && budget > 0.0) {
            return Err(GatewayError::InvalidInput(
                "Budget must be greater than zero.".to_string(),
            ));
        }

        let operation = Operation::EstimateMetrics;
        tracing::debug!(operation = %operation, "requesting structured generation");

        // The answer must be JSON, but its fields are coerced rather than validated
        let text = self
            .client
            .generate_json(prompts::estimate_metrics(budget, scenario), schemas::estimated_metrics())
            .await
            .map_err(|e| failure(operation, e.into()))?;
        let value = schema::parse_value(&text).map_err(|e| failure(operation, e.into()))?;

        Ok(EstimatedMetrics::from_value(&value))
    }

    async fn generate_imc_plan(&self, brief: &ImcBrief) -> Result<ImcPlan> {
        self.structured(
            Operation::GenerateImcPlan,
            prompts::imc_plan(brief),
            schemas::imc_plan(),
        )
        .await
    }
}
