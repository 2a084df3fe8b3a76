//! Generative AI client library
//!
//! This crate provides a small client for the Gemini `generateContent`
//! endpoint together with a service-independent response-shape descriptor
//! language and a validating decoder for structured (JSON) output.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod schema;

pub use client::{GenAiClient, GenAiClientConfig, GenAiError};
pub use schema::{DecodeError, SchemaType, ValidationError};

/// Result type for structured generation
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for structured generation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The service could not be reached or answered with an error
    #[error("Transport error: {0}")]
    Transport(#[from] GenAiError),

    /// The service answered, but the text did not satisfy the requested shape
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
}

impl Error {
    /// HTTP status of a transport failure, if the service produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Transport(err) if err.status() != 0 => Some(err.status()),
            _ => None,
        }
    }

    /// Whether the failure originated on the service side (HTTP 5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Transport(err) if err.is_server_error())
    }

    /// Whether the request never produced an HTTP response
    pub fn is_network_error(&self) -> bool {
        matches!(self, Error::Transport(err) if err.is_network_error())
    }
}
