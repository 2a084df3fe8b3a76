//! Marketing Compass
//!
//! A marketing assistant backed by a hosted generative model: keyword
//! discovery, budget projection, content strategy and IMC planning.
//!
//! This crate wires the workspace together. Start with
//! [`config::AppConfig::from_env`] and [`config::AppConfig::build_shell`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod logging;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use logging::init_logging;

pub use app_state;
pub use genai_client;
pub use marketing_core;
pub use storage;
