//! Marketing assistant core
//!
//! Domain model, prompt templates, response-shape descriptors, the
//! generation gateway and the pure metrics projection.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod gateway;
pub mod imc;
pub mod keywords;
pub mod metrics;
pub mod prompts;
pub mod schemas;
pub mod strategy;

pub use gateway::{GatewayError, GeminiGateway, MarketingGateway, Operation};
pub use imc::{BudgetMethod, ImcBrief, ImcPlan};
pub use keywords::{
    BroadKeywords, CategorizedKeywords, Keyword, KeywordCategory, KeywordDetails, Level,
};
pub use metrics::{EstimatedMetrics, MarketingMetrics, MetricsInputs};
pub use strategy::{ContentStrategy, SavedStrategy};

pub use genai_client;
