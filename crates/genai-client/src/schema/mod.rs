//! Response-shape descriptors and validating decoder
//!
//! A [`SchemaType`] describes the JSON a generation request must produce. The
//! same descriptor is sent to the service as the `responseSchema` constraint
//! and used locally to check the answer before it is decoded, so a response
//! that is syntactically valid JSON but misses a required field, carries the
//! wrong JSON type, or uses a value outside an enum is rejected instead of
//! being silently accepted.
//!
//! The descriptor language is a subset of the OpenAPI schema object used by
//! Gemini (`type` is spelled in upper case), and is independent of any SDK.
//!
//! # Example
//!
//! ```rust
//! use genai_client::schema::{parse_validated, ObjectSchema, SchemaType};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Color {
//!     name: String,
//! }
//!
//! let schema = SchemaType::object(ObjectSchema::new().field("name", SchemaType::string()));
//!
//! let color: Color = parse_validated(r#"{"name":"teal"}"#, &schema).unwrap();
//! assert_eq!(color.name, "teal");
//!
//! assert!(parse_validated::<Color>(r#"{"hue":"teal"}"#, &schema).is_err());
//! ```

pub mod parsing;
pub mod types;
pub mod validation;

pub use parsing::{parse_validated, parse_value, DecodeError};
pub use types::*;
pub use validation::{validate_value, ValidationError};
