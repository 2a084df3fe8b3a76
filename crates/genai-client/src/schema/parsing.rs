//! Validating decoder for structured model output

use super::types::SchemaType;
use super::validation::{validate_value, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while decoding structured output
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The text is not valid JSON
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    /// The JSON does not satisfy the schema descriptor
    #[error("Shape violation: {0}")]
    Shape(#[from] ValidationError),

    /// The JSON satisfies the schema but does not fit the target type
    #[error("Type mismatch: {0}")]
    Type(#[source] serde_json::Error),
}

/// Parse response text into a JSON value
///
/// Surrounding whitespace is ignored.
pub fn parse_value(text: &str) -> Result<Value, DecodeError> {
    serde_json::from_str(text.trim()).map_err(DecodeError::InvalidJson)
}

/// Parse response text, validate it against `schema`, then decode into `T`
pub fn parse_validated<T: DeserializeOwned>(
    text: &str,
    schema: &SchemaType,
) -> Result<T, DecodeError> {
    let value = parse_value(text)?;
    validate_value(&value, schema)?;
    serde_json::from_value(value).map_err(DecodeError::Type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ObjectSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        keyword: String,
        volume: String,
    }

    fn schema() -> SchemaType {
        SchemaType::array(SchemaType::object(
            ObjectSchema::new()
                .field("keyword", SchemaType::string())
                .field("volume", SchemaType::string_enum(&["High", "Low"])),
        ))
    }

    #[test]
    fn test_parse_validated_ok() {
        let text = "\n  [{\"keyword\":\"vay tiền\",\"volume\":\"High\"}]  \n";
        let entries: Vec<Entry> = parse_validated(text, &schema()).unwrap();
        assert_eq!(
            entries,
            vec![Entry {
                keyword: "vay tiền".to_string(),
                volume: "High".to_string(),
            }]
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_validated::<Vec<Entry>>("[{\"keyword\":", &schema()).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidJson(_)));
    }

    #[test]
    fn test_shape_violation() {
        let err = parse_validated::<Vec<Entry>>("[{\"keyword\":\"a\"}]", &schema()).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Shape(ValidationError::MissingRequiredField { .. })
        ));
        assert!(err.to_string().starts_with("Shape violation"));
    }

    #[test]
    fn test_type_mismatch_after_validation() {
        // Schema allows any string array; target expects numbers.
        let loose = SchemaType::array(SchemaType::string());
        let err = parse_validated::<Vec<u32>>("[\"x\"]", &loose).unwrap_err();
        assert!(matches!(err, DecodeError::Type(_)));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 1 ").unwrap(), serde_json::json!(1));
        assert!(parse_value("").is_err());
    }
}
