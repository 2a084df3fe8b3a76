//! Value validation against schema descriptors
//!
//! Validation fails closed: the first violation found is reported with a
//! JSON path (`$.field[2].name`) pointing at the offending value. Properties
//! the schema does not declare are ignored.

use super::types::*;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur during validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Value has the wrong JSON type
    #[error("{path}: expected {expected}, found {found}")]
    TypeMismatch {
        /// Location of the value
        path: String,
        /// Expected schema type
        expected: &'static str,
        /// Actual JSON type
        found: &'static str,
    },

    /// Missing required field
    #[error("{path}: missing required field '{field}'")]
    MissingRequiredField {
        /// Location of the enclosing object
        path: String,
        /// The field name
        field: String,
    },

    /// Value not in enum
    #[error("{path}: value '{value}' not in allowed enum values")]
    NotInEnum {
        /// Location of the value
        path: String,
        /// The value that was provided
        value: String,
    },

    /// Number below the minimum or above the maximum
    #[error("{path}: number {value} is outside the allowed range")]
    NumberOutOfRange {
        /// Location of the value
        path: String,
        /// The value that was provided
        value: f64,
    },

    /// Array has too many items
    #[error("{path}: array has too many items: {actual} > {max}")]
    ArrayTooLong {
        /// Location of the array
        path: String,
        /// Actual length
        actual: usize,
        /// Maximum allowed length
        max: usize,
    },

    /// Array has too few items
    #[error("{path}: array has too few items: {actual} < {min}")]
    ArrayTooShort {
        /// Location of the array
        path: String,
        /// Actual length
        actual: usize,
        /// Minimum required length
        min: usize,
    },
}

/// Result type for validation operations
pub type Result<T> = std::result::Result<T, ValidationError>;

/// Validate a JSON value against a schema descriptor
///
/// # Example
///
/// ```rust
/// use genai_client::schema::{validate_value, ObjectSchema, SchemaType};
/// use serde_json::json;
///
/// let schema = SchemaType::object(
///     ObjectSchema::new().field("volume", SchemaType::string_enum(&["High", "Low"])),
/// );
///
/// assert!(validate_value(&json!({"volume": "High"}), &schema).is_ok());
/// assert!(validate_value(&json!({"volume": "Huge"}), &schema).is_err());
/// assert!(validate_value(&json!({}), &schema).is_err());
/// ```
pub fn validate_value(value: &Value, schema: &SchemaType) -> Result<()> {
    validate_at(value, schema, "$")
}

fn validate_at(value: &Value, schema: &SchemaType, path: &str) -> Result<()> {
    match schema {
        SchemaType::String(def) => validate_string(value, def, path),
        SchemaType::Number(def) => validate_number(value, def, path, false),
        SchemaType::Integer(def) => validate_number(value, def, path, true),
        SchemaType::Boolean(_) => match value {
            Value::Bool(_) => Ok(()),
            other => Err(mismatch(path, schema, other)),
        },
        SchemaType::Array(def) => validate_array(value, def, path),
        SchemaType::Object(def) => validate_object(value, def, path),
    }
}

fn validate_string(value: &Value, def: &StringSchema, path: &str) -> Result<()> {
    let Value::String(s) = value else {
        return Err(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected: "STRING",
            found: json_type_name(value),
        });
    };

    if let Some(allowed) = &def.r#enum {
        if !allowed.iter().any(|a| a == s) {
            return Err(ValidationError::NotInEnum {
                path: path.to_string(),
                value: s.clone(),
            });
        }
    }

    Ok(())
}

fn validate_number(value: &Value, def: &NumberSchema, path: &str, integer: bool) -> Result<()> {
    let expected = if integer { "INTEGER" } else { "NUMBER" };
    let Some(n) = value.as_f64() else {
        return Err(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: json_type_name(value),
        });
    };

    if integer && n.fract() != 0.0 {
        return Err(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected,
            found: "fractional number",
        });
    }

    let below = def.minimum.is_some_and(|min| n < min);
    let above = def.maximum.is_some_and(|max| n > max);
    if below || above {
        return Err(ValidationError::NumberOutOfRange {
            path: path.to_string(),
            value: n,
        });
    }

    Ok(())
}

fn validate_array(value: &Value, def: &ArraySchema, path: &str) -> Result<()> {
    let Value::Array(items) = value else {
        return Err(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected: "ARRAY",
            found: json_type_name(value),
        });
    };

    if let Some(max) = def.max_items {
        if items.len() > max {
            return Err(ValidationError::ArrayTooLong {
                path: path.to_string(),
                actual: items.len(),
                max,
            });
        }
    }

    if let Some(min) = def.min_items {
        if items.len() < min {
            return Err(ValidationError::ArrayTooShort {
                path: path.to_string(),
                actual: items.len(),
                min,
            });
        }
    }

    for (i, item) in items.iter().enumerate() {
        validate_at(item, &def.items, &format!("{}[{}]", path, i))?;
    }

    Ok(())
}

fn validate_object(value: &Value, def: &ObjectSchema, path: &str) -> Result<()> {
    let Value::Object(map) = value else {
        return Err(ValidationError::TypeMismatch {
            path: path.to_string(),
            expected: "OBJECT",
            found: json_type_name(value),
        });
    };

    for field in &def.required {
        if !map.contains_key(field) {
            return Err(ValidationError::MissingRequiredField {
                path: path.to_string(),
                field: field.clone(),
            });
        }
    }

    // Declaration order gives stable, predictable error paths
    for name in &def.property_ordering {
        let (Some(field_schema), Some(field_value)) = (def.properties.get(name), map.get(name))
        else {
            continue;
        };
        validate_at(field_value, field_schema, &format!("{}.{}", path, name))?;
    }

    for (name, field_schema) in &def.properties {
        if def.property_ordering.contains(name) {
            continue;
        }
        if let Some(field_value) = map.get(name) {
            validate_at(field_value, field_schema, &format!("{}.{}", path, name))?;
        }
    }

    Ok(())
}

fn mismatch(path: &str, schema: &SchemaType, value: &Value) -> ValidationError {
    ValidationError::TypeMismatch {
        path: path.to_string(),
        expected: schema.type_name(),
        found: json_type_name(value),
    }
}

/// JSON type name of a value
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
