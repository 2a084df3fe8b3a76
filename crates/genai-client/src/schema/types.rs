//! Schema descriptor types
//!
//! This module defines the type system for response-shape descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// String type with an optional closed set of values
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StringSchema {
    /// Optional description (read by the model)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Allowed values (closed set)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#enum: Option<Vec<String>>,
}

/// Number (or integer) type with optional inclusive bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NumberSchema {
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Minimum value (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,

    /// Maximum value (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
}

/// Boolean type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BooleanSchema {
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Array type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArraySchema {
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema for array items
    pub items: Box<SchemaType>,

    /// Minimum number of items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_items: Option<usize>,

    /// Maximum number of items
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_items: Option<usize>,
}

/// Object type with named properties
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSchema {
    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Properties map
    #[serde(default)]
    pub properties: BTreeMap<String, SchemaType>,

    /// Required property names
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,

    /// Order in which the model should emit properties
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
}

impl ObjectSchema {
    /// Create an empty object schema
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required property
    pub fn field(mut self, name: impl Into<String>, schema: SchemaType) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.insert(name, schema);
        self
    }

    /// Add an optional property
    pub fn optional_field(mut self, name: impl Into<String>, schema: SchemaType) -> Self {
        self.insert(name.into(), schema);
        self
    }

    /// Set the description
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Check whether a property is required
    pub fn is_required(&self, name: &str) -> bool {
        self.required.iter().any(|r| r == name)
    }

    fn insert(&mut self, name: String, schema: SchemaType) {
        if !self.property_ordering.contains(&name) {
            self.property_ordering.push(name.clone());
        }
        self.properties.insert(name, schema);
    }
}

/// All supported schema types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum SchemaType {
    /// String type
    String(StringSchema),

    /// Floating point number
    Number(NumberSchema),

    /// Whole number
    Integer(NumberSchema),

    /// Boolean type
    Boolean(BooleanSchema),

    /// Array type
    Array(ArraySchema),

    /// Object type
    Object(ObjectSchema),
}

impl SchemaType {
    /// Free-text string
    pub fn string() -> Self {
        SchemaType::String(StringSchema::default())
    }

    /// String restricted to `values`
    pub fn string_enum(values: &[&str]) -> Self {
        SchemaType::String(StringSchema {
            description: None,
            r#enum: Some(values.iter().map(|v| v.to_string()).collect()),
        })
    }

    /// Floating point number
    pub fn number() -> Self {
        SchemaType::Number(NumberSchema::default())
    }

    /// Whole number
    pub fn integer() -> Self {
        SchemaType::Integer(NumberSchema::default())
    }

    /// Boolean
    pub fn boolean() -> Self {
        SchemaType::Boolean(BooleanSchema::default())
    }

    /// Array of `items`
    pub fn array(items: SchemaType) -> Self {
        SchemaType::Array(ArraySchema {
            description: None,
            items: Box::new(items),
            min_items: None,
            max_items: None,
        })
    }

    /// Object
    pub fn object(object: ObjectSchema) -> Self {
        SchemaType::Object(object)
    }

    /// Set the description of any schema type
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        let description = Some(description.into());
        match &mut self {
            SchemaType::String(s) => s.description = description,
            SchemaType::Number(n) | SchemaType::Integer(n) => n.description = description,
            SchemaType::Boolean(b) => b.description = description,
            SchemaType::Array(a) => a.description = description,
            SchemaType::Object(o) => o.description = description,
        }
        self
    }

    /// Cap the number of items; has no effect on non-array types
    pub fn max_items(mut self, max: usize) -> Self {
        if let SchemaType::Array(a) = &mut self {
            a.max_items = Some(max);
        }
        self
    }

    /// Require a minimum number of items; has no effect on non-array types
    pub fn min_items(mut self, min: usize) -> Self {
        if let SchemaType::Array(a) = &mut self {
            a.min_items = Some(min);
        }
        self
    }

    /// Get the description
    pub fn description(&self) -> Option<&str> {
        match self {
            SchemaType::String(s) => s.description.as_deref(),
            SchemaType::Number(n) | SchemaType::Integer(n) => n.description.as_deref(),
            SchemaType::Boolean(b) => b.description.as_deref(),
            SchemaType::Array(a) => a.description.as_deref(),
            SchemaType::Object(o) => o.description.as_deref(),
        }
    }

    /// Wire name of the type
    pub fn type_name(&self) -> &'static str {
        match self {
            SchemaType::String(_) => "STRING",
            SchemaType::Number(_) => "NUMBER",
            SchemaType::Integer(_) => "INTEGER",
            SchemaType::Boolean(_) => "BOOLEAN",
            SchemaType::Array(_) => "ARRAY",
            SchemaType::Object(_) => "OBJECT",
        }
    }
}
