//! Template and field schema types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::binding::FieldMapping;

/// Declared type of a template field
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Date,
    Currency,
    Image,
    Computed,
}

impl FieldType {
    /// Parse a type name as it appears in raw template definitions
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "text" => Some(Self::Text),
            "number" => Some(Self::Number),
            "date" => Some(Self::Date),
            "currency" => Some(Self::Currency),
            "image" => Some(Self::Image),
            "computed" => Some(Self::Computed),
            _ => None,
        }
    }
}

/// Position in layout coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// X coordinate in points
    pub x: f64,

    /// Y coordinate in points (from top)
    pub y: f64,
}

/// One named, typed slot in a template
///
/// Geometry is opaque to the mapping logic; it is carried through to the
/// renderer untouched. Malformed template input yields specs with `None`
/// geometry rather than failing extraction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldSpec {
    /// Field name, unique within a template
    pub name: String,

    /// Declared type
    #[serde(rename = "type")]
    #[serde(default)]
    pub field_type: FieldType,

    /// Whether the field must be mapped for a complete document
    #[serde(default)]
    pub required: bool,

    /// Position, if the template declared one
    #[serde(default)]
    pub position: Option<Position>,

    /// Width in points
    #[serde(default)]
    pub width: Option<f64>,

    /// Height in points
    #[serde(default)]
    pub height: Option<f64>,
}

/// A reusable named document layout with its field mapping
///
/// The raw `schema` value is the ordered section sequence produced by the
/// template designer; this engine reads it through the extractor and
/// validator but never rewrites it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Template {
    /// Template identifier; empty until first saved
    #[serde(default)]
    pub id: String,

    /// Display name
    pub name: String,

    /// Free-form description
    #[serde(default)]
    pub description: String,

    /// Document type this template produces (e.g. "quote", "invoice")
    #[serde(rename = "docType")]
    pub doc_type: String,

    /// Raw layout definition: ordered sections of field declarations
    #[serde(default)]
    pub schema: serde_json::Value,

    /// Field name to binding associations
    #[serde(default)]
    pub mapping: FieldMapping,

    /// Whether this is the default template for its document type
    #[serde(rename = "isDefault")]
    #[serde(default)]
    pub is_default: bool,

    /// Author identifier
    #[serde(rename = "createdBy")]
    #[serde(default)]
    pub created_by: String,

    #[serde(rename = "createdAt")]
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,

    #[serde(rename = "updatedAt")]
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Template {
    /// Create an unsaved template for a document type
    pub fn new(name: &str, doc_type: &str) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name: name.to_string(),
            description: String::new(),
            doc_type: doc_type.to_string(),
            schema: serde_json::Value::Null,
            mapping: FieldMapping::new(),
            is_default: false,
            created_by: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the raw layout definition
    pub fn with_schema(mut self, schema: serde_json::Value) -> Self {
        self.schema = schema;
        self
    }

    /// Set the field mapping
    pub fn with_mapping(mut self, mapping: FieldMapping) -> Self {
        self.mapping = mapping;
        self
    }
}
