//! The field-mapping model and its pure update operations
//!
//! A mapping is a value: every operation takes the current mapping and
//! returns the next one, leaving the original usable. Setting a source
//! binding resets the field's format and computation; setting a format or a
//! computation overlays onto the existing binding. Persistence is a separate
//! explicit step through the template store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::compute::ComputationSpec;
use crate::schema::{FieldSpec, FieldType};
use crate::{MappingError, Result};

/// Where one field's value comes from
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Binding {
    /// Source table, empty for computed bindings
    #[serde(default)]
    pub table: String,

    /// Source column, empty for computed bindings
    #[serde(default)]
    pub column: String,

    /// Value type, drives formatting at resolution time
    #[serde(rename = "type")]
    #[serde(default)]
    pub field_type: FieldType,

    /// Format pattern; meaningful for date, currency, and number types
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Parsed computation; meaningful for computed bindings
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computation: Option<ComputationSpec>,
}

impl Binding {
    /// Create a source binding
    pub fn source(table: &str, column: &str, field_type: FieldType) -> Self {
        Self {
            table: table.to_string(),
            column: column.to_string(),
            field_type,
            format: None,
            computation: None,
        }
    }

    /// Create an empty computed binding
    pub fn computed() -> Self {
        Self {
            table: String::new(),
            column: String::new(),
            field_type: FieldType::Computed,
            format: None,
            computation: None,
        }
    }
}

/// The complete set of bindings for one template
///
/// Field names are unique keys; resolution order comes from the field spec
/// sequence, not from this map.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FieldMapping {
    bindings: BTreeMap<String, Binding>,
}

/// Mapping progress for an operator display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MappingStatus {
    /// Fields with some binding
    pub mapped: usize,

    /// Total declared fields
    pub total: usize,
}

impl FieldMapping {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the binding for a field
    pub fn get(&self, field: &str) -> Option<&Binding> {
        self.bindings.get(field)
    }

    /// Whether a field has any binding
    pub fn is_mapped(&self, field: &str) -> bool {
        self.bindings.contains_key(field)
    }

    /// Number of bound fields
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no field is bound
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Iterate over field name / binding pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Binding)> {
        self.bindings.iter()
    }

    /// Bind a field to a source column, replacing any existing binding
    ///
    /// Any previously set format or computation for the field is cleared:
    /// changing the source resets downstream configuration.
    pub fn with_source(&self, field: &str, table: &str, column: &str, field_type: FieldType) -> Self {
        let mut next = self.clone();
        next.bindings
            .insert(field.to_string(), Binding::source(table, column, field_type));
        next
    }

    /// Bind a field as computed, replacing any existing binding
    ///
    /// The computation itself is set separately with [`with_computation`].
    ///
    /// [`with_computation`]: FieldMapping::with_computation
    pub fn with_computed(&self, field: &str) -> Self {
        let mut next = self.clone();
        next.bindings.insert(field.to_string(), Binding::computed());
        next
    }

    /// Overlay a format onto a field's existing binding
    ///
    /// The table, column, and type are preserved. Fails if the field has no
    /// binding yet; the caller's mapping is unchanged in that case.
    pub fn with_format(&self, field: &str, format: &str) -> Result<Self> {
        if !self.bindings.contains_key(field) {
            return Err(MappingError::UnmappedField(field.to_string()));
        }

        let mut next = self.clone();
        if let Some(binding) = next.bindings.get_mut(field) {
            binding.format = Some(format.to_string());
        }
        Ok(next)
    }

    /// Overlay a computation onto a field's existing computed binding
    ///
    /// Fails if the field has no binding, or if its binding is not of the
    /// computed type; the caller's mapping is unchanged in either case.
    pub fn with_computation(&self, field: &str, computation: ComputationSpec) -> Result<Self> {
        match self.bindings.get(field) {
            None => return Err(MappingError::UnmappedField(field.to_string())),
            Some(binding) if binding.field_type != FieldType::Computed => {
                return Err(MappingError::NotComputed(field.to_string()));
            }
            Some(_) => {}
        }

        let mut next = self.clone();
        if let Some(binding) = next.bindings.get_mut(field) {
            binding.computation = Some(computation);
        }
        Ok(next)
    }

    /// Count bound fields against the template's declared fields
    pub fn status(&self, fields: &[FieldSpec]) -> MappingStatus {
        let mapped = fields
            .iter()
            .filter(|spec| self.bindings.contains_key(&spec.name))
            .count();
        MappingStatus {
            mapped,
            total: fields.len(),
        }
    }
}
