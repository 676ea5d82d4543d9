//! Resolution of business records into renderable field values
//!
//! Resolution is best-effort by design: a missing binding, an absent source
//! value, or an unknown computation turns into an empty value plus an
//! advisory warning, never an error. A degraded document beats a blocked
//! workflow here; callers decide whether warnings should gate generation.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::binding::{Binding, FieldMapping};
use crate::compute::ComputedValue;
use crate::record::{resolve_path, value_to_f64, value_to_string};
use crate::schema::{FieldSpec, FieldType, Position};
use locale::{parse_date, parse_epoch, CurrencyPreset, DateFormat, NumberFormat};

/// Advisory condition recorded during resolution
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveWarning {
    #[error("Required field '{field}' has no mapping")]
    MissingRequiredMapping { field: String },

    #[error("Field '{field}' uses unknown computation '{raw}'")]
    UnknownComputation { field: String, raw: String },
}

/// A final per-field value
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Text(String),
    Image(Vec<u8>),
}

impl ResolvedValue {
    /// The textual content, empty for image values
    pub fn as_text(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Image(_) => "",
        }
    }
}

/// One resolved field with the geometry the renderer needs
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedField {
    pub name: String,
    pub value: ResolvedValue,
    pub position: Option<Position>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Ordered resolved values for one generation request
///
/// Order matches the field spec sequence and is stable across repeated
/// calls for the same template.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedDocument {
    pub fields: Vec<ResolvedField>,
}

impl ResolvedDocument {
    /// Look up a resolved field by name
    pub fn get(&self, name: &str) -> Option<&ResolvedField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Textual value of a field, empty when absent
    pub fn text(&self, name: &str) -> &str {
        self.get(name).map(|f| f.value.as_text()).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A resolution result with its advisory warnings
#[derive(Debug, Clone, PartialEq)]
pub struct ResolveOutcome {
    pub document: ResolvedDocument,
    pub warnings: Vec<ResolveWarning>,
}

/// Resolve a record against a mapping using the wall clock
pub fn resolve(fields: &[FieldSpec], mapping: &FieldMapping, record: &Value) -> ResolveOutcome {
    resolve_at(fields, mapping, record, Utc::now())
}

/// Resolve a record against a mapping with an explicit clock
pub fn resolve_at(
    fields: &[FieldSpec],
    mapping: &FieldMapping,
    record: &Value,
    now: DateTime<Utc>,
) -> ResolveOutcome {
    let mut document = ResolvedDocument::default();
    let mut warnings = Vec::new();

    for spec in fields {
        let value = match mapping.get(&spec.name) {
            None => {
                if spec.required {
                    log::warn!("Required field '{}' has no mapping", spec.name);
                    warnings.push(ResolveWarning::MissingRequiredMapping {
                        field: spec.name.clone(),
                    });
                }
                ResolvedValue::Text(String::new())
            }
            Some(binding) if binding.field_type == FieldType::Computed => {
                resolve_computed(spec, binding, record, now, &mut warnings)
            }
            Some(binding) => resolve_source(binding, record),
        };

        document.fields.push(ResolvedField {
            name: spec.name.clone(),
            value,
            position: spec.position,
            width: spec.width,
            height: spec.height,
        });
    }

    ResolveOutcome { document, warnings }
}

fn resolve_computed(
    spec: &FieldSpec,
    binding: &Binding,
    record: &Value,
    now: DateTime<Utc>,
    warnings: &mut Vec<ResolveWarning>,
) -> ResolvedValue {
    let Some(computation) = &binding.computation else {
        return ResolvedValue::Text(String::new());
    };

    if computation.is_unknown() {
        warnings.push(ResolveWarning::UnknownComputation {
            field: spec.name.clone(),
            raw: computation.encode(),
        });
    }

    let text = match computation.evaluate_at(record, now) {
        ComputedValue::Count(n) => n.to_string(),
        ComputedValue::Number(n) => format_number(n, binding.format.as_deref()),
        ComputedValue::Text(s) => match binding.format.as_deref().and_then(DateFormat::from_pattern)
        {
            Some(format) => parse_date(&s).map(|d| format.format(d)).unwrap_or(s),
            None => s,
        },
    };

    ResolvedValue::Text(text)
}

fn resolve_source(binding: &Binding, record: &Value) -> ResolvedValue {
    // One hop into a named related entity first, then a primary attribute
    let value = record
        .get(&binding.table)
        .and_then(|entity| entity.get(&binding.column))
        .or_else(|| record.get(&binding.column));

    let Some(value) = value else {
        return ResolvedValue::Text(String::new());
    };
    if value.is_null() {
        return ResolvedValue::Text(String::new());
    }

    match binding.field_type {
        FieldType::Image => decode_image(value),
        FieldType::Date => ResolvedValue::Text(format_date(value, binding.format.as_deref())),
        FieldType::Currency => {
            let text = match value_to_f64(value) {
                Some(n) => format_currency(n, binding.format.as_deref()),
                None => String::new(),
            };
            ResolvedValue::Text(text)
        }
        FieldType::Number => {
            let text = match value_to_f64(value) {
                Some(n) => match binding.format.as_deref() {
                    Some(pattern) => format_number_pattern(n, pattern),
                    None => plain_number(n),
                },
                None => String::new(),
            };
            ResolvedValue::Text(text)
        }
        FieldType::Text | FieldType::Computed => ResolvedValue::Text(value_to_string(value)),
    }
}

fn format_date(value: &Value, pattern: Option<&str>) -> String {
    let date = match value {
        Value::String(s) => parse_date(s),
        Value::Number(n) => n.as_f64().and_then(parse_epoch),
        _ => None,
    };

    let Some(date) = date else {
        return String::new();
    };

    pattern
        .and_then(DateFormat::from_pattern)
        .unwrap_or(DateFormat::Iso)
        .format(date)
}

fn format_currency(amount: f64, pattern: Option<&str>) -> String {
    match pattern.and_then(CurrencyPreset::from_code) {
        Some(preset) => preset.format(amount),
        // Outside the preset set: neutral two-decimal rendering
        None => NumberFormat::TwoPlaces.format(amount),
    }
}

fn format_number(n: f64, pattern: Option<&str>) -> String {
    match pattern {
        Some(p) => format_number_pattern(n, p),
        None => plain_number(n),
    }
}

fn format_number_pattern(n: f64, pattern: &str) -> String {
    match NumberFormat::from_pattern(pattern) {
        Some(format) => format.format(n),
        None => match CurrencyPreset::from_code(pattern) {
            Some(preset) => preset.format(n),
            None => NumberFormat::TwoPlaces.format(n),
        },
    }
}

/// Minimal rendering for unformatted numbers: no grouping, no forced places
fn plain_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1.0e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

fn decode_image(value: &Value) -> ResolvedValue {
    let Some(encoded) = value.as_str() else {
        return ResolvedValue::Text(String::new());
    };

    // Data URLs carry the payload after the first comma
    let payload = match encoded.split_once(",") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => encoded,
    };

    match base64::engine::general_purpose::STANDARD.decode(payload.trim()) {
        Ok(bytes) => ResolvedValue::Image(bytes),
        Err(e) => {
            log::debug!("Image payload is not valid base64: {e}");
            ResolvedValue::Text(String::new())
        }
    }
}
