//! Closed-vocabulary computed-field evaluation
//!
//! Computation strings are parsed once when the mapping is set and stored in
//! parsed form; resolution evaluates the parsed value. Parsing is total:
//! unrecognized identifiers become [`ComputationSpec::Unknown`], which
//! evaluates to an empty value instead of aborting resolution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::record::{resolve_path, value_to_f64, value_to_string};

/// Separator used by `concat` computations
const CONCAT_SEPARATOR: &str = ", ";

/// A parsed computed-field instruction
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "String", into = "String")]
pub enum ComputationSpec {
    /// Wall-clock date at evaluation time
    CurrentDate,

    /// Wall-clock date and time at evaluation time
    CurrentDateTime,

    /// Length of the collection at a path
    Count { path: String },

    /// Numeric sum of a field across the collection at a path
    Sum { path: String, field: String },

    /// Attribute lookups joined with a fixed separator
    Concat { paths: Vec<String> },

    /// Anything outside the vocabulary; kept verbatim, resolves empty
    Unknown(String),
}

/// The result of evaluating a computation
#[derive(Debug, Clone, PartialEq)]
pub enum ComputedValue {
    Text(String),
    Number(f64),
    Count(usize),
}

impl ComputationSpec {
    /// Parse a computation string
    ///
    /// Never fails; forms outside the closed vocabulary parse to `Unknown`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw {
            "current_date" => return Self::CurrentDate,
            "current_datetime" => return Self::CurrentDateTime,
            _ => {}
        }

        if let Some(path) = raw.strip_prefix("count:") {
            let path = path.trim();
            if !path.is_empty() {
                return Self::Count {
                    path: path.to_string(),
                };
            }
        }

        if let Some(rest) = raw.strip_prefix("sum:") {
            // The final segment names the element field, the rest the collection
            if let Some((path, field)) = rest.trim().rsplit_once('.') {
                if !path.is_empty() && !field.is_empty() {
                    return Self::Sum {
                        path: path.to_string(),
                        field: field.to_string(),
                    };
                }
            }
        }

        if let Some(rest) = raw.strip_prefix("concat:") {
            let paths: Vec<String> = rest
                .split(',')
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect();
            if !paths.is_empty() {
                return Self::Concat { paths };
            }
        }

        Self::Unknown(raw.to_string())
    }

    /// The string form this spec parses from
    pub fn encode(&self) -> String {
        match self {
            Self::CurrentDate => "current_date".to_string(),
            Self::CurrentDateTime => "current_datetime".to_string(),
            Self::Count { path } => format!("count:{path}"),
            Self::Sum { path, field } => format!("sum:{path}.{field}"),
            Self::Concat { paths } => format!("concat:{}", paths.join(",")),
            Self::Unknown(raw) => raw.clone(),
        }
    }

    /// Whether this spec is outside the closed vocabulary
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown(_))
    }

    /// Evaluate against a record using the wall clock
    ///
    /// Date computations show the moment of generation, not anything stored
    /// on the record, so repeated runs can differ.
    pub fn evaluate(&self, record: &Value) -> ComputedValue {
        self.evaluate_at(record, Utc::now())
    }

    /// Evaluate against a record with an explicit clock
    pub fn evaluate_at(&self, record: &Value, now: DateTime<Utc>) -> ComputedValue {
        match self {
            Self::CurrentDate => ComputedValue::Text(now.format("%Y-%m-%d").to_string()),
            Self::CurrentDateTime => {
                ComputedValue::Text(now.format("%Y-%m-%d %H:%M:%S").to_string())
            }
            Self::Count { path } => {
                let count = resolve_path(record, path)
                    .and_then(Value::as_array)
                    .map(Vec::len)
                    .unwrap_or(0);
                ComputedValue::Count(count)
            }
            Self::Sum { path, field } => {
                let sum = resolve_path(record, path)
                    .and_then(Value::as_array)
                    .map(|elements| {
                        elements
                            .iter()
                            .map(|e| e.get(field).and_then(value_to_f64).unwrap_or(0.0))
                            .sum()
                    })
                    .unwrap_or(0.0);
                ComputedValue::Number(sum)
            }
            Self::Concat { paths } => {
                let parts: Vec<String> = paths
                    .iter()
                    .map(|p| {
                        resolve_path(record, p)
                            .map(value_to_string)
                            .unwrap_or_default()
                    })
                    .collect();
                ComputedValue::Text(parts.join(CONCAT_SEPARATOR))
            }
            Self::Unknown(raw) => {
                log::warn!("Unknown computation '{raw}' resolved to empty value");
                ComputedValue::Text(String::new())
            }
        }
    }
}

impl From<String> for ComputationSpec {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<ComputationSpec> for String {
    fn from(spec: ComputationSpec) -> Self {
        spec.encode()
    }
}
