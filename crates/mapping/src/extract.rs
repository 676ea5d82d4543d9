//! Field extraction from raw template definitions

use serde_json::Value;

use crate::schema::{FieldSpec, FieldType, Position};

/// Extract the ordered field list from a raw template definition
///
/// The input is either the section array itself or an object carrying it
/// under `schema`. Output order is section order, then author field order
/// within each section. This never fails: sections that are not objects are
/// skipped (they declare no fields), and malformed field configurations are
/// emitted with defaulted type and absent geometry. The validator is the
/// place where such defects become visible.
pub fn extract_fields(raw: &Value) -> Vec<FieldSpec> {
    let mut fields = Vec::new();

    let Some(sections) = schema_sections(raw) else {
        return fields;
    };

    for section in sections {
        let Some(entries) = section.as_object() else {
            continue;
        };
        for (name, config) in entries {
            fields.push(field_spec(name, config));
        }
    }

    fields
}

/// Locate the section array in a raw definition
pub(crate) fn schema_sections(raw: &Value) -> Option<&Vec<Value>> {
    match raw {
        Value::Array(sections) => Some(sections),
        Value::Object(_) => raw.get("schema").and_then(Value::as_array),
        _ => None,
    }
}

fn field_spec(name: &str, config: &Value) -> FieldSpec {
    let field_type = config
        .get("type")
        .and_then(Value::as_str)
        .and_then(FieldType::parse)
        .unwrap_or_default();

    let required = config
        .get("required")
        .and_then(Value::as_bool)
        .unwrap_or(false);

    let position = config.get("position").and_then(position);

    FieldSpec {
        name: name.to_string(),
        field_type,
        required,
        position,
        width: config.get("width").and_then(Value::as_f64),
        height: config.get("height").and_then(Value::as_f64),
    }
}

fn position(value: &Value) -> Option<Position> {
    let x = value.get("x").and_then(Value::as_f64)?;
    let y = value.get("y").and_then(Value::as_f64)?;
    Some(Position { x, y })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_preserves_order() {
        let raw = json!({
            "schema": [
                {
                    "customer_name": { "type": "text", "position": { "x": 60, "y": 100 }, "width": 200, "height": 16 },
                    "offer_date": { "type": "date", "position": { "x": 420, "y": 100 }, "width": 90, "height": 16 }
                },
                {
                    "total": { "type": "currency", "required": true, "position": { "x": 420, "y": 640 }, "width": 120, "height": 18 }
                }
            ]
        });

        let fields = extract_fields(&raw);
        let names: Vec<&str> = fields.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["customer_name", "offer_date", "total"]);
        assert_eq!(fields[2].field_type, FieldType::Currency);
        assert!(fields[2].required);
    }

    #[test]
    fn test_extract_bare_array() {
        let raw = json!([
            { "note": { "type": "text", "position": { "x": 0, "y": 0 }, "width": 50, "height": 10 } }
        ]);

        assert_eq!(extract_fields(&raw).len(), 1);
    }

    #[test]
    fn test_extract_malformed_field_config() {
        let raw = json!({
            "schema": [
                { "broken": "not an object", "also_broken": 12 }
            ]
        });

        let fields = extract_fields(&raw);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0].field_type, FieldType::Text);
        assert!(fields[0].position.is_none());
        assert!(fields[0].width.is_none());
    }

    #[test]
    fn test_extract_skips_non_object_sections() {
        let raw = json!({
            "schema": [
                "stray",
                { "kept": { "type": "text" } },
                42
            ]
        });

        let fields = extract_fields(&raw);
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "kept");
    }

    #[test]
    fn test_extract_empty_inputs() {
        assert!(extract_fields(&json!(null)).is_empty());
        assert!(extract_fields(&json!({})).is_empty());
        assert!(extract_fields(&json!({ "schema": [] })).is_empty());
        assert!(extract_fields(&json!("garbage")).is_empty());
    }

    #[test]
    fn test_extract_partial_geometry() {
        let raw = json!({
            "schema": [
                { "half": { "type": "number", "position": { "x": 10 }, "width": "wide" } }
            ]
        });

        let fields = extract_fields(&raw);
        assert!(fields[0].position.is_none());
        assert!(fields[0].width.is_none());
        assert_eq!(fields[0].field_type, FieldType::Number);
    }
}
