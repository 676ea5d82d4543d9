//! Advisory structural validation of raw template definitions

use serde_json::Value;

use crate::extract::schema_sections;

/// Check a raw template definition for structural completeness
///
/// Returns human-readable problem descriptions; an empty list means the
/// definition is structurally valid. Checks are independent and never
/// short-circuit. This is advisory only: generation may still be attempted
/// against an invalid template, and whether to block is the caller's policy.
pub fn validate_template(raw: &Value) -> Vec<String> {
    let mut problems = Vec::new();

    if raw.is_null() {
        problems.push("Template definition is missing".to_string());
    }

    let Some(sections) = schema_sections(raw) else {
        problems.push("Template has no schema sections".to_string());
        return problems;
    };

    if sections.is_empty() {
        problems.push("Schema must contain at least one section".to_string());
    }

    for (index, section) in sections.iter().enumerate() {
        let section_no = index + 1;
        let Some(entries) = section.as_object() else {
            problems.push(format!("Section {section_no} must be an object"));
            continue;
        };

        if entries.is_empty() {
            problems.push(format!("Section {section_no} must declare at least one field"));
        }

        for (name, config) in entries {
            check_field(name, config, &mut problems);
        }
    }

    problems
}

fn check_field(name: &str, config: &Value, problems: &mut Vec<String>) {
    if !config.is_object() {
        problems.push(format!("Field '{name}' must be an object"));
        return;
    }

    if config.get("type").and_then(Value::as_str).is_none() {
        problems.push(format!("Field '{name}' does not declare a type"));
    }

    let has_position = config
        .get("position")
        .map(|p| p.get("x").and_then(Value::as_f64).is_some() && p.get("y").and_then(Value::as_f64).is_some())
        .unwrap_or(false);
    if !has_position {
        problems.push(format!("Field '{name}' does not declare a position"));
    }

    let numeric = |key: &str| config.get(key).and_then(Value::as_f64).is_some();
    if !numeric("width") || !numeric("height") {
        problems.push(format!("Field '{name}' must declare numeric width and height"));
    }
}
