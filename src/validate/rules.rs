//! Structural rules for each document kind.
//!
//! Every rule violation produces one distinct message. Rules operate on raw
//! JSON so that documents too broken to deserialize are still reported
//! field by field.

use serde_json::Value;

use crate::store::Tier;

/// True when `field` exists on `value` and is neither null nor an empty string.
fn is_present(value: &Value, field: &str) -> bool {
    match value.get(field) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn is_allowed_tier(tier: &str) -> bool {
    Tier::ALL.iter().any(|t| t.as_str() == tier)
}

/// Rules for `providers/<id>.json`.
pub fn validate_provider(doc: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let provider = &doc["provider"];
    if !is_present(provider, "id") {
        errors.push("Missing provider.id".to_string());
    }
    if !is_present(provider, "name") {
        errors.push("Missing provider.name".to_string());
    }

    match doc.get("models") {
        Some(Value::Array(models)) => {
            for (i, model) in models.iter().enumerate() {
                if !is_present(model, "id") {
                    errors.push(format!("Model {i}: missing id"));
                }
                if !is_present(model, "name") {
                    errors.push(format!("Model {i}: missing name"));
                }
                if let Some(tier) = model.get("tier") {
                    match tier.as_str() {
                        Some(t) if is_allowed_tier(t) => {}
                        _ => errors.push(format!("Model {i}: invalid tier {tier}")),
                    }
                }
            }
        }
        _ => errors.push("models must be an array".to_string()),
    }

    if !is_present(doc, "updated_at") {
        errors.push("Missing updated_at".to_string());
    }

    errors
}

/// Rules for `aliases/<id>.json`.
pub fn validate_alias(doc: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_present(doc, "provider") {
        errors.push("Missing provider".to_string());
    }

    match doc.get("aliases") {
        Some(Value::Object(aliases)) => {
            for (name, entry) in aliases {
                if !is_present(entry, "actual") {
                    errors.push(format!("Alias {name}: missing actual"));
                }
            }
        }
        _ => errors.push("aliases must be an object".to_string()),
    }

    errors
}

/// Rules for `index.json`.
pub fn validate_index(doc: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    if !is_present(doc, "version") {
        errors.push("Missing version".to_string());
    }
    if !is_present(doc, "updated_at") {
        errors.push("Missing updated_at".to_string());
    }
    if !doc.get("providers").is_some_and(Value::is_array) {
        errors.push("providers must be an array".to_string());
    }

    errors
}
