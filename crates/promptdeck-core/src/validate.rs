//! Pure batch-request validation.
//!
//! Collects every violated property instead of stopping at the first, so
//! a rejected request reports all of its problems in one round trip.

use crate::error::ValidationError;
use crate::sanitize::sanitize;
use promptdeck_protocol::{BatchRequest, GenerationParams, InstructionItem, Violation};
use serde_json::{Map, Value};

/// Validate a decoded request body and build a sanitized batch.
///
/// The three instruction sequences must have equal length; unequal lengths
/// are rejected outright rather than truncated, since truncation would drop
/// submitted items without signal.
pub fn validate_batch(body: &Value) -> Result<BatchRequest, ValidationError> {
    let Some(map) = body.as_object() else {
        return Err(ValidationError {
            violations: vec![Violation::new("body", "expected a JSON object")],
        });
    };

    let mut violations = Vec::new();

    let user = take_string_array(map, "user_instructions", &mut violations);
    let assistant = take_string_array(map, "assistant_instructions", &mut violations);
    let system = take_string_array(map, "system_instructions", &mut violations);

    let model = take_string(map, "model", &mut violations);
    let temperature = take_number(map, "temperature", &mut violations);
    let max_tokens = take_integer(map, "max_tokens", &mut violations);
    let top_p = take_number(map, "top_p", &mut violations);
    let frequency_penalty = take_number(map, "frequency_penalty", &mut violations);
    let presence_penalty = take_number(map, "presence_penalty", &mut violations);

    if let Some(value) = temperature {
        if !(0.0..=2.0).contains(&value) {
            violations.push(Violation::new(
                "temperature",
                "expected a number between 0 and 2",
            ));
        }
    }
    if let Some(value) = top_p {
        if !(0.0..=1.0).contains(&value) {
            violations.push(Violation::new("top_p", "expected a number between 0 and 1"));
        }
    }
    if let Some(value) = max_tokens {
        if value == 0 {
            violations.push(Violation::new("max_tokens", "expected a positive integer"));
        }
    }

    if let (Some(user), Some(assistant), Some(system)) = (&user, &assistant, &system) {
        if user.len() != assistant.len() || user.len() != system.len() {
            violations.push(Violation::new(
                "user_instructions",
                format!(
                    "instruction sequences must have equal length (user={}, assistant={}, system={})",
                    user.len(),
                    assistant.len(),
                    system.len()
                ),
            ));
        }
    }

    if !violations.is_empty() {
        return Err(ValidationError { violations });
    }

    let (
        Some(user),
        Some(assistant),
        Some(system),
        Some(model),
        Some(temperature),
        Some(max_tokens),
        Some(top_p),
        Some(frequency_penalty),
        Some(presence_penalty),
    ) = (
        user,
        assistant,
        system,
        model,
        temperature,
        max_tokens,
        top_p,
        frequency_penalty,
        presence_penalty,
    )
    else {
        // unreachable: every None above recorded a violation
        return Err(ValidationError {
            violations: vec![Violation::new("body", "incomplete request")],
        });
    };

    let items = user
        .into_iter()
        .zip(assistant)
        .zip(system)
        .map(|((user, assistant), system)| InstructionItem {
            system: sanitize(&system),
            assistant: sanitize(&assistant),
            user: sanitize(&user),
        })
        .collect();
    let params = GenerationParams {
        model: sanitize(&model),
        temperature,
        max_tokens,
        top_p,
        frequency_penalty,
        presence_penalty,
    };
    Ok(BatchRequest::new(items, params))
}

/// Fetch a required array-of-strings field, recording violations.
fn take_string_array(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<Vec<String>> {
    let Some(value) = map.get(field) else {
        violations.push(Violation::new(field, "missing required field"));
        return None;
    };
    let Some(entries) = value.as_array() else {
        violations.push(Violation::new(field, "expected an array of strings"));
        return None;
    };
    let mut out = Vec::with_capacity(entries.len());
    let mut ok = true;
    for (idx, entry) in entries.iter().enumerate() {
        if let Some(text) = entry.as_str() {
            out.push(text.to_string());
        } else {
            violations.push(Violation::new(format!("{field}[{idx}]"), "expected string"));
            ok = false;
        }
    }
    ok.then_some(out)
}

/// Fetch a required string field, recording violations.
fn take_string(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<String> {
    let Some(value) = map.get(field) else {
        violations.push(Violation::new(field, "missing required field"));
        return None;
    };
    match value.as_str() {
        Some(text) => Some(text.to_string()),
        None => {
            violations.push(Violation::new(field, "expected string"));
            None
        }
    }
}

/// Fetch a required numeric field, recording violations.
///
/// Accepts JSON numbers or numeric strings; the browser shell submits the
/// sampling parameters as form-field strings.
fn take_number(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<f64> {
    let Some(value) = map.get(field) else {
        violations.push(Violation::new(field, "missing required field"));
        return None;
    };
    match coerce_f64(value) {
        Some(number) => Some(number),
        None => {
            violations.push(Violation::new(field, "expected a number"));
            None
        }
    }
}

/// Fetch a required integer field, recording violations.
fn take_integer(
    map: &Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<u32> {
    let Some(value) = map.get(field) else {
        violations.push(Violation::new(field, "missing required field"));
        return None;
    };
    match coerce_u64(value).and_then(|number| u32::try_from(number).ok()) {
        Some(number) => Some(number),
        None => {
            violations.push(Violation::new(field, "expected an integer"));
            None
        }
    }
}

/// Coerce a JSON number or numeric string to f64.
fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

/// Coerce a JSON integer or integral string to u64.
fn coerce_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
