//! Config file loading and schema validation.

use crate::error::ConfigError;
use crate::model::GatewayConfig;
use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

/// Load a gateway config from a JSON5 file.
pub fn load_config(path: &Path) -> Result<GatewayConfig, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let value: Value = json5::from_str(&raw)?;
    validate_config_schema(&value)?;
    let config: GatewayConfig = serde_json::from_value(value)?;
    debug!("loaded config (path={})", path.display());
    Ok(config)
}

/// Validate a raw config document against the schema.
fn validate_config_schema(value: &Value) -> Result<(), ConfigError> {
    let map = expect_object(value, "")?;
    ensure_allowed_keys(map, &["server", "completion", "store"], "")?;

    if let Some(value) = map.get("server") {
        validate_server(value, "server")?;
    }
    if let Some(value) = map.get("completion") {
        validate_completion(value, "completion")?;
    }
    if let Some(value) = map.get("store") {
        validate_store(value, "store")?;
    }
    Ok(())
}

/// Validate the "server" block.
fn validate_server(value: &Value, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, path)?;
    ensure_allowed_keys(map, &["bind"], path)?;
    if let Some(value) = map.get("bind") {
        expect_string(value, &join_path(path, "bind"))?;
    }
    Ok(())
}

/// Validate the "completion" block.
fn validate_completion(value: &Value, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, path)?;
    ensure_allowed_keys(map, &["endpoint", "api_key", "timeout_secs"], path)?;
    if let Some(value) = map.get("endpoint") {
        expect_string(value, &join_path(path, "endpoint"))?;
    }
    if let Some(value) = map.get("api_key") {
        expect_string(value, &join_path(path, "api_key"))?;
    }
    if let Some(value) = map.get("timeout_secs") {
        expect_u64(value, &join_path(path, "timeout_secs"))?;
    }
    Ok(())
}

/// Validate the "store" block.
fn validate_store(value: &Value, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, path)?;
    ensure_allowed_keys(map, &["path"], path)?;
    if let Some(value) = map.get("path") {
        expect_string(value, &join_path(path, "path"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(path, "expected string"))
    }
}

/// Expect a JSON u64 or return a typed error.
fn expect_u64(value: &Value, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(path, "expected integer"))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(&join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: normalized_path.to_string(),
        message: message.to_string(),
    }
}
