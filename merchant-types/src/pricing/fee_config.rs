//! Tolerant decoding of stored pricing configuration.
//!
//! Group configs and merchant override maps are stored as JSON. Depending on
//! the column type a row hands them over either as text or already decoded.
//! A malformed blob must never break rate resolution, so [`decode`] reports
//! every failure as "absent".

use serde_json::{Map, Value};

use crate::error::ConfigError;

/// Decoded JSON object.
pub type ConfigMap = Map<String, Value>;

/// A configuration field as it comes out of storage.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawConfig {
    /// Column was NULL or never set
    #[default]
    Unset,
    /// JSON text that still needs decoding
    Text(String),
    /// Already-decoded JSON value
    Structured(Value),
}

impl RawConfig {
    pub fn is_unset(&self) -> bool {
        matches!(self, RawConfig::Unset)
    }
}

impl From<Option<String>> for RawConfig {
    fn from(value: Option<String>) -> Self {
        value.map(RawConfig::Text).unwrap_or_default()
    }
}

impl From<Option<Value>> for RawConfig {
    fn from(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => RawConfig::Unset,
            Some(Value::String(text)) => RawConfig::Text(text),
            Some(other) => RawConfig::Structured(other),
        }
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn into_object(value: Value) -> Result<Option<ConfigMap>, ConfigError> {
    match value {
        Value::Object(map) => Ok(Some(map)),
        // `null` stored as JSON text is the same as never set
        Value::Null => Ok(None),
        other => Err(ConfigError::NotAnObject {
            found: kind_of(&other),
        }),
    }
}

/// Strict decode: reports why a blob could not be used.
pub fn try_decode(raw: &RawConfig) -> Result<Option<ConfigMap>, ConfigError> {
    match raw {
        RawConfig::Unset => Ok(None),
        RawConfig::Structured(value) => into_object(value.clone()),
        RawConfig::Text(text) => into_object(serde_json::from_str(text)?),
    }
}

/// Decodes a stored config into a JSON object, or `None` if there is no
/// usable one. Failures are logged and never returned.
pub fn decode(raw: &RawConfig) -> Option<ConfigMap> {
    match try_decode(raw) {
        Ok(map) => map,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring undecodable fee config");
            None
        }
    }
}

/// Reads a percentage out of a config value.
///
/// Numbers are taken as-is and numeric strings are parsed. Everything else
/// (null, booleans, garbage text) is treated as no value.
pub fn as_percentage(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}
