//! The parsed configuration document.

#[cfg(test)]
#[path = "document_tests.rs"]
mod tests;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ConfigError;
use crate::schema::{
    HandlerSpec, LoggerSpec, MonitorSpec, RawLoggerSpec, ServerConfig, TwilioCredentials,
};

/// Keys starting with this prefix are documentation only.
pub const METADATA_PREFIX: &str = "#";

pub const SERVER: &str = "server";
pub const MONITORS: &str = "monitors";
pub const LOGGERS: &str = "loggers";
pub const HANDLERS: &str = "handlers";
pub const FORMATTERS: &str = "formatters";
pub const TWILIO: &str = "twilio";

/// Whether `key` is a documentation-only key.
pub fn is_metadata_key(key: &str) -> bool {
    key.starts_with(METADATA_PREFIX)
}

/// Remove metadata keys from every mapping in `value`.
pub fn strip_metadata(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(strip_map(map)),
        Value::Array(items) => Value::Array(items.into_iter().map(strip_metadata).collect()),
        other => other,
    }
}

fn strip_map(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(k, _)| !is_metadata_key(k))
        .map(|(k, v)| (k, strip_metadata(v)))
        .collect()
}

/// A validated configuration document.
///
/// The root is guaranteed to be a JSON object. Sections are looked up on
/// demand; nothing returned from here contains metadata keys.
#[derive(Debug, Clone)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

impl ConfigDocument {
    /// Wrap a parsed JSON value. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(root) => Ok(Self { root }),
            other => Err(ConfigError::invalid(
                "document root",
                format!("expected an object, found {}", type_name(&other)),
            )),
        }
    }

    /// Parse a document from JSON text.
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        Self::from_value(serde_json::from_str(content)?)
    }

    /// Names of the non-metadata top-level sections.
    pub fn sections(&self) -> Vec<&str> {
        self.root
            .keys()
            .filter(|k| !is_metadata_key(k))
            .map(String::as_str)
            .collect()
    }

    /// Return the named top-level section with metadata keys stripped.
    pub fn get_value(&self, section: &str) -> Result<Map<String, Value>, ConfigError> {
        match self.root.get(section) {
            Some(Value::Object(map)) => Ok(strip_map(map.clone())),
            Some(other) => Err(ConfigError::invalid(
                section,
                format!("expected an object, found {}", type_name(other)),
            )),
            None => Err(ConfigError::MissingSection(section.to_string())),
        }
    }

    /// Return one entry of a section.
    pub fn get_entry(&self, section: &str, name: &str) -> Result<Value, ConfigError> {
        if is_metadata_key(name) {
            return Err(missing_entry(section, name));
        }
        self.get_value(section)?
            .remove(name)
            .ok_or_else(|| missing_entry(section, name))
    }

    /// All monitor entries, in document order.
    pub fn monitors(&self) -> Result<Vec<(String, MonitorSpec)>, ConfigError> {
        self.get_value(MONITORS)?
            .into_iter()
            .map(|(name, value)| {
                let spec = decode(format!("{}.{}", MONITORS, name), value)?;
                Ok((name, spec))
            })
            .collect()
    }

    pub fn monitor_spec(&self, name: &str) -> Result<MonitorSpec, ConfigError> {
        decode(format!("{}.{}", MONITORS, name), self.get_entry(MONITORS, name)?)
    }

    pub fn logger_spec(&self, name: &str) -> Result<LoggerSpec, ConfigError> {
        let raw: RawLoggerSpec =
            decode(format!("{}.{}", LOGGERS, name), self.get_entry(LOGGERS, name)?)?;
        let handlers = raw
            .handlers
            .into_iter()
            .map(|(alias, target)| match target {
                Value::String(handler) => Ok((alias, handler)),
                other => Err(ConfigError::invalid(
                    format!("{}.{}.handlers.{}", LOGGERS, name, alias),
                    format!("expected a handler name, found {}", type_name(&other)),
                )),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(LoggerSpec {
            log_level: raw.log_level,
            handlers,
            propagate: raw.propagate,
        })
    }

    /// Whether a logger with this exact name is configured.
    pub fn has_logger(&self, name: &str) -> bool {
        !is_metadata_key(name)
            && matches!(self.root.get(LOGGERS), Some(Value::Object(map)) if map.contains_key(name))
    }

    pub fn handler_spec(&self, name: &str) -> Result<HandlerSpec, ConfigError> {
        decode(format!("{}.{}", HANDLERS, name), self.get_entry(HANDLERS, name)?)
    }

    pub fn formatter_pattern(&self, name: &str) -> Result<String, ConfigError> {
        match self.get_entry(FORMATTERS, name)? {
            Value::String(pattern) => Ok(pattern),
            other => Err(ConfigError::invalid(
                format!("{}.{}", FORMATTERS, name),
                format!("expected a pattern string, found {}", type_name(&other)),
            )),
        }
    }

    /// The `server` section, or defaults when it is absent.
    pub fn server(&self) -> Result<ServerConfig, ConfigError> {
        match self.get_value(SERVER) {
            Ok(map) => serde_json::from_value(Value::Object(map))
                .map_err(|e| ConfigError::invalid(SERVER, e)),
            Err(ConfigError::MissingSection(_)) => Ok(ServerConfig::default()),
            Err(e) => Err(e),
        }
    }

    pub fn twilio(&self) -> Result<TwilioCredentials, ConfigError> {
        serde_json::from_value(Value::Object(self.get_value(TWILIO)?))
            .map_err(|e| ConfigError::invalid(TWILIO, e))
    }
}

/// Deserialize `value`, reporting failures against `location`.
///
/// A missing field becomes [`ConfigError::MissingField`] so diagnostics name it.
pub fn decode<T: DeserializeOwned>(
    location: impl Into<String>,
    value: Value,
) -> Result<T, ConfigError> {
    let location = location.into();
    serde_json::from_value(value).map_err(|e| {
        let message = e.to_string();
        match missing_field_name(&message).map(str::to_string) {
            Some(field) => ConfigError::MissingField { location, field },
            None => ConfigError::invalid(location, message),
        }
    })
}

/// Extract the field from serde's "missing field `x`" message.
fn missing_field_name(message: &str) -> Option<&str> {
    let rest = message.strip_prefix("missing field `")?;
    rest.split('`').next()
}

fn missing_entry(section: &str, name: &str) -> ConfigError {
    ConfigError::MissingEntry {
        section: section.to_string(),
        name: name.to_string(),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
