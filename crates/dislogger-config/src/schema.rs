//! Typed views over configuration sections.

use serde::Deserialize;
use serde_json::{Map, Value};

use dislogger_logging::Level;

/// `server` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub id: String,

    /// Channel status notifications go to.
    #[serde(default)]
    pub main_channel_id: Option<String>,

    #[serde(default)]
    pub bot_token: Option<String>,
}

/// One entry of the `monitors` section.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSpec {
    /// Registry type name, e.g. `ARPMonitor`.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Name of the logger the monitor reports to.
    pub logger: String,

    /// Variant specific arguments.
    #[serde(default)]
    pub config: Map<String, Value>,
}

/// One entry of the `loggers` section.
#[derive(Debug, Clone)]
pub struct LoggerSpec {
    pub log_level: Level,

    /// `(alias, handler name)` pairs in document order.
    pub handlers: Vec<(String, String)>,

    /// Forward records to the nearest configured ancestor.
    pub propagate: bool,
}

#[derive(Deserialize)]
pub(crate) struct RawLoggerSpec {
    pub log_level: Level,
    #[serde(default)]
    pub handlers: Map<String, Value>,
    #[serde(default = "default_propagate")]
    pub propagate: bool,
}

fn default_propagate() -> bool {
    true
}

/// One entry of the `handlers` section.
#[derive(Debug, Clone, Deserialize)]
pub struct HandlerSpec {
    /// Registry type name, e.g. `DiscordHandler`.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Name of the formatter in the `formatters` section.
    pub formatter: String,

    #[serde(default)]
    pub config: Map<String, Value>,
}

/// `twilio` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TwilioCredentials {
    #[serde(default)]
    pub sid: String,
    #[serde(default)]
    pub secret: String,
    #[serde(default)]
    pub from_number: String,
}
