//! Configuration resolver.
//!
//! Turns the parsed configuration document into live objects, in dependency
//! order: formatter, handler, logger, monitor. References between sections
//! are plain names; every name is resolved through this type, which caches
//! formatters, handlers and loggers so each configured name has exactly one
//! instance.
//!
//! Type names (`"DiscordHandler"`, `"ARPMonitor"`, ...) map to a closed set
//! of variants through [`HandlerKind`] and [`MonitorKind`]. Unknown type
//! names, missing fields and failed constructions all surface as
//! [`ConfigError`].

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use dislogger_config::{ConfigDocument, ConfigError, MonitorSpec, decode};
use dislogger_logging::{
    ChatHandler, ChatNotifier, FileHandler, Formatter, Handler, HandlerError, Level, Logger,
    SmsHandler, SmsProvider, StreamHandler, StreamTarget, TwilioClient,
};
use dislogger_monitor::{
    ArpingProbe, LivenessConfig, LivenessMonitor, Monitor, MonitorError, MonitorLoop,
    PresenceProbe, ResourceConfig, ResourceKind, ResourceMonitor,
};

use crate::registry::NamedRegistry;

/// Handler variants, keyed by configuration type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerKind {
    Stream,
    File,
    Discord,
    Sms,
}

const HANDLER_TYPES: &[(&str, HandlerKind)] = &[
    ("StreamHandler", HandlerKind::Stream),
    ("FileHandler", HandlerKind::File),
    ("DiscordHandler", HandlerKind::Discord),
    ("SMSHandler", HandlerKind::Sms),
];

impl HandlerKind {
    pub fn from_type_name(type_name: &str, location: &str) -> Result<Self, ConfigError> {
        lookup(HANDLER_TYPES, "handler", type_name, location)
    }

    /// Every accepted type name.
    pub fn type_names() -> impl Iterator<Item = &'static str> {
        HANDLER_TYPES.iter().map(|(name, _)| *name)
    }
}

/// Monitor variants, keyed by configuration type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorKind {
    Liveness,
    Cpu,
    Memory,
}

const MONITOR_TYPES: &[(&str, MonitorKind)] = &[
    ("ARPMonitor", MonitorKind::Liveness),
    ("LivenessMonitor", MonitorKind::Liveness),
    ("CPUMonitor", MonitorKind::Cpu),
    ("RAMMonitor", MonitorKind::Memory),
    ("MemoryMonitor", MonitorKind::Memory),
];

impl MonitorKind {
    pub fn from_type_name(type_name: &str, location: &str) -> Result<Self, ConfigError> {
        lookup(MONITOR_TYPES, "monitor", type_name, location)
    }

    pub fn type_names() -> impl Iterator<Item = &'static str> {
        MONITOR_TYPES.iter().map(|(name, _)| *name)
    }
}

fn lookup<K: Copy>(
    table: &[(&str, K)],
    kind: &str,
    type_name: &str,
    location: &str,
) -> Result<K, ConfigError> {
    table
        .iter()
        .find(|(name, _)| *name == type_name)
        .map(|(_, k)| *k)
        .ok_or_else(|| ConfigError::UnknownType {
            kind: kind.to_string(),
            type_name: type_name.to_string(),
            location: location.to_string(),
        })
}

/// A channel id or phone number, written either as a string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Identifier {
    Text(String),
    Number(u64),
}

impl Identifier {
    fn into_string(self) -> String {
        match self {
            Identifier::Text(s) => s,
            Identifier::Number(n) => n.to_string(),
        }
    }
}

fn identifier(value: Option<Identifier>) -> String {
    value.map(Identifier::into_string).unwrap_or_default()
}

#[derive(Deserialize)]
struct StreamArgs {
    log_level: Level,
    #[serde(default)]
    stream: StreamTarget,
}

#[derive(Deserialize)]
struct FileArgs {
    log_level: Level,
    #[serde(default)]
    path: String,
}

#[derive(Deserialize)]
struct DiscordArgs {
    log_level: Level,
    #[serde(default)]
    channel_id: Option<Identifier>,
}

#[derive(Deserialize)]
struct SmsArgs {
    log_level: Level,
    #[serde(default)]
    phone_number_destination: Option<Identifier>,
}

/// Fold a handler construction error into a configuration error.
fn handler_error(location: &str, err: HandlerError) -> ConfigError {
    match err {
        HandlerError::MissingField { field, .. } => match field.split_once('.') {
            Some((section, field)) => ConfigError::MissingField {
                location: section.to_string(),
                field: field.to_string(),
            },
            None => ConfigError::MissingField {
                location: format!("{}.config", location),
                field: field.to_string(),
            },
        },
        other => ConfigError::invalid(location, other),
    }
}

fn monitor_error(location: &str, err: MonitorError) -> ConfigError {
    ConfigError::invalid(location, err)
}

/// Builds formatters, handlers, loggers and monitors from a
/// [`ConfigDocument`].
pub struct ConfigResolver {
    document: ConfigDocument,
    formatters: NamedRegistry<Formatter>,
    handlers: NamedRegistry<dyn Handler>,
    loggers: NamedRegistry<Logger>,
    notifier: Option<Arc<dyn ChatNotifier>>,
    sms_provider: Option<Arc<dyn SmsProvider>>,
    probe: Arc<dyn PresenceProbe>,
}

impl ConfigResolver {
    pub fn new(document: ConfigDocument) -> Self {
        Self {
            document,
            formatters: NamedRegistry::new(),
            handlers: NamedRegistry::new(),
            loggers: NamedRegistry::new(),
            notifier: None,
            sms_provider: None,
            probe: Arc::new(ArpingProbe::new()),
        }
    }

    /// Chat backend used by `DiscordHandler` entries.
    pub fn with_chat_notifier(mut self, notifier: Arc<dyn ChatNotifier>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// SMS backend used by `SMSHandler` entries instead of Twilio.
    pub fn with_sms_provider(mut self, provider: Arc<dyn SmsProvider>) -> Self {
        self.sms_provider = Some(provider);
        self
    }

    /// Presence probe used by liveness monitors.
    pub fn with_presence_probe(mut self, probe: Arc<dyn PresenceProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn document(&self) -> &ConfigDocument {
        &self.document
    }

    pub fn get_formatter(&self, name: &str) -> Result<Arc<Formatter>, ConfigError> {
        if let Some(formatter) = self.formatters.get(name) {
            return Ok(formatter);
        }
        let pattern = self.document.formatter_pattern(name)?;
        Ok(self.formatters.insert(Arc::new(Formatter::new(name, pattern))))
    }

    pub fn get_handler(&self, name: &str) -> Result<Arc<dyn Handler>, ConfigError> {
        if let Some(handler) = self.handlers.get(name) {
            return Ok(handler);
        }

        let location = format!("handlers.{}", name);
        let spec = self.document.handler_spec(name)?;
        let kind = HandlerKind::from_type_name(&spec.type_name, &location)?;
        let formatter = self.get_formatter(&spec.formatter)?;
        let config = Value::Object(spec.config);
        let config_location = format!("{}.config", location);

        let handler: Arc<dyn Handler> = match kind {
            HandlerKind::Stream => {
                let args: StreamArgs = decode(config_location, config)?;
                Arc::new(StreamHandler::new(name, args.log_level, formatter, args.stream))
            }
            HandlerKind::File => {
                let args: FileArgs = decode(config_location, config)?;
                Arc::new(
                    FileHandler::new(name, args.log_level, formatter, &args.path)
                        .map_err(|e| handler_error(&location, e))?,
                )
            }
            HandlerKind::Discord => {
                let args: DiscordArgs = decode(config_location, config)?;
                Arc::new(
                    ChatHandler::new(
                        name,
                        args.log_level,
                        formatter,
                        self.notifier.clone(),
                        identifier(args.channel_id),
                    )
                    .map_err(|e| handler_error(&location, e))?,
                )
            }
            HandlerKind::Sms => {
                let args: SmsArgs = decode(config_location, config)?;
                let provider = self.sms_provider(&location)?;
                Arc::new(
                    SmsHandler::new(
                        name,
                        args.log_level,
                        formatter,
                        provider,
                        identifier(args.phone_number_destination),
                    )
                    .map_err(|e| handler_error(&location, e))?,
                )
            }
        };

        debug!("Built handler {} ({})", name, spec.type_name);
        Ok(self.handlers.insert(handler))
    }

    fn sms_provider(&self, location: &str) -> Result<Arc<dyn SmsProvider>, ConfigError> {
        if let Some(provider) = &self.sms_provider {
            return Ok(Arc::clone(provider));
        }
        let credentials = self.document.twilio()?;
        let client = TwilioClient::new(credentials.sid, credentials.secret, credentials.from_number)
            .map_err(|e| handler_error(location, e))?;
        Ok(Arc::new(client))
    }

    /// Resolve a logger, its handlers and, when it propagates, its nearest
    /// configured ancestor.
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>, ConfigError> {
        if let Some(logger) = self.loggers.get(name) {
            return Ok(logger);
        }

        let spec = self.document.logger_spec(name)?;
        let mut logger = Logger::new(name, spec.log_level);
        for (_alias, handler_name) in &spec.handlers {
            logger = logger.with_handler(self.get_handler(handler_name)?);
        }
        if spec.propagate {
            if let Some(ancestor) = self.configured_ancestor(name) {
                logger = logger.with_parent(self.get_logger(ancestor)?);
            }
        }

        debug!("Built logger {} with handlers {:?}", name, logger.handler_names());
        Ok(self.loggers.insert(Arc::new(logger)))
    }

    fn configured_ancestor<'a>(&self, name: &'a str) -> Option<&'a str> {
        let mut current = name;
        while let Some((parent, _)) = current.rsplit_once('.') {
            if self.document.has_logger(parent) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Build a fresh, idle monitor for one `monitors` entry.
    pub fn get_monitor(&self, name: &str, spec: &MonitorSpec) -> Result<Monitor, ConfigError> {
        let location = format!("monitors.{}", name);
        let kind = MonitorKind::from_type_name(&spec.type_name, &location)?;
        let logger = self.get_logger(&spec.logger)?;
        let config = Value::Object(spec.config.clone());
        let config_location = format!("{}.config", location);

        let worker: Box<dyn MonitorLoop> = match kind {
            MonitorKind::Liveness => {
                let config: LivenessConfig = decode(config_location, config)?;
                Box::new(
                    LivenessMonitor::from_config(&config, Arc::clone(&self.probe))
                        .map_err(|e| monitor_error(&location, e))?,
                )
            }
            MonitorKind::Cpu | MonitorKind::Memory => {
                let config: ResourceConfig = decode(config_location, config)?;
                let resource = if kind == MonitorKind::Cpu {
                    ResourceKind::Cpu
                } else {
                    ResourceKind::Memory
                };
                Box::new(
                    ResourceMonitor::from_config(resource, &config)
                        .map_err(|e| monitor_error(&location, e))?,
                )
            }
        };

        Ok(Monitor::new(name, logger, worker))
    }

    /// Build every configured monitor, in document order.
    ///
    /// Nothing is returned unless every entry resolves.
    pub fn get_monitors(&self) -> Result<Vec<Monitor>, ConfigError> {
        self.document
            .monitors()?
            .iter()
            .map(|(name, spec)| self.get_monitor(name, spec))
            .collect()
    }

    /// Names of the loggers built so far.
    pub fn built_loggers(&self) -> Vec<String> {
        self.loggers.ids()
    }
}
