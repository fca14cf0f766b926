//! # DisLogger Config
//!
//! Loading, repairing and querying the JSON configuration document.

#![recursion_limit = "256"]

pub mod document;
mod error;
mod loader;
mod schema;
mod template;

pub use document::{ConfigDocument, METADATA_PREFIX, decode, is_metadata_key, strip_metadata};
pub use error::ConfigError;
pub use loader::{CORRUPTED_SUFFIX, ConfigLoader};
pub use schema::{HandlerSpec, LoggerSpec, MonitorSpec, ServerConfig, TwilioCredentials};
pub use template::{DEFAULT_CONFIG_PATH, default_config};
