//! # DisLogger Core
//!
//! Wires the configuration document into live loggers and monitors and
//! supervises the running monitor set.
//!
//! - [`ConfigResolver`]: name-based, dependency-ordered construction with
//!   per-name caching
//! - [`Supervisor`]: `start_logging` / `stop_logging`
//! - [`StatusReporter`]: where the supervisor's progress messages go

pub mod error;
pub mod registry;
pub mod reporter;
pub mod resolver;
pub mod supervisor;

pub use error::CoreError;
pub use registry::{NamedRegistry, Registerable};
pub use reporter::{ChatReporter, LogReporter, StatusReporter};
pub use resolver::{ConfigResolver, HandlerKind, MonitorKind};
pub use supervisor::{
    ALREADY_LOGGING, NOT_LOGGING, STOP_DONE, Supervisor, started_message, stopped_message,
};
