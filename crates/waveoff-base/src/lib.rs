//! Shared plumbing for the waveoff workspace.
//!
//! Currently this is the logging facade: a stdout logger installable once per
//! process, used by binaries and integration tests.

pub mod logging;

pub use logging::{StdoutLogger, init_stdout_logger};

// Re-export log so downstream crates can use waveoff_base::log::*
pub use log;
