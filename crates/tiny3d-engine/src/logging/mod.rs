//! Logging setup.
//!
//! Everything logs through the `log` facade. Native builds install
//! `env_logger`; the browser host installs `console_log` (see `web`).

#[cfg(not(target_arch = "wasm32"))]
mod init;

#[cfg(not(target_arch = "wasm32"))]
pub use init::{init_logging, LoggingConfig};
