//! Error types for keytally.
//!
//! Filtered key events and zero-duration speed are not errors. Everything
//! here is either fatal at start-up or a terminal problem on the way out.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeytallyError {
    /// The global keyboard hook could not be installed or died.
    ///
    /// On Linux this usually means no X11 display is reachable; on macOS
    /// the terminal needs Accessibility / Input Monitoring permission.
    #[error("Failed to listen for global key presses: {0}")]
    Listener(String),

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    /// The terminal may be left in raw mode; running `reset` recovers it.
    #[error("Failed to restore terminal: {0}")]
    TerminalCleanup(String),

    #[error("stdin must be a tty")]
    NotATty,

    #[error("Invalid config file: {0}")]
    Config(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, KeytallyError>;
