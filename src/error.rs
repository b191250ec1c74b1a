use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the suite's library layer.
///
/// `Timeout` is its own variant so a runner can tell "the condition never
/// became true" apart from an assertion on a value that did show up.
#[derive(Error, Debug)]
pub enum Error {
    #[error("timed out after {elapsed:?} waiting for {waiting_for}")]
    Timeout {
        waiting_for: String,
        elapsed: Duration,
    },

    #[error("browser protocol error: {0}")]
    Cdp(#[from] chromiumoxide::error::CdpError),

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("interaction failed: {0}")]
    Interaction(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True when the error is a poll deadline expiry rather than a
    /// protocol or interaction fault.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
