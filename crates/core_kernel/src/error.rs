//! Kernel-level errors shared by every layer

use thiserror::Error;

use crate::identifiers::FormatError;
use crate::ports::PortError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Port error: {0}")]
    Port(#[from] PortError),

    /// Settings that are missing, unparsable or out of range
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    pub fn configuration(message: impl Into<String>) -> Self {
        CoreError::Configuration(message.into())
    }
}
