//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add volume-access context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("cannot open volume {}: {source}", .device.display())]
    VolumeOpen {
        device: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot query volume {}: {source}", .device.display())]
    VolumeQuery {
        device: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// OS error code reported by the platform, if any.
    pub fn os_code(&self) -> Option<i32> {
        match self {
            ApplicationError::VolumeOpen { source, .. }
            | ApplicationError::VolumeQuery { source, .. } => source.raw_os_error(),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
