//! CLI-level errors (wraps application errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Application(#[from] ApplicationError),

    #[error("{0}")]
    Usage(String),

    #[error("unhandled command: {}", .0.as_deref().unwrap_or("<none>"))]
    UnknownCommand(Option<String>),

    #[error("Not implemented")]
    NotImplemented,
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::Application(e.into())
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) | CliError::UnknownCommand(_) => crate::exitcode::USAGE,
            CliError::NotImplemented => crate::exitcode::UNAVAILABLE,
            CliError::Application(e) => match e {
                ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                ApplicationError::VolumeOpen { .. } => crate::exitcode::NOINPUT,
                ApplicationError::VolumeQuery { .. } => crate::exitcode::IOERR,
                ApplicationError::Config { .. } => crate::exitcode::CONFIG,
            },
        }
    }

    /// Text written to stderr for this error.
    ///
    /// Volume failures show the OS error code, as `fsutil` always has.
    pub fn diagnostic(&self) -> String {
        match self {
            CliError::Application(e) => match e.os_code() {
                Some(code) => format!("Error: {}", code),
                None => format!("Error: {}", e),
            },
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn given_open_error_with_os_code_when_rendering_then_prints_code() {
        let err = CliError::from(ApplicationError::VolumeOpen {
            device: PathBuf::from(r"\\.\c:"),
            source: io::Error::from_raw_os_error(5),
        });
        assert_eq!(err.diagnostic(), "Error: 5");
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_query_error_without_os_code_when_rendering_then_prints_message() {
        let err = CliError::from(ApplicationError::VolumeQuery {
            device: PathBuf::from("/dev/sda1"),
            source: io::Error::new(io::ErrorKind::InvalidData, "bad magic"),
        });
        assert_eq!(
            err.diagnostic(),
            "Error: cannot query volume /dev/sda1: bad magic"
        );
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
    }

    #[test]
    fn given_stub_error_when_rendering_then_not_implemented() {
        assert_eq!(CliError::NotImplemented.diagnostic(), "Not implemented");
        assert_eq!(
            CliError::NotImplemented.exit_code(),
            crate::exitcode::UNAVAILABLE
        );
    }
}
