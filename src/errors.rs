// SPDX-License-Identifier: GPL-3.0-only

//! Error types for capture-info

use std::fmt;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Result type alias for platform enumeration
pub type EnumerationResult<T> = Result<T, EnumerationError>;

/// Top-level error; every variant is fatal for the run
#[derive(Debug)]
pub enum AppError {
    /// The platform device enumeration call failed
    Enumeration(EnumerationError),
    /// The inventory could not be encoded as JSON
    Serialization(serde_json::Error),
    /// Writing the report to standard output failed
    Output(std::io::Error),
}

/// Errors raised by a [`DeviceEnumerator`](crate::backends::DeviceEnumerator)
#[derive(Debug)]
pub enum EnumerationError {
    /// The helper command could not be spawned (not installed, not in PATH)
    CommandUnavailable {
        command: &'static str,
        source: std::io::Error,
    },
    /// The helper command ran but exited unsuccessfully
    CommandFailed {
        command: &'static str,
        status: Option<i32>,
        stderr: String,
    },
    /// The platform returned data we could not interpret
    InvalidOutput(String),
    /// Filesystem access needed for enumeration failed
    Io(std::io::Error),
}

impl EnumerationError {
    /// True when the backend cannot be used on this host at all (helper
    /// missing or its daemon unreachable)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            EnumerationError::CommandUnavailable { .. } | EnumerationError::CommandFailed { .. }
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Enumeration(e) => write!(f, "Device enumeration failed: {}", e),
            AppError::Serialization(e) => write!(f, "Failed to encode device list: {}", e),
            AppError::Output(e) => write!(f, "Failed to write output: {}", e),
        }
    }
}

impl fmt::Display for EnumerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnumerationError::CommandUnavailable { command, source } => {
                write!(f, "could not run {}: {}", command, source)
            }
            EnumerationError::CommandFailed {
                command,
                status,
                stderr,
            } => {
                match status {
                    Some(code) => write!(f, "{} exited with status {}", command, code)?,
                    None => write!(f, "{} was terminated by a signal", command)?,
                }
                if !stderr.is_empty() {
                    write!(f, ": {}", stderr)?;
                }
                Ok(())
            }
            EnumerationError::InvalidOutput(msg) => write!(f, "invalid platform data: {}", msg),
            EnumerationError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Enumeration(e) => Some(e),
            AppError::Serialization(e) => Some(e),
            AppError::Output(e) => Some(e),
        }
    }
}

impl std::error::Error for EnumerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnumerationError::CommandUnavailable { source, .. } => Some(source),
            EnumerationError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EnumerationError> for AppError {
    fn from(err: EnumerationError) -> Self {
        AppError::Enumeration(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Output(err)
    }
}

impl From<std::io::Error> for EnumerationError {
    fn from(err: std::io::Error) -> Self {
        EnumerationError::Io(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_failed_display_includes_stderr() {
        let err = EnumerationError::CommandFailed {
            command: "pw-dump",
            status: Some(1),
            stderr: "connection refused".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "pw-dump exited with status 1: connection refused"
        );
    }

    #[test]
    fn test_unavailable_classification() {
        let missing = EnumerationError::CommandUnavailable {
            command: "pw-dump",
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(missing.is_unavailable());
        assert!(!EnumerationError::InvalidOutput("bad".into()).is_unavailable());
    }

    #[test]
    fn test_app_error_wraps_enumeration() {
        let err: AppError = EnumerationError::InvalidOutput("not an array".into()).into();
        assert!(matches!(err, AppError::Enumeration(_)));
        assert!(err.to_string().contains("not an array"));
    }
}
