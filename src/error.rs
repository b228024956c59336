//! Error types for `wallet-navbar`
//!
//! This module defines all error types used throughout the crate.
//!
//! Error variants use `#[source]` to preserve error chains from the backend
//! bridge and the configuration layer.

use thiserror::Error;

/// Simple error type for wrapping string messages while implementing `std::error::Error`
#[derive(Debug, Error)]
#[error("{0}")]
pub struct StringError(pub String);

impl StringError {
    /// Create a new `StringError` from a string message
    pub fn new(msg: impl Into<String>) -> Box<Self> {
        Box::new(Self(msg.into()))
    }
}

/// Main error type for `wallet-navbar`
#[derive(Debug, Error)]
pub enum NavbarError {
    /// A backend request (close wallet, recent transfers) failed
    #[error("Backend request '{request}' failed: {source}")]
    BackendRequestFailed {
        /// Name of the backend request
        request: &'static str,
        /// Underlying failure reported by the bridge
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The backend bridge is not connected
    #[error("Backend bridge unavailable")]
    BackendUnavailable,

    /// An event name the controller does not subscribe to
    #[error("Unknown backend event: {0}")]
    UnknownEvent(String),

    /// An event payload that does not match its expected shape
    #[error("Invalid payload for '{event}': {source}")]
    InvalidPayload {
        /// Event name
        event: String,
        /// Decoding failure
        #[source]
        source: serde_json::Error,
    },

    /// The controller loop has stopped and no longer accepts messages
    #[error("Navbar controller is no longer running")]
    ControllerStopped,

    /// Configuration error
    /// Preserves the underlying error source for full error chain transparency
    #[error("Configuration error: {0}")]
    ConfigError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl NavbarError {
    /// Wrap a bridge failure for the named backend request
    pub fn backend(
        request: &'static str,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::BackendRequestFailed {
            request,
            source: source.into(),
        }
    }
}

/// Result type alias for `wallet-navbar` operations
pub type Result<T> = std::result::Result<T, NavbarError>;

/// Convert an error to a message suitable for a status line or dialog
pub fn get_user_friendly_error(error: &NavbarError) -> String {
    match error {
        NavbarError::BackendRequestFailed { request, .. } => format!(
            "The wallet backend could not complete '{request}'.\n\n\
             Please check that the daemon is running and try again."
        ),
        NavbarError::BackendUnavailable => "The wallet backend is not connected.\n\n\
             Restart the application if this persists."
            .to_string(),
        NavbarError::UnknownEvent(name) => {
            format!("Received an unsupported backend event: {name}")
        }
        NavbarError::InvalidPayload { event, .. } => format!(
            "Received malformed data for '{event}'.\n\n\
             The backend and UI versions may not match."
        ),
        NavbarError::ControllerStopped => "The navigation controller has stopped.\n\n\
             Restart the application to continue."
            .to_string(),
        NavbarError::ConfigError(_) => "Failed to load or save configuration.\n\n\
             Your settings may not persist.\n\
             Check that you have write permissions to:\n\
             %APPDATA%\\WalletNavbar"
            .to_string(),
        NavbarError::IoError(e) => {
            format!(
                "A file system error occurred:\n\n{e}\n\n\
                 Please check file permissions and disk space."
            )
        }
        NavbarError::JsonError(e) => {
            format!(
                "Configuration file is corrupted:\n\n{e}\n\n\
                 The application will use default settings."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = NavbarError::BackendUnavailable;
        assert_eq!(error.to_string(), "Backend bridge unavailable");
    }

    #[test]
    fn test_backend_error_keeps_source() {
        use std::error::Error as _;

        let error = NavbarError::backend("closeWallet", StringError::new("wallet busy"));
        assert_eq!(
            error.to_string(),
            "Backend request 'closeWallet' failed: wallet busy"
        );
        assert_eq!(error.source().unwrap().to_string(), "wallet busy");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: NavbarError = io_error.into();
        assert!(matches!(error, NavbarError::IoError(_)));
    }

    #[test]
    fn test_unknown_event_user_friendly() {
        let error = NavbarError::UnknownEvent("update_everything".to_string());
        let message = get_user_friendly_error(&error);
        assert!(message.contains("unsupported backend event"));
        assert!(message.contains("update_everything"));
    }

    #[test]
    fn test_backend_failure_user_friendly() {
        let error = NavbarError::backend("getRecentTransfers", "timeout");
        let message = get_user_friendly_error(&error);
        assert!(message.contains("getRecentTransfers"));
        assert!(message.contains("daemon is running"));
    }
}
