//! Error types and handling infrastructure for helpdesk.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types and `anyhow` for application-level error handling at the
//! binary boundary.
//!
//! ## Design Principles
//!
//! - **User-friendly messages**: Errors should provide actionable feedback
//! - **Classification over swallowing**: Command failures stay intact so the
//!   dispatch loop can record them
//! - **Consistency**: Standardized Result type across all modules

use thiserror::Error;

use crate::events::CommandError;

/// The main error type for helpdesk operations.
///
/// This enum covers all possible error conditions that can occur during
/// configuration loading, transport calls, and extension wiring.
#[derive(Error, Debug)]
pub enum HelpdeskError {
    /// Configuration loading or validation errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Chat transport call failures (send, respond, channel management)
    #[error("Transport operation failed: {message}")]
    Transport { message: String },

    /// A service was requested from the registry before being provided
    #[error("Missing dependency: {type_name} was never provided to the registry")]
    MissingDependency { type_name: &'static str },

    /// An extension loader failed during client wiring
    #[error("Extension failed to load: {message}")]
    Extension { message: String },

    /// A command error re-surfaced by a subscriber so the dispatch loop
    /// records it through the host logging machinery
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for helpdesk operations.
///
/// This type alias provides a consistent error handling interface across
/// all modules in the helpdesk codebase.
pub type Result<T> = std::result::Result<T, HelpdeskError>;

impl HelpdeskError {
    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a TransportError with a descriptive message
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a MissingDependency error for the given service type name
    pub fn missing_dependency(type_name: &'static str) -> Self {
        Self::MissingDependency { type_name }
    }

    /// Create an Extension error with a descriptive message
    pub fn extension(message: impl Into<String>) -> Self {
        Self::Extension {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let config_err = HelpdeskError::config("missing ticket category");
        assert_eq!(
            config_err.to_string(),
            "Configuration error: missing ticket category"
        );

        let transport_err = HelpdeskError::transport("interaction already answered");
        assert_eq!(
            transport_err.to_string(),
            "Transport operation failed: interaction already answered"
        );

        let missing = HelpdeskError::missing_dependency("helpdesk::embeds::EmbedService");
        assert_eq!(
            missing.to_string(),
            "Missing dependency: helpdesk::embeds::EmbedService was never provided to the registry"
        );
    }

    #[test]
    fn test_error_constructors() {
        let ext_err = HelpdeskError::extension("loader panicked");
        assert!(matches!(ext_err, HelpdeskError::Extension { .. }));

        let other_err = HelpdeskError::other("unknown error");
        assert!(matches!(other_err, HelpdeskError::Other { .. }));
    }

    #[test]
    fn test_command_error_conversion_is_transparent() {
        let original = CommandError::ConcurrencyLimit;
        let wrapped: HelpdeskError = original.clone().into();

        assert_eq!(wrapped.to_string(), original.to_string());
        match wrapped {
            HelpdeskError::Command(inner) => assert_eq!(inner, original),
            _ => panic!("Expected Command variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<String> {
            Ok("success".to_string())
        }

        let result = returns_result();
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
    }
}
