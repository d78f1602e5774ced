//! Error types for the onboarding wizard.

use crate::wizard::step::{Action, StepKind};

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Remote gateway errors.
///
/// Transport failures, non-success statuses and undecodable bodies all land in
/// the one variant; the controller does not tell them apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{operation}: {reason}")]
    RequestFailed { operation: String, reason: String },
}

impl GatewayError {
    pub fn request_failed(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RequestFailed {
            operation: operation.into(),
            reason: reason.into(),
        }
    }
}

/// A transition the controller refused to perform.
///
/// These never come from the server: they mean the caller asked for something
/// the current step does not allow, and state was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WizardError {
    #[error("Cannot {action} from the {from} step")]
    InvalidTransition { from: StepKind, action: Action },

    #[error("Required field is empty: {field}")]
    MissingField { field: String },

    #[error("No session: submit a profile first")]
    MissingSession,

    #[error("A request is already in flight on the {step} step")]
    Busy { step: StepKind },

    #[error("Invalid value for {field}: {value}")]
    InvalidChoice { field: String, value: String },

    #[error("Profile fields cannot be edited on the {step} step")]
    NotEditable { step: StepKind },
}

/// Result type alias for the crate.
pub type Result<T> = std::result::Result<T, Error>;
