//! Core error types

use thiserror::Error;

/// Errors produced by the shell extension core
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    #[error("surface {0} already has a plasma surface")]
    AlreadyBound(u32),

    #[error("plasma surface for surface {0} has been invalidated")]
    Invalidated(u32),

    #[error("unknown surface handle: {0}")]
    UnknownHandle(u32),

    #[error("surface {0} is not an auto-hiding panel")]
    PanelNotAutoHidden(u32),

    #[error("value {value} out of range for {what}")]
    ValueOutOfRange { what: &'static str, value: u32 },

    #[error("state error: {0}")]
    StateError(String),
}

impl ShellError {
    pub fn state_error(msg: impl Into<String>) -> Self {
        Self::StateError(msg.into())
    }
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ShellError>;
