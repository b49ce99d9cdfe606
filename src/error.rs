//! Failure taxonomy for a single submission.

/// Errors a submission can end with. Every variant is shown to the user.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FlowError {
    /// Input rejected before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The backend answered with an `error` field.
    #[error("{0}")]
    Declared(String),

    /// Network failure, unreadable body or an HTTP error status.
    #[error("{0}")]
    Transport(String),
}

impl FlowError {
    pub fn transport(context: &str, err: impl std::fmt::Display) -> Self {
        FlowError::Transport(format!("{}: {}", context, err))
    }

    /// Text for the blocking notification raised on a failed submission.
    pub fn notification(&self) -> String {
        format!("Error: {}", self)
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FlowError::Validation(_) => "validation",
            FlowError::Declared(_) => "declared",
            FlowError::Transport(_) => "transport",
        }
    }
}
