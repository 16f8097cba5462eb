use thiserror::Error;

/// Everything that can go wrong between a form and the POS service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    /// Rejected locally before anything was sent.
    #[error("{0}")]
    Validation(String),

    /// Network failure, non-2xx response or an unreadable body.
    #[error("Network error: {0}")]
    Transport(String),

    /// The service answered but reported a non-success status.
    #[error("{0}")]
    LogicalFailure(String),

    #[error("Could not load vendors: {0}")]
    DirectoryFetch(String),

    /// A vendor was created but its stored record could not be matched by name.
    #[error("Vendor \"{name}\" was created but could not be selected automatically")]
    ReconciliationMiss { name: String },

    #[error("No location selected")]
    MissingLocation,
}

impl AppError {
    /// Errors the user can retry by repeating the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::LogicalFailure(_) | AppError::DirectoryFetch(_)
        )
    }

    /// Reported as a warning rather than an error; the action itself succeeded.
    pub fn is_warning(&self) -> bool {
        matches!(self, AppError::ReconciliationMiss { .. })
    }
}
