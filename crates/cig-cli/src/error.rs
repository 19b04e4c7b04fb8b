//! Error types for cig-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that end the process with a non-zero status
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the generation pipeline
    #[error(transparent)]
    Core(#[from] cig_core::Error),

    /// Error from cig-fs
    #[error(transparent)]
    Fs(#[from] cig_fs::Error),

    /// Connector registry could not be built
    #[error(transparent)]
    Sso(#[from] cig_sso::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
