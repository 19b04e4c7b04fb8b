//! Error types for cig-core

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a generation run
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] cig_fs::Error),

    #[error(transparent)]
    Sso(#[from] cig_sso::Error),

    /// The input collaborator could not deliver an answer
    #[error("Prompt failed: {message}")]
    Prompt { message: String },
}

impl Error {
    pub fn prompt(message: impl Into<String>) -> Self {
        Self::Prompt {
            message: message.into(),
        }
    }
}
