//! Error types for cig-sso

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] cig_fs::Error),

    #[error("Connector registry {path} defines no connectors")]
    EmptyRegistry { path: String },

    #[error("Invalid connector '{slug}': {reason}")]
    InvalidConnector { slug: String, reason: String },
}
