//! Filesystem helpers for the cloud-init generator
//!
//! Provides normalized paths, atomic writes and format-agnostic config loading.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Format};
pub use error::{Error, Result};
pub use path::NormalizedPath;
