//! Interactive cloud-init generation.
//!
//! [`Generator`] drives a document through block removal, placeholder
//! substitution, the optional SSO connector splice and final cleanup. User
//! input and credential hashing are reached through the [`Prompter`] and
//! [`CredentialHasher`] seams so the pipeline runs the same under a terminal
//! and under test.

pub mod error;
pub mod hash;
pub mod pipeline;
pub mod prompt;

pub use error::{Error, Result};
pub use hash::{CredentialHasher, ScriptHasher};
pub use pipeline::{Feature, Generator, format_entrypoint};
pub use prompt::{Prompter, Question, ask, in_range, is_uuid_v4};
