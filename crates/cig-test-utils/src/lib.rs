//! Shared test utilities for the cloud-init generator workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`prompter`]: scripted [`Prompter`](cig_core::Prompter) and a fixed hasher
//! - [`workspace`]: [`TestWorkspace`] with an input document and connector templates

pub mod prompter;
pub mod workspace;

pub use prompter::{FixedHasher, PromptRecord, ScriptedPrompter};
pub use workspace::{BASE_ANSWERS, CLOUD_INIT, GITHUB_TEMPLATE, OIDC_TEMPLATE, TestWorkspace};
