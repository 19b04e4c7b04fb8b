//! Text-level template operations for cloud-init documents.
//!
//! Documents are treated as indentation-sensitive text, never parsed into a
//! YAML tree. Three concerns live here:
//!
//! - [`marker`]: optional sections delimited by comment markers
//!
//! ```text
//! # start ssh key block #
//! ssh_authorized_keys:
//!   - {{ PUBLIC_SSH_KEY }}
//! # end ssh key block #
//! ```
//!
//! - [`placeholder`]: `{{ NAME }}` discovery and substitution
//! - [`cleanup`]: final comment and blank-line stripping

pub mod cleanup;
pub mod marker;
pub mod placeholder;

pub use cleanup::{CLOUD_CONFIG_HEADER, finalize, remove_comments, remove_empty_lines};
pub use marker::{MarkerBlock, find_blocks, has_block, remove_block};
pub use placeholder::{Replacements, extract, is_secret, substitute, token};
