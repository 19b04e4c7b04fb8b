//! Dex SSO connector handling for cloud-init documents.
//!
//! Connector templates are authored flat, one `key: value` per line:
//!
//! ```text
//! type: oidc
//! id: oidc
//! name: OIDC
//! config:
//! issuer: {{ ISSUER }}
//! scopes:
//! - openid
//! ```
//!
//! [`reindent`] nests them according to an [`IndentProfile`], and [`splice`]
//! places the result under the `content: |` of the document's
//! `- path: /etc/dex/sso.yaml` entry.

pub mod connector;
pub mod error;
pub mod reindent;
pub mod splice;

pub use connector::{
    ConnectorRegistry, ConnectorSpec, ConnectorTemplate, LoadOutcome, MANUAL_CONNECTOR, MANUAL_LABEL,
    RegistryConfig,
};
pub use error::{Error, Result};
pub use reindent::{IndentProfile, Layout, Section, SectionRule, reindent};
pub use splice::{DEX_SSO_PATH, Splice, splice};
