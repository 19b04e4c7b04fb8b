//! Connector registry and template loading.

use cig_fs::{ConfigStore, NormalizedPath, io};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::reindent::Layout;

/// Connector id meaning "no template, insert a placeholder for manual SSO".
pub const MANUAL_CONNECTOR: &str = "none";

/// Menu label for [`MANUAL_CONNECTOR`].
pub const MANUAL_LABEL: &str = "Create my own SSO configuration";

/// A supported SSO backend and its template file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConnectorSpec {
    /// Machine identifier (e.g., "github")
    pub slug: String,
    /// Display name (e.g., "GitHub")
    pub name: String,
    /// Template file name, relative to the templates directory
    pub file: String,
    #[serde(default)]
    pub layout: Layout,
}

impl ConnectorSpec {
    pub fn new(slug: impl Into<String>, name: impl Into<String>, file: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            name: name.into(),
            file: file.into(),
            layout: Layout::default(),
        }
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

/// On-disk registry definition.
///
/// ```toml
/// [[connector]]
/// slug = "github"
/// name = "GitHub"
/// file = "github_connector.yaml"
/// layout = "passthrough"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    #[serde(rename = "connector", default)]
    pub connectors: Vec<ConnectorSpec>,
}

/// A loaded connector template, not yet filled or re-indented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectorTemplate {
    pub connector: String,
    pub text: String,
    pub layout: Layout,
}

/// Result of [`ConnectorRegistry::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Template(ConnectorTemplate),
    /// The user chose manual SSO configuration.
    NoneSelected,
    /// Unknown connector, or its template file could not be read.
    NotFound {
        connector: String,
        path: Option<NormalizedPath>,
    },
}

fn builtin_specs() -> Vec<ConnectorSpec> {
    vec![
        ConnectorSpec::new("github", "GitHub", "github_connector.yaml"),
        ConnectorSpec::new("gitlab", "GitLab", "gitlab_connector.yaml"),
        ConnectorSpec::new("entra", "Microsoft Entra ID", "entra_connector.yaml"),
        ConnectorSpec::new("google", "Google", "google_connector.yaml"),
        ConnectorSpec::new("pingid", "PingID", "pingid_connector.yaml"),
        ConnectorSpec::new("oidc", "Generic OIDC", "oidc_connector.yaml"),
        ConnectorSpec::new("saml", "SAML 2.0", "saml_connector.yaml"),
    ]
}

/// Ordered set of connectors backed by a templates directory.
#[derive(Debug, Clone)]
pub struct ConnectorRegistry {
    templates_dir: NormalizedPath,
    connectors: Vec<ConnectorSpec>,
}

impl ConnectorRegistry {
    /// Create an empty registry.
    pub fn new(templates_dir: impl Into<NormalizedPath>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            connectors: Vec::new(),
        }
    }

    /// Create a registry with the built-in Dex connectors.
    pub fn with_builtins(templates_dir: impl Into<NormalizedPath>) -> Self {
        let mut registry = Self::new(templates_dir);
        for spec in builtin_specs() {
            registry.register(spec);
        }
        registry
    }

    /// Create a registry from a TOML, JSON or YAML definition file.
    pub fn from_config(
        templates_dir: impl Into<NormalizedPath>,
        config_path: &NormalizedPath,
    ) -> Result<Self> {
        let config: RegistryConfig = ConfigStore::new().load(config_path)?;
        if config.connectors.is_empty() {
            return Err(Error::EmptyRegistry {
                path: config_path.to_string(),
            });
        }

        let mut registry = Self::new(templates_dir);
        for spec in config.connectors {
            validate(&spec)?;
            registry.register(spec);
        }
        tracing::debug!(
            config = %config_path,
            connectors = registry.len(),
            "loaded connector registry"
        );
        Ok(registry)
    }

    /// Register a connector. Re-registering a slug replaces it in place.
    pub fn register(&mut self, spec: ConnectorSpec) {
        match self.connectors.iter_mut().find(|c| c.slug == spec.slug) {
            Some(existing) => *existing = spec,
            None => self.connectors.push(spec),
        }
    }

    pub fn get(&self, slug: &str) -> Option<&ConnectorSpec> {
        self.connectors.iter().find(|c| c.slug == slug)
    }

    pub fn templates_dir(&self) -> &NormalizedPath {
        &self.templates_dir
    }

    /// Connector slugs in menu order.
    pub fn list(&self) -> Vec<&str> {
        self.connectors.iter().map(|c| c.slug.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }

    /// Menu labels: every connector, then the manual option.
    pub fn menu_items(&self) -> Vec<String> {
        self.connectors
            .iter()
            .map(|c| c.name.clone())
            .chain(std::iter::once(MANUAL_LABEL.to_string()))
            .collect()
    }

    /// Connector id for a 1-based menu choice.
    pub fn slug_for_choice(&self, choice: usize) -> Option<&str> {
        match choice {
            0 => None,
            n if n <= self.connectors.len() => Some(self.connectors[n - 1].slug.as_str()),
            n if n == self.connectors.len() + 1 => Some(MANUAL_CONNECTOR),
            _ => None,
        }
    }

    pub fn template_path(&self, spec: &ConnectorSpec) -> NormalizedPath {
        self.templates_dir.join(&spec.file)
    }

    /// Resolve a connector id to its template text.
    ///
    /// Missing and unreadable templates are reported as
    /// [`LoadOutcome::NotFound`], never as errors.
    pub fn load(&self, connector: &str) -> LoadOutcome {
        if connector == MANUAL_CONNECTOR {
            return LoadOutcome::NoneSelected;
        }

        let Some(spec) = self.get(connector) else {
            tracing::warn!(connector, "unknown connector");
            return LoadOutcome::NotFound {
                connector: connector.to_string(),
                path: None,
            };
        };

        let path = self.template_path(spec);
        match io::read_text(&path) {
            Ok(text) => {
                tracing::debug!(connector, path = %path, "loaded connector template");
                LoadOutcome::Template(ConnectorTemplate {
                    connector: spec.slug.clone(),
                    text,
                    layout: spec.layout,
                })
            }
            Err(e) => {
                tracing::warn!(connector, error = %e, "connector template unavailable");
                LoadOutcome::NotFound {
                    connector: connector.to_string(),
                    path: Some(path),
                }
            }
        }
    }
}

fn validate(spec: &ConnectorSpec) -> Result<()> {
    let reason = if spec.slug == MANUAL_CONNECTOR {
        "slug is reserved for manual configuration"
    } else if spec.slug.trim().is_empty() {
        "slug is empty"
    } else if spec.file.trim().is_empty() {
        "template file is empty"
    } else {
        return Ok(());
    };
    Err(Error::InvalidConnector {
        slug: spec.slug.clone(),
        reason: reason.to_string(),
    })
}
