//! The generation pipeline.

use cig_blocks::{Replacements, extract, finalize, is_secret, remove_block, substitute};
use cig_sso::{ConnectorRegistry, DEX_SSO_PATH, LoadOutcome, Splice, reindent, splice};

use crate::Result;
use crate::hash::CredentialHasher;
use crate::prompt::{Prompter, Question, ask, choose, confirm, is_uuid_v4};

/// Placeholder for the Dex connector configuration.
pub const SSO_PLACEHOLDER: &str = "DEX_SSO_CONFIG";

/// Optional sections of the controller document, in the order they are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    SshKey,
    RootPassword,
    Sso,
    InitialAdmin,
    ClusterJoin,
}

impl Feature {
    pub const ALL: [Feature; 5] = [
        Feature::SshKey,
        Feature::RootPassword,
        Feature::Sso,
        Feature::InitialAdmin,
        Feature::ClusterJoin,
    ];

    /// Marker block removed when the feature is declined.
    pub fn block(self) -> &'static str {
        match self {
            Feature::SshKey => "ssh key",
            Feature::RootPassword => "root password",
            Feature::Sso => "sso",
            Feature::InitialAdmin => "init-users",
            Feature::ClusterJoin => "should-join",
        }
    }

    pub fn question(self) -> &'static str {
        match self {
            Feature::SshKey => "Include an SSH key? (y/n): ",
            Feature::RootPassword => "Include a placeholder for root password? (y/n): ",
            Feature::Sso => "Use SSO for user authentication? (y/n): ",
            Feature::InitialAdmin => "Generate an initial admin user? (y/n): ",
            Feature::ClusterJoin => "Join this controller to an existing cluster? (y/n): ",
        }
    }
}

/// Normalizes a controller address to a quoted `https://` URL.
///
/// ```
/// use cig_core::format_entrypoint;
///
/// assert_eq!(format_entrypoint("ctrl.example.com"), "\"https://ctrl.example.com\"");
/// assert_eq!(format_entrypoint("\"https://ctrl\""), "\"https://ctrl\"");
/// ```
pub fn format_entrypoint(entrypoint: &str) -> String {
    let entrypoint = entrypoint.trim_matches('"');
    if entrypoint.starts_with("https://") {
        format!("\"{}\"", entrypoint)
    } else {
        format!("\"https://{}\"", entrypoint)
    }
}

/// Runs one document through the interactive pipeline.
pub struct Generator<'a, P, H> {
    registry: &'a ConnectorRegistry,
    prompter: P,
    hasher: H,
    anchor_path: String,
}

impl<'a, P: Prompter, H: CredentialHasher> Generator<'a, P, H> {
    pub fn new(registry: &'a ConnectorRegistry, prompter: P, hasher: H) -> Self {
        Self {
            registry,
            prompter,
            hasher,
            anchor_path: DEX_SSO_PATH.to_string(),
        }
    }

    /// Splice the SSO fragment into a different `write_files` path.
    pub fn with_anchor_path(mut self, anchor_path: impl Into<String>) -> Self {
        self.anchor_path = anchor_path.into();
        self
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Produce the final document.
    pub fn run(&mut self, document: &str) -> Result<String> {
        let mut document = document.to_string();
        let mut replacements = self.base_values()?;

        for feature in Feature::ALL {
            if confirm(&mut self.prompter, feature.question())? {
                tracing::debug!(?feature, "feature included");
                document = self.include(feature, document, &mut replacements)?;
            } else {
                tracing::debug!(?feature, block = feature.block(), "feature declined");
                document = remove_block(&document, feature.block());
            }
        }

        let document = substitute(&document, &replacements);
        let remaining = extract(&document);
        if !remaining.is_empty() {
            tracing::debug!(?remaining, "placeholders left for manual resolution");
        }
        Ok(finalize(&document))
    }

    fn base_values(&mut self) -> Result<Replacements> {
        let mut replacements = Replacements::new();
        replacements.insert(
            "CONTROLLER_HOSTNAME",
            ask(&mut self.prompter, &Question::new("Controller hostname: "))?,
        );
        replacements.insert(
            "SITE_ID",
            ask(
                &mut self.prompter,
                &Question::new("Site ID (leave blank to auto-generate): ")
                    .auto_generate()
                    .validate(is_uuid_v4),
            )?,
        );
        replacements.insert(
            "SYNC_PSK",
            ask(
                &mut self.prompter,
                &Question::new("Sync PSK (leave blank to auto-generate): ").auto_generate(),
            )?,
        );
        Ok(replacements)
    }

    fn include(
        &mut self,
        feature: Feature,
        document: String,
        replacements: &mut Replacements,
    ) -> Result<String> {
        match feature {
            Feature::SshKey => {
                let key = ask(&mut self.prompter, &Question::new("Public SSH key: "))?;
                replacements.insert("PUBLIC_SSH_KEY", key);
            }
            Feature::RootPassword => replacements.defer("ROOT_HASHED_PASSWORD"),
            Feature::Sso => return self.configure_sso(document, replacements),
            Feature::InitialAdmin => {
                let email = ask(&mut self.prompter, &Question::new("Initial user email: "))?;
                let password = ask(
                    &mut self.prompter,
                    &Question::new("Initial user password: ").secret(),
                )?;
                let credentials = self.hasher.hash(&email, &password).unwrap_or_else(|| {
                    tracing::warn!(email = %email, "no credential line produced");
                    String::new()
                });
                replacements.insert("INIT_USER_CREDENTIALS", credentials);
            }
            Feature::ClusterJoin => {
                let host = ask(
                    &mut self.prompter,
                    &Question::new("Existing controller hostname: "),
                )?;
                replacements.insert("FIRST_CONTROLLER_HOSTNAME", format_entrypoint(&host));
            }
        }
        Ok(document)
    }

    fn configure_sso(&mut self, document: String, replacements: &mut Replacements) -> Result<String> {
        let registry = self.registry;
        let choice = choose(
            &mut self.prompter,
            "\nChoose one of the below options:",
            &registry.menu_items(),
            "Choose a Dex connector (number): ",
        )?;
        let connector = registry
            .slug_for_choice(choice)
            .unwrap_or(cig_sso::MANUAL_CONNECTOR);

        let template = match registry.load(connector) {
            LoadOutcome::Template(template) => template,
            LoadOutcome::NoneSelected => {
                self.prompter
                    .notify("Entering a placeholder for manual SSO insertion.");
                replacements.defer(SSO_PLACEHOLDER);
                return Ok(document);
            }
            LoadOutcome::NotFound { connector, .. } => {
                self.prompter.notify(&format!(
                    "Template for {} not found. Leaving a placeholder for manual SSO insertion.",
                    connector
                ));
                replacements.defer(SSO_PLACEHOLDER);
                return Ok(document);
            }
        };

        let mut values = Replacements::new();
        for name in extract(&template.text) {
            let question = Question::new(format!("Enter value for {}: ", name));
            let question = if is_secret(&name) { question.secret() } else { question };
            let value = ask(&mut self.prompter, &question)?;
            values.insert(name, value);
        }

        let filled = substitute(&template.text, &values);
        let fragment = reindent(&filled, &template.layout.profile());

        match splice(&document, &self.anchor_path, &fragment) {
            Splice::Replaced(spliced) => {
                tracing::info!(connector = %template.connector, lines = fragment.len(), "SSO connector spliced");
                replacements.remove(SSO_PLACEHOLDER);
                Ok(spliced)
            }
            Splice::AnchorMissing => {
                self.prompter.notify(&format!(
                    "No '- path: {}' entry found. Leaving a placeholder for manual SSO insertion.",
                    self.anchor_path
                ));
                replacements.defer(SSO_PLACEHOLDER);
                Ok(document)
            }
        }
    }
}
