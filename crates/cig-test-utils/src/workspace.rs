//! Temporary directories holding an input document and connector templates.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A controller document carrying every optional block and placeholder.
pub const CLOUD_INIT: &str = r#"#cloud-config
# Controller bootstrap
hostname: {{ CONTROLLER_HOSTNAME }}

users:
  - name: admin
    sudo: ALL=(ALL) NOPASSWD:ALL
# start ssh key block #
    ssh_authorized_keys:
      - {{ PUBLIC_SSH_KEY }}
# end ssh key block #

# start root password block #
chpasswd:
  expire: false
  users:
    - name: root
      password: {{ ROOT_HASHED_PASSWORD }}
# end root password block #

write_files:
  - path: /etc/controller/site.env
    content: |
      SITE_ID={{ SITE_ID }}
      SYNC_PSK={{ SYNC_PSK }}
# start sso block #
  - path: /etc/dex/sso.yaml
    permissions: '0600'
    content: |
      {{ DEX_SSO_CONFIG }}
# end sso block #
# start init-users block #
  - path: /etc/controller/init-users
    content: |
      {{ INIT_USER_CREDENTIALS }}
# end init-users block #
# start should-join block #
  - path: /etc/controller/join.env
    content: |
      ENTRYPOINT={{ FIRST_CONTROLLER_HOSTNAME }}
# end should-join block #

runcmd:
  - systemctl enable --now controller
"#;

/// Flat GitHub connector with one visible and one secret placeholder.
pub const GITHUB_TEMPLATE: &str = "\
type: github
id: github
name: GitHub
config:
clientID: {{ CLIENT_ID }}
clientSecret: {{ CLIENT_SECRET }}
redirectURI: https://dex.example.com/callback
";

/// Flat OIDC connector exercising list and mapping sections.
pub const OIDC_TEMPLATE: &str = "\
type: oidc
id: oidc
name: OIDC
config:
issuer: {{ ISSUER }}
clientID: {{ CLIENT_ID }}
clientSecret: {{ CLIENT_SECRET }}
scopes:
openid
email
claimMapping:
email: mail
userIDKey: sub
";

/// Answers to the three base-value prompts.
pub const BASE_ANSWERS: [&str; 3] = ["ctrl.example.com", "", ""];

/// Scratch directory with `cloud-init.yaml` and a `dex_templates/` folder.
///
/// Removed on drop.
pub struct TestWorkspace {
    dir: TempDir,
}

impl TestWorkspace {
    /// An empty workspace with the fixture document and no templates.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        fs::create_dir_all(dir.path().join("dex_templates"))
            .expect("Failed to create templates directory");
        let workspace = Self { dir };
        workspace.write_input(CLOUD_INIT);
        workspace
    }

    /// A workspace with the GitHub and OIDC connector templates.
    pub fn with_templates() -> Self {
        Self::new()
            .with_template("github_connector.yaml", GITHUB_TEMPLATE)
            .with_template("oidc_connector.yaml", OIDC_TEMPLATE)
    }

    /// Add or replace a connector template file.
    pub fn with_template(self, file: &str, content: &str) -> Self {
        fs::write(self.templates_dir().join(file), content).expect("Failed to write template");
        self
    }

    /// Replace the input document.
    pub fn write_input(&self, content: &str) {
        fs::write(self.input_path(), content).expect("Failed to write input document");
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn input_path(&self) -> PathBuf {
        self.root().join("cloud-init.yaml")
    }

    pub fn templates_dir(&self) -> PathBuf {
        self.root().join("dex_templates")
    }

    pub fn output_path(&self) -> PathBuf {
        self.root().join("generated-cloud-init.yaml")
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
