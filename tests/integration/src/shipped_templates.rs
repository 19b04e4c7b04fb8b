//! Generation runs over the document and connector templates shipped in
//! `templates/`, checked by parsing the output as YAML.

use cig_blocks::extract;
use cig_core::Generator;
use cig_fs::{NormalizedPath, io};
use cig_sso::{ConnectorRegistry, ConnectorSpec, DEX_SSO_PATH, Layout};
use cig_test_utils::{FixedHasher, ScriptedPrompter};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_yaml::Value;

fn templates_root() -> NormalizedPath {
    NormalizedPath::new(env!("CARGO_MANIFEST_DIR")).join("../../templates")
}

fn shipped_document() -> String {
    io::read_text(&templates_root().join("cloud-init.yaml")).expect("shipped document")
}

fn shipped_registry() -> ConnectorRegistry {
    ConnectorRegistry::with_builtins(templates_root().join("dex"))
}

/// All features declined except SSO, with `choice` picked from the menu and
/// every connector placeholder answered with a value derived from its name.
fn sso_run(registry: &ConnectorRegistry, choice: usize) -> String {
    let slug = registry.slug_for_choice(choice).expect("menu choice");
    let spec = registry.get(slug).expect("registered connector");
    let template = io::read_text(&registry.template_path(spec)).expect("connector template");

    let mut answers: Vec<String> = ["ctrl.example.com", "", "", "n", "n", "y"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    answers.push(choice.to_string());
    answers.extend(extract(&template).iter().map(|name| format!("v-{}", name.to_lowercase())));
    answers.extend(["n".to_string(), "n".to_string()]);

    let mut prompter = ScriptedPrompter::new(answers);
    let output = Generator::new(registry, &mut prompter, FixedHasher::failing())
        .run(&shipped_document())
        .expect("generation succeeds");
    assert_eq!(prompter.remaining(), 0);
    output
}

fn write_file<'a>(document: &'a Value, path: &str) -> Option<&'a Value> {
    document["write_files"]
        .as_sequence()?
        .iter()
        .find(|entry| entry["path"].as_str() == Some(path))
}

fn sso_content(output: &str) -> Value {
    let document: Value = serde_yaml::from_str(output).expect("output is valid YAML");
    let entry = write_file(&document, DEX_SSO_PATH).expect("sso entry");
    let keys: Vec<_> = entry
        .as_mapping()
        .expect("entry is a mapping")
        .keys()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(keys, vec!["path", "content"]);
    let content = entry["content"].as_str().expect("content is a block scalar");
    serde_yaml::from_str(content).expect("connector is valid YAML")
}

#[test]
fn test_declined_document_is_valid_yaml() {
    let registry = shipped_registry();
    let mut prompter = ScriptedPrompter::new(["ctrl.example.com", "", "", "n", "n", "n", "n", "n"]);

    let output = Generator::new(&registry, &mut prompter, FixedHasher::failing())
        .run(&shipped_document())
        .unwrap();

    assert!(output.starts_with("#cloud-config\n"));
    assert!(extract(&output).is_empty());
    let document: Value = serde_yaml::from_str(&output).unwrap();
    assert_eq!(document["hostname"].as_str(), Some("ctrl.example.com"));
    assert!(document.get("chpasswd").is_none());
    assert!(write_file(&document, DEX_SSO_PATH).is_none());
    assert!(write_file(&document, "/etc/controller/controller.env").is_some());
}

#[test]
fn test_features_enabled_is_valid_yaml() {
    let registry = shipped_registry();
    let mut answers = vec!["ctrl.example.com", "", "", "y", "ssh-ed25519 AAAA admin", "n", "y", "8"];
    answers.extend(["y", "admin@example.com", "pw", "y", "ctrl-0.example.com"]);
    let mut prompter = ScriptedPrompter::new(answers);

    let output = Generator::new(&registry, &mut prompter, FixedHasher::new("$2y$10$hash"))
        .run(&shipped_document())
        .unwrap();

    assert_eq!(extract(&output), vec!["DEX_SSO_CONFIG".to_string()]);
    let document: Value = serde_yaml::from_str(&output).unwrap();
    assert!(document.get("chpasswd").is_none());
    let admin = &document["users"][0];
    assert_eq!(admin["ssh_authorized_keys"][0].as_str(), Some("ssh-ed25519 AAAA admin"));

    let credentials = write_file(&document, "/etc/controller/init-users").unwrap();
    assert_eq!(
        credentials["content"].as_str(),
        Some("admin@example.com:$2y$10$hash\n")
    );
    let cluster = write_file(&document, "/etc/controller/cluster.env").unwrap();
    assert_eq!(
        cluster["content"].as_str(),
        Some("CLUSTER_ENTRYPOINT=\"https://ctrl-0.example.com\"\n")
    );
}

#[rstest]
#[case(1, "github")]
#[case(2, "gitlab")]
#[case(3, "microsoft")]
#[case(4, "google")]
#[case(5, "oidc")]
#[case(6, "oidc")]
#[case(7, "saml")]
fn test_shipped_connector_passthrough(#[case] choice: usize, #[case] connector_type: &str) {
    let output = sso_run(&shipped_registry(), choice);

    let connector = sso_content(&output);
    assert_eq!(connector["type"].as_str(), Some(connector_type));
    assert!(connector["config"].is_mapping());
    assert!(connector["config"]["redirectURI"].as_str().is_some());
    assert!(!output.contains("DEX_SSO_CONFIG"));
}

#[rstest]
#[case(5, "pingid")]
#[case(6, "oidc")]
fn test_shipped_oidc_scopes_and_claims(#[case] choice: usize, #[case] id: &str) {
    let output = sso_run(&shipped_registry(), choice);

    let connector = sso_content(&output);
    assert_eq!(connector["id"].as_str(), Some(id));
    let config = &connector["config"];
    let scopes: Vec<_> = config["scopes"]
        .as_sequence()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert!(scopes.starts_with(&["openid", "profile", "email"]));
    assert!(config["claimMapping"].is_mapping());
    assert_eq!(config["userIDKey"].as_str(), Some("sub"));
    assert!(config["claimMapping"].get("userIDKey").is_none());
}

#[test]
fn test_shipped_pingid_groups_claim_stays_in_mapping() {
    let output = sso_run(&shipped_registry(), 5);

    let config = &sso_content(&output)["config"];
    assert_eq!(config["claimMapping"]["groups"].as_str(), Some("groups"));
    assert!(config["groups"].is_null());
}

#[test]
fn test_shipped_gitlab_group_becomes_list_item() {
    let output = sso_run(&shipped_registry(), 2);

    let connector = sso_content(&output);
    assert_eq!(connector["config"]["groups"][0].as_str(), Some("v-gitlab_group"));
    assert_eq!(connector["config"]["useLoginAsID"].as_bool(), Some(false));
}

#[test]
fn test_shipped_connector_structured_layout() {
    let mut registry = shipped_registry();
    registry.register(
        ConnectorSpec::new("oidc", "Generic OIDC", "oidc_connector.yaml")
            .with_layout(Layout::Structured),
    );

    let output = sso_run(&registry, 6);

    let connectors = sso_content(&output);
    let connector = &connectors[0];
    assert_eq!(connector["type"].as_str(), Some("oidc"));
    assert_eq!(connector["config"]["issuer"].as_str(), Some("v-oidc_issuer"));
    assert_eq!(connector["config"]["scopes"][0].as_str(), Some("openid"));
}

#[test]
fn test_manual_choice_keeps_anchor_placeholder() {
    let registry = shipped_registry();
    let mut prompter =
        ScriptedPrompter::new(["ctrl.example.com", "", "", "n", "n", "y", "8", "n", "n"]);

    let output = Generator::new(&registry, &mut prompter, FixedHasher::failing())
        .run(&shipped_document())
        .unwrap();

    assert!(output.contains("    content: |\n      {{ DEX_SSO_CONFIG }}\n"));
    assert!(prompter.was_notified("manual SSO insertion"));
}
