//! Re-indentation and splicing working together on connector templates.

use cig_blocks::placeholder::{Replacements, extract, substitute};
use cig_sso::{DEX_SSO_PATH, IndentProfile, Layout, Splice, reindent, splice};
use pretty_assertions::assert_eq;

fn indent_of(line: &str) -> usize {
    (line.len() - line.trim_start().len()) / 2
}

#[test]
fn test_structured_scopes_levels() {
    let template = "type: oidc\nconfig:\nscopes:\n- openid\n- email\n";
    let lines = reindent(template, &IndentProfile::structured());

    let find = |needle: &str| {
        lines
            .iter()
            .find(|l| l.trim_start().trim_start_matches("- ").starts_with(needle))
            .unwrap_or_else(|| panic!("no line for {}", needle))
    };

    assert_eq!(indent_of(find("type:")), 0);
    assert_eq!(indent_of(find("config:")), 1);
    assert_eq!(indent_of(find("scopes:")), 2);

    let items: Vec<_> = lines.iter().filter(|l| indent_of(l) == 3).collect();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|l| l.trim_start().starts_with("- ")));
}

#[test]
fn test_layout_selects_profile() {
    assert_eq!(Layout::Passthrough.profile(), IndentProfile::passthrough());
    assert_eq!(Layout::Structured.profile(), IndentProfile::structured());
}

#[test]
fn test_splice_replaces_remainder_to_eof() {
    let prefix = "\
#cloud-config
write_files:
- path: /etc/controller/site.yaml
  content: |
    site: 1
";
    let document = format!(
        "{}- path: /etc/dex/sso.yaml\n  content: |\n    {{{{ DEX_SSO_CONFIG }}}}\n  permissions: '0600'\n  owner: root:root",
        prefix
    );
    let fragment = vec!["type: github".to_string(), "config:".to_string()];

    let Splice::Replaced(result) = splice(&document, DEX_SSO_PATH, &fragment) else {
        panic!("anchor should be found");
    };

    let expected = format!(
        "{}- path: /etc/dex/sso.yaml\n  content: |\n    type: github\n    config:",
        prefix
    );
    assert_eq!(result, expected);
    assert!(!result.contains("permissions"));
    assert!(!result.contains("owner"));
}

#[test]
fn test_fill_reindent_splice() {
    let template = "\
type: github
id: github
name: GitHub
config:
clientID: {{ CLIENT_ID }}
clientSecret: {{ CLIENT_SECRET }}
redirectURI: https://ctrl.example.com/dex/callback
";
    let names = extract(template);
    assert_eq!(names, vec!["CLIENT_ID", "CLIENT_SECRET"]);

    let values: Replacements = names.into_iter().zip(["abc", "xyz"]).collect();
    let lines = reindent(&substitute(template, &values), &IndentProfile::passthrough());

    let document = "write_files:\n- path: /etc/dex/sso.yaml\n  content: |\n    {{ DEX_SSO_CONFIG }}\n";
    let Splice::Replaced(result) = splice(document, DEX_SSO_PATH, &lines) else {
        panic!("anchor should be found");
    };

    assert!(result.contains("\n      clientID: abc\n"));
    assert!(result.contains("\n      clientSecret: xyz\n"));
    assert!(result.contains("\n    config:\n"));
    assert!(!result.contains("{{ DEX_SSO_CONFIG }}"));
}
