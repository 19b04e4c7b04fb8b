//! Integration tests for marker block removal.

use cig_blocks::marker::{find_blocks, has_block, remove_block};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const DOCUMENT: &str = "\
#cloud-config
hostname: {{ CONTROLLER_HOSTNAME }}
# start ssh key block #
ssh_authorized_keys:
  - {{ PUBLIC_SSH_KEY }}
# end ssh key block #
users:
  - name: admin
";

#[test]
fn test_remove_ssh_key_block() {
    let result = remove_block(DOCUMENT, "ssh key");

    assert!(!result.contains("PUBLIC_SSH_KEY"));
    assert!(!result.contains("ssh_authorized_keys"));
    assert!(!has_block(&result, "ssh key"));
    assert_eq!(
        result,
        "#cloud-config\nhostname: {{ CONTROLLER_HOSTNAME }}\n\nusers:\n  - name: admin\n"
    );
}

#[test]
fn test_remove_missing_block_is_noop() {
    assert_eq!(remove_block(DOCUMENT, "init-users"), DOCUMENT);
}

#[test]
fn test_find_blocks_in_document() {
    let blocks = find_blocks(DOCUMENT);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].name, "ssh key");
    assert_eq!(blocks[0].start_line, 3);
    assert_eq!(blocks[0].end_line, 6);
}

fn body_line() -> impl Strategy<Value = String> {
    "[a-z_]{1,8}: [a-z0-9 ]{0,12}"
}

proptest! {
    #[test]
    fn test_removal_deletes_exactly_the_span(
        before in prop::collection::vec(body_line(), 0..5),
        inside in prop::collection::vec(body_line(), 0..5),
        after in prop::collection::vec(body_line(), 0..5),
        name in "[a-z][a-z -]{0,10}[a-z]",
    ) {
        let mut lines = before.clone();
        lines.push(format!("# start {} block #", name));
        lines.extend(inside.iter().cloned());
        lines.push(format!("# end {} block #", name));
        lines.extend(after.iter().cloned());
        let content = lines.join("\n");

        let result = remove_block(&content, &name);

        let mut expected = before.join("\n");
        if !before.is_empty() {
            expected.push('\n');
        }
        if !after.is_empty() {
            expected.push('\n');
            expected.push_str(&after.join("\n"));
        }
        prop_assert_eq!(result, expected);
    }

    #[test]
    fn test_unknown_block_name_is_noop(
        lines in prop::collection::vec(body_line(), 0..8),
        name in "[a-z]{1,10}",
    ) {
        let mut content = lines.join("\n");
        content.push_str("\n# start present block #\nx: 1\n# end present block #\n");
        prop_assume!(name != "present");

        prop_assert_eq!(remove_block(&content, &name), content.clone());
    }
}
