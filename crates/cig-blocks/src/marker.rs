//! Optional sections delimited by named comment markers.
//!
//! ```text
//! # start NAME block #
//! ...
//! # end NAME block #
//! ```
//!
//! Markers are matched literally. A start marker without a later end marker
//! does not delimit a block.

use regex::Regex;
use std::sync::LazyLock;

/// A marker-delimited block found in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    /// The block name between `# start ` and ` block #`.
    pub name: String,
    /// The text between the markers, without the surrounding newlines.
    pub content: String,
    /// The 1-based line number of the start marker.
    pub start_line: usize,
    /// The 1-based line number of the end marker.
    pub end_line: usize,
}

static OPEN_MARKER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"# start ([^\n#]+?) block #").expect("Invalid open marker regex")
});

fn opening_marker(name: &str) -> String {
    format!("# start {} block #", name)
}

fn closing_marker(name: &str) -> String {
    format!("# end {} block #", name)
}

/// Parses every well-formed marker block, in order of appearance.
///
/// # Example
/// ```
/// use cig_blocks::marker::find_blocks;
///
/// let content = "a: 1\n# start sso block #\nb: 2\n# end sso block #\n";
/// let blocks = find_blocks(content);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].name, "sso");
/// assert_eq!(blocks[0].content, "b: 2");
/// ```
pub fn find_blocks(content: &str) -> Vec<MarkerBlock> {
    let mut blocks = Vec::new();

    for caps in OPEN_MARKER_REGEX.captures_iter(content) {
        let (Some(open_match), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let name = name.as_str();
        let open_end = open_match.end();
        let close_marker = closing_marker(name);

        if let Some(close_pos) = content[open_end..].find(&close_marker) {
            let close_start = open_end + close_pos;
            let close_end = close_start + close_marker.len();

            let raw_content = &content[open_end..close_start];
            let inner = raw_content.strip_prefix('\n').unwrap_or(raw_content);
            let inner = inner.strip_suffix('\n').unwrap_or(inner);

            blocks.push(MarkerBlock {
                name: name.to_string(),
                content: inner.to_string(),
                start_line: content[..open_match.start()].lines().count() + 1,
                end_line: content[..close_end].lines().count(),
            });
        }
    }

    blocks
}

/// Checks whether a well-formed block named `name` exists.
pub fn has_block(content: &str, name: &str) -> bool {
    let open = opening_marker(name);
    let close = closing_marker(name);
    content
        .find(&open)
        .is_some_and(|start| content[start + open.len()..].contains(&close))
}

/// Removes every block named `name`, markers included.
///
/// Each removal spans from a start marker to the nearest following end
/// marker. Text around the markers on the same lines is kept, so removing a
/// block that occupies whole lines leaves one empty line behind; [`finalize`]
/// drops it later. When no block matches, the content is returned unchanged.
///
/// [`finalize`]: crate::cleanup::finalize
///
/// # Example
/// ```
/// use cig_blocks::marker::remove_block;
///
/// let content = "before\n# start ssh key block #\nkey: x\n# end ssh key block #\nafter";
/// assert_eq!(remove_block(content, "ssh key"), "before\n\nafter");
/// assert_eq!(remove_block(content, "sso"), content);
/// ```
pub fn remove_block(content: &str, name: &str) -> String {
    let open = opening_marker(name);
    let close = closing_marker(name);

    let mut result = String::with_capacity(content.len());
    let mut rest = content;
    let mut removed = 0usize;

    while let Some(start) = rest.find(&open) {
        let after_open = start + open.len();
        let Some(close_pos) = rest[after_open..].find(&close) else {
            break;
        };
        result.push_str(&rest[..start]);
        rest = &rest[after_open + close_pos + close.len()..];
        removed += 1;
    }
    result.push_str(rest);

    if removed == 0 {
        tracing::debug!(block = name, "no marker block to remove");
    } else {
        tracing::debug!(block = name, count = removed, "removed marker block");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_find_blocks_empty() {
        assert!(find_blocks("no markers here").is_empty());
    }

    #[test]
    fn test_find_block_line_numbers() {
        let content = "a: 1\n# start sso block #\nb: 2\nc: 3\n# end sso block #\nd: 4";
        let blocks = find_blocks(content);
        assert_eq!(
            blocks,
            vec![MarkerBlock {
                name: "sso".into(),
                content: "b: 2\nc: 3".into(),
                start_line: 2,
                end_line: 5,
            }]
        );
    }

    #[test]
    fn test_find_blocks_with_spaces_in_name() {
        let content = "# start root password block #\nx\n# end root password block #";
        let blocks = find_blocks(content);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].name, "root password");
    }

    #[test]
    fn test_unterminated_block_is_ignored() {
        let content = "# start sso block #\nb: 2\n";
        assert!(find_blocks(content).is_empty());
        assert!(!has_block(content, "sso"));
        assert_eq!(remove_block(content, "sso"), content);
    }

    #[test]
    fn test_remove_only_named_block() {
        let content = "\
# start sso block #
sso: 1
# end sso block #
# start should-join block #
join: 1
# end should-join block #
";
        let result = remove_block(content, "sso");
        assert_eq!(
            result,
            "\n# start should-join block #\njoin: 1\n# end should-join block #\n"
        );
    }

    #[test]
    fn test_remove_every_occurrence() {
        let content = "# start x block #\n1\n# end x block #\nkeep\n# start x block #\n2\n# end x block #";
        assert_eq!(remove_block(content, "x"), "\nkeep\n");
    }

    #[test]
    fn test_name_is_literal() {
        let content = "# start a.b block #\n1\n# end a.b block #";
        assert_eq!(remove_block(content, "a.b"), "");
        assert_eq!(remove_block(content, "a?b"), content);
    }
}
