//! Splicing a formatted fragment into a `write_files` entry.

/// `write_files` path of the Dex connector configuration.
pub const DEX_SSO_PATH: &str = "/etc/dex/sso.yaml";

/// Result of [`splice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Splice {
    /// The document with the anchor entry rewritten.
    Replaced(String),
    /// No `- path:` line for the anchor exists; nothing was changed.
    AnchorMissing,
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Index one past the last line of the entry starting at `start`.
///
/// The entry ends before the first content line indented less than its keys:
/// the next sibling item or a top-level key. Trailing blank and comment lines
/// are left to whatever follows, so closing block markers survive.
fn entry_end(lines: &[&str], start: usize, key_column: usize) -> usize {
    let mut end = lines[start + 1..]
        .iter()
        .position(|line| !is_blank_or_comment(line) && leading_whitespace(line).len() < key_column)
        .map_or(lines.len(), |offset| start + 1 + offset);

    while end > start + 1 && is_blank_or_comment(lines[end - 1]) {
        end -= 1;
    }
    end
}

/// The value of a `- path:` line with quotes and any trailing comment removed.
fn path_value(line: &str) -> Option<&str> {
    let rest = line.trim().strip_prefix("- path:")?;
    let value = rest.find(" #").map_or(rest, |idx| &rest[..idx]).trim();
    Some(value.trim_matches(|c| c == '\'' || c == '"'))
}

/// Replaces the `content` of the `- path: {anchor_path}` entry with `fragment`.
///
/// The whole entry is replaced: the header is rewritten as `- path:` plus
/// `content: |` at the anchor's own indentation and fragment lines follow
/// four columns deeper. Other keys of the entry (`permissions`, `owner`, ...)
/// do not survive.
///
/// # Example
/// ```
/// use cig_sso::splice::{Splice, splice};
///
/// let document = "write_files:\n- path: /etc/dex/sso.yaml\n  content: |\n    {{ DEX_SSO_CONFIG }}\n";
/// let fragment = vec!["type: github".to_string(), "config:".to_string(), "  clientID: abc".to_string()];
///
/// let Splice::Replaced(result) = splice(document, "/etc/dex/sso.yaml", &fragment) else {
///     panic!("anchor should be found");
/// };
/// assert_eq!(
///     result,
///     "write_files:\n- path: /etc/dex/sso.yaml\n  content: |\n    type: github\n    config:\n      clientID: abc\n"
/// );
/// ```
pub fn splice(document: &str, anchor_path: &str, fragment: &[String]) -> Splice {
    let lines: Vec<&str> = document.split('\n').collect();
    let header = format!("- path: {}", anchor_path);

    let Some(start) = lines
        .iter()
        .position(|line| path_value(line) == Some(anchor_path))
    else {
        tracing::debug!(anchor = anchor_path, "splice anchor not found");
        return Splice::AnchorMissing;
    };

    let indent = leading_whitespace(lines[start]);
    let key_column = indent.len() + 2;
    let end = entry_end(&lines, start, key_column);

    let mut output: Vec<String> = lines[..start].iter().map(|l| l.to_string()).collect();
    output.push(format!("{}{}", indent, header));
    output.push(format!("{}  content: |", indent));
    output.extend(fragment.iter().map(|line| format!("{}    {}", indent, line)));
    output.extend(lines[end..].iter().map(|l| l.to_string()));

    tracing::debug!(
        anchor = anchor_path,
        replaced = end - start,
        inserted = fragment.len(),
        "spliced fragment"
    );
    Splice::Replaced(output.join("\n"))
}
