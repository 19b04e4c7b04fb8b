//! Final output cleanup.

/// The only comment line kept in generated output.
pub const CLOUD_CONFIG_HEADER: &str = "#cloud-config";

/// Drops comment-only lines, keeping a line that is exactly the header.
pub fn remove_comments(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with('#') || trimmed == CLOUD_CONFIG_HEADER
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Drops lines that are empty after trimming.
pub fn remove_empty_lines(content: &str) -> String {
    content
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comment stripping followed by blank-line stripping.
pub fn finalize(content: &str) -> String {
    remove_empty_lines(&remove_comments(content))
}
