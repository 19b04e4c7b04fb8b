//! `{{ NAME }}` placeholder discovery and substitution.
//!
//! Discovery is lenient about interior whitespace (`{{NAME}}`, `{{  NAME }}`),
//! substitution is not: only the canonical `{{ NAME }}` form is replaced.

use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static PLACEHOLDER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*(\w+)\s*\}\}").expect("Invalid placeholder regex")
});

/// Builds the canonical token for a placeholder name.
///
/// ```
/// assert_eq!(cig_blocks::placeholder::token("SITE_ID"), "{{ SITE_ID }}");
/// ```
pub fn token(name: &str) -> String {
    format!("{{{{ {} }}}}", name)
}

/// Whether values for this placeholder should be read without echo.
pub fn is_secret(name: &str) -> bool {
    name.to_uppercase().contains("SECRET")
}

/// Lists placeholder names in order of first appearance, without duplicates.
///
/// # Example
/// ```
/// use cig_blocks::placeholder::extract;
///
/// let names = extract("id: {{ CLIENT_ID }}\nsecret: {{CLIENT_SECRET}}\nagain: {{ CLIENT_ID }}");
/// assert_eq!(names, vec!["CLIENT_ID", "CLIENT_SECRET"]);
/// ```
pub fn extract(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_REGEX
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .filter(|name| seen.insert(*name))
        .map(str::to_string)
        .collect()
}

/// Replaces every `{{ name }}` token for each entry of `replacements`.
///
/// Entries are applied in insertion order. Tokens without an entry are left
/// in place for later resolution.
pub fn substitute(text: &str, replacements: &Replacements) -> String {
    replacements
        .iter()
        .fold(text.to_string(), |acc, (name, value)| {
            acc.replace(&token(name), value)
        })
}

/// Insertion-ordered placeholder values.
///
/// Re-inserting an existing name overwrites the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    entries: Vec<(String, String)>,
}

impl Replacements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for `name`, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    /// Record `name` as deferred: its token substitutes to itself.
    pub fn defer(&mut self, name: &str) {
        self.insert(name, token(name));
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Drop the entry for `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut replacements = Self::new();
        for (name, value) in iter {
            replacements.insert(name, value);
        }
        replacements
    }
}
