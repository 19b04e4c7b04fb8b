//! Re-indentation of flat connector templates.
//!
//! A small finite-state transducer walks the template line by line. Which
//! keys open a section, the level of the key line itself and the level of the
//! lines it governs all come from the [`IndentProfile`] rule table, so a new
//! connector schema needs a table entry rather than new control flow.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// `key:` followed by whitespace or end of line. `https://host` is not a key.
static KEY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z_][\w.-]*):(?:\s|$)").expect("Invalid key regex")
});

/// The mapping key of a trimmed line, if it has one.
pub(crate) fn line_key(line: &str) -> Option<&str> {
    KEY_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Whether a key line carries a value after its colon.
fn has_inline_value(line: &str) -> bool {
    KEY_REGEX
        .find(line)
        .is_some_and(|m| !line[m.end()..].trim().is_empty())
}

/// Structural context a rule puts the transducer in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Connector header (`type`, `id`, `name`).
    Top,
    /// The connector's `config` mapping.
    Config,
    /// A sequence value inside `config`; bare values become `- value`.
    List,
    /// A nested mapping inside `config`, closed by an exit key or a non-key line.
    Map,
}

/// One row of the transducer table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionRule {
    /// Key that enters the section.
    pub key: String,
    pub section: Section,
    /// Indent level of the key line itself.
    pub self_level: usize,
    /// Indent level of lines governed by the section.
    pub child_level: usize,
    /// Keys that close a [`Section::Map`] and belong to the enclosing config.
    pub exit_keys: Vec<String>,
}

impl SectionRule {
    pub fn new(key: impl Into<String>, section: Section, self_level: usize, child_level: usize) -> Self {
        Self {
            key: key.into(),
            section,
            self_level,
            child_level,
            exit_keys: Vec::new(),
        }
    }

    pub fn with_exit_keys(mut self, keys: &[&str]) -> Self {
        self.exit_keys = keys.iter().map(|k| k.to_string()).collect();
        self
    }
}

/// Rule table plus rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndentProfile {
    rules: Vec<SectionRule>,
    indent_unit: usize,
    item_header: Option<String>,
}

const LIST_KEYS: &[&str] = &["scopes", "groups"];
const CLAIM_MAPPING_KEY: &str = "claimMapping";
const CLAIM_MAPPING_EXITS: &[&str] = &["userIDKey", "userNameKey"];

impl IndentProfile {
    /// An empty table: every line is emitted at level 0.
    pub fn new(indent_unit: usize) -> Self {
        Self {
            rules: Vec::new(),
            indent_unit,
            item_header: None,
        }
    }

    /// Add a rule. A later rule for the same key replaces the earlier one.
    pub fn with_rule(mut self, rule: SectionRule) -> Self {
        self.rules.retain(|r| r.key != rule.key);
        self.rules.push(rule);
        self
    }

    /// Render lines with this key as `- key: value` list items.
    pub fn with_item_header(mut self, key: impl Into<String>) -> Self {
        self.item_header = Some(key.into());
        self
    }

    /// The connector as a plain mapping:
    ///
    /// ```text
    /// type: oidc
    /// config:
    ///   issuer: https://idp
    ///   scopes:
    ///     - openid
    /// ```
    pub fn passthrough() -> Self {
        Self::with_levels(0)
    }

    /// The connector as an item of a `connectors:` sequence:
    ///
    /// ```text
    /// - type: oidc
    ///   config:
    ///     issuer: https://idp
    ///     scopes:
    ///       - openid
    /// ```
    pub fn structured() -> Self {
        Self::with_levels(1).with_item_header("type")
    }

    /// Dex connector rules with every level below `type` shifted by `base`.
    fn with_levels(base: usize) -> Self {
        let mut profile = Self::new(2)
            .with_rule(SectionRule::new("type", Section::Top, 0, base))
            .with_rule(SectionRule::new("config", Section::Config, base, base + 1));
        for key in LIST_KEYS {
            profile = profile.with_rule(SectionRule::new(*key, Section::List, base + 1, base + 2));
        }
        profile.with_rule(
            SectionRule::new(CLAIM_MAPPING_KEY, Section::Map, base + 1, base + 2)
                .with_exit_keys(CLAIM_MAPPING_EXITS),
        )
    }

    pub fn rules(&self) -> &[SectionRule] {
        &self.rules
    }

    fn rule_index(&self, key: &str) -> Option<usize> {
        self.rules.iter().position(|r| r.key == key)
    }

    fn render(&self, level: usize, text: &str) -> String {
        format!("{}{}", " ".repeat(level * self.indent_unit), text)
    }
}

/// Which built-in profile a connector template is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    #[default]
    Passthrough,
    Structured,
}

impl Layout {
    pub fn profile(self) -> IndentProfile {
        match self {
            Self::Passthrough => IndentProfile::passthrough(),
            Self::Structured => IndentProfile::structured(),
        }
    }
}

struct Transducer<'a> {
    profile: &'a IndentProfile,
    current: Option<usize>,
    config: Option<usize>,
}

impl<'a> Transducer<'a> {
    fn new(profile: &'a IndentProfile) -> Self {
        Self {
            profile,
            current: None,
            config: None,
        }
    }

    fn current_rule(&self) -> Option<&'a SectionRule> {
        let profile = self.profile;
        self.current.map(|idx| &profile.rules[idx])
    }

    fn enter(&mut self, idx: usize) {
        if self.profile.rules[idx].section == Section::Config {
            self.config = Some(idx);
        }
        self.current = Some(idx);
    }

    /// Back to the enclosing config section.
    fn leave(&mut self) {
        self.current = self.config;
    }

    fn child_level(&self) -> usize {
        self.current_rule().map_or(0, |rule| rule.child_level)
    }

    /// Whether the rule at `idx` opens its section on this line. List and map
    /// headers carry no inline value; `groups: admins` is a plain key.
    fn opens(&self, idx: usize, line: &str) -> bool {
        match self.profile.rules[idx].section {
            Section::List | Section::Map => !has_inline_value(line),
            Section::Top | Section::Config => true,
        }
    }

    fn feed(&mut self, line: &str) -> String {
        let key = line_key(line);

        match self.current_rule() {
            Some(rule) if rule.section == Section::Map => {
                // Only exit keys and non-key lines close a map; any other key
                // is a child, even one that names a rule.
                let exits = key.is_none_or(|k| rule.exit_keys.iter().any(|e| e == k));
                if !exits {
                    return self.profile.render(rule.child_level, line);
                }
                self.leave();
            }
            Some(rule) if rule.section == Section::List => {
                if line.starts_with('-') {
                    return self.profile.render(rule.child_level, line);
                }
                if key.is_none() {
                    return self.profile.render(rule.child_level, &format!("- {}", line));
                }
                self.leave();
            }
            _ => {}
        }

        let opened = key
            .and_then(|k| self.profile.rule_index(k))
            .filter(|&idx| self.opens(idx, line));
        if let Some(idx) = opened {
            self.enter(idx);
            let rule = &self.profile.rules[idx];
            if self.profile.item_header.as_deref() == key {
                return self.profile.render(rule.self_level, &format!("- {}", line));
            }
            return self.profile.render(rule.self_level, line);
        }

        self.profile.render(self.child_level(), line)
    }
}

/// Re-indents a flat template. Blank lines are dropped, leading and trailing
/// whitespace of every line is discarded before the table is applied.
pub fn reindent(text: &str, profile: &IndentProfile) -> Vec<String> {
    let mut transducer = Transducer::new(profile);
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| transducer.feed(line))
        .collect()
}
