//! Scripted stand-ins for the interactive collaborators.

use std::collections::VecDeque;

use cig_core::{CredentialHasher, Error, Prompter, Result};

/// One prompt shown to a [`ScriptedPrompter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRecord {
    pub prompt: String,
    pub secret: bool,
}

/// Answers prompts from a queue, in order, and records what was asked.
///
/// Running out of answers is a [`Error::Prompt`], so a test that asks more
/// questions than scripted fails loudly instead of hanging.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    /// Every prompt read, in order.
    pub prompts: Vec<PromptRecord>,
    /// Every message passed to `notify`, in order.
    pub notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }

    /// Answers not consumed yet.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    /// Whether any prompt contained `needle`.
    pub fn was_asked(&self, needle: &str) -> bool {
        self.prompts.iter().any(|p| p.prompt.contains(needle))
    }

    /// Whether any notice contained `needle`.
    pub fn was_notified(&self, needle: &str) -> bool {
        self.notices.iter().any(|n| n.contains(needle))
    }

    fn next(&mut self, prompt: &str, secret: bool) -> Result<String> {
        self.prompts.push(PromptRecord {
            prompt: prompt.to_string(),
            secret,
        });
        self.answers
            .pop_front()
            .ok_or_else(|| Error::prompt(format!("no scripted answer for '{}'", prompt)))
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt, false)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        self.next(prompt, true)
    }

    fn notify(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }
}

/// Produces `{email}:{hash}`, or nothing when built with [`FixedHasher::failing`].
#[derive(Debug, Clone)]
pub struct FixedHasher {
    hash: Option<String>,
}

impl FixedHasher {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: Some(hash.into()),
        }
    }

    pub fn failing() -> Self {
        Self { hash: None }
    }
}

impl CredentialHasher for FixedHasher {
    fn hash(&self, email: &str, _password: &str) -> Option<String> {
        self.hash.as_ref().map(|hash| format!("{}:{}", email, hash))
    }
}
