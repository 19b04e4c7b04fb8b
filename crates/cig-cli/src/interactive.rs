//! Terminal prompter
//!
//! Uses dialoguer when stdin is a terminal and plain line reads otherwise, so
//! answers can be piped in.

use std::io::{BufRead, IsTerminal, Write};

use cig_core::{Error, Prompter, Result};
use dialoguer::{Input, Password};

/// [`Prompter`] backed by the process's stdin and stdout.
pub struct TerminalPrompter {
    interactive: bool,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            interactive: std::io::stdin().is_terminal(),
        }
    }

    fn read_piped(&self, prompt: &str) -> Result<String> {
        let mut stdout = std::io::stdout().lock();
        write!(stdout, "{}", prompt)
            .and_then(|_| stdout.flush())
            .map_err(|e| Error::prompt(e.to_string()))?;

        let mut line = String::new();
        let read = std::io::stdin()
            .lock()
            .read_line(&mut line)
            .map_err(|e| Error::prompt(e.to_string()))?;
        if read == 0 {
            return Err(Error::prompt(format!("input closed before '{}' was answered", prompt.trim())));
        }
        writeln!(stdout).map_err(|e| Error::prompt(e.to_string()))?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

/// dialoguer renders its own `: ` after the prompt.
fn label(prompt: &str) -> &str {
    prompt.trim().trim_end_matches(':').trim_end()
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return self.read_piped(prompt);
        }
        Input::<String>::new()
            .with_prompt(label(prompt))
            .allow_empty(true)
            .interact_text()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        if !self.interactive {
            return self.read_piped(prompt);
        }
        Password::new()
            .with_prompt(label(prompt))
            .allow_empty_password(true)
            .interact()
            .map_err(|e| Error::prompt(e.to_string()))
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}
