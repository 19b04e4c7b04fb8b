//! User input seam and the validation loop around it.

use uuid::Uuid;

use crate::Result;

/// Shown when a required answer is left empty.
pub const REQUIRED_MESSAGE: &str = "This field is required.";
/// Shown when an answer fails its validator.
pub const INVALID_MESSAGE: &str = "Invalid input. Please try again.";

/// Source of raw answers.
///
/// Implementations only read; emptiness, defaults and validation are
/// handled by [`ask`].
pub trait Prompter {
    /// Read one line of visible input.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Read one line without echoing it.
    fn read_secret(&mut self, prompt: &str) -> Result<String>;

    /// Show a message to the user.
    fn notify(&mut self, message: &str);
}

impl<P: Prompter + ?Sized> Prompter for &mut P {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        (**self).read_line(prompt)
    }

    fn read_secret(&mut self, prompt: &str) -> Result<String> {
        (**self).read_secret(prompt)
    }

    fn notify(&mut self, message: &str) {
        (**self).notify(message)
    }
}

type Validator<'a> = Box<dyn Fn(&str) -> bool + 'a>;

/// A single prompt and the rules for accepting its answer.
pub struct Question<'a> {
    prompt: String,
    required: bool,
    secret: bool,
    auto_generate: bool,
    default: Option<String>,
    validator: Option<Validator<'a>>,
}

impl<'a> Question<'a> {
    /// A required, visible question.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            required: true,
            secret: false,
            auto_generate: false,
            default: None,
            validator: None,
        }
    }

    /// An empty answer is accepted as an empty value.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Read without echo.
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    /// An empty answer yields a random UUID v4.
    pub fn auto_generate(mut self) -> Self {
        self.auto_generate = true;
        self
    }

    /// An empty answer yields `value`.
    pub fn default(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Non-empty answers must satisfy `validator`.
    pub fn validate(mut self, validator: impl Fn(&str) -> bool + 'a) -> Self {
        self.validator = Some(Box::new(validator));
        self
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Ask until an acceptable answer is given.
///
/// Visible answers are trimmed; secret answers are returned as typed.
/// Empty answers fall back, in order, to a generated UUID, the default, an
/// empty optional value, or a re-prompt.
pub fn ask<P: Prompter + ?Sized>(prompter: &mut P, question: &Question<'_>) -> Result<String> {
    loop {
        let raw = if question.secret {
            prompter.read_secret(&question.prompt)?
        } else {
            prompter.read_line(&question.prompt)?
        };
        let value = if question.secret { raw.as_str() } else { raw.trim() };

        if value.trim().is_empty() {
            if question.auto_generate {
                return Ok(Uuid::new_v4().to_string());
            }
            if let Some(default) = &question.default {
                return Ok(default.clone());
            }
            if !question.required {
                return Ok(String::new());
            }
            prompter.notify(REQUIRED_MESSAGE);
            continue;
        }

        if let Some(validator) = &question.validator {
            if !validator(value) {
                tracing::debug!(prompt = %question.prompt, "answer rejected by validator");
                prompter.notify(INVALID_MESSAGE);
                continue;
            }
        }

        return Ok(value.to_string());
    }
}

/// Ask a y/n question. Only `y` (any case) counts as yes.
pub fn confirm<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> Result<bool> {
    let answer = ask(prompter, &Question::new(prompt))?;
    Ok(answer.eq_ignore_ascii_case("y"))
}

/// Show a numbered menu and return the 1-based choice.
pub fn choose<P: Prompter + ?Sized>(
    prompter: &mut P,
    heading: &str,
    items: &[String],
    prompt: &str,
) -> Result<usize> {
    prompter.notify(heading);
    for (index, item) in items.iter().enumerate() {
        prompter.notify(&format!("{}. {}", index + 1, item));
    }

    let question = Question::new(prompt).validate(in_range(1, items.len()));
    let answer = ask(prompter, &question)?;
    answer
        .parse()
        .map_err(|_| crate::Error::prompt(format!("'{}' is not a menu choice", answer)))
}

/// Accepts a canonical UUID whose version is 4.
pub fn is_uuid_v4(value: &str) -> bool {
    Uuid::parse_str(value).is_ok_and(|uuid| uuid.get_version_num() == 4)
}

/// Accepts decimal numbers within `min..=max`.
pub fn in_range(min: usize, max: usize) -> impl Fn(&str) -> bool {
    move |value| {
        !value.is_empty()
            && value.chars().all(|c| c.is_ascii_digit())
            && value.parse::<usize>().is_ok_and(|n| (min..=max).contains(&n))
    }
}
