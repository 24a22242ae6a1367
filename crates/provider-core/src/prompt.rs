//! The validated user prompt.

use std::fmt;

use crate::error::PromptError;

/// A user's message text, trimmed and guaranteed non-empty.
///
/// Providers receive a `&Prompt` rather than a `&str` so that the
/// non-empty precondition is checked once, at the edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Prompt(String);

impl Prompt {
    /// Build a prompt from raw text.
    ///
    /// Surrounding whitespace is removed. Returns [`PromptError::Empty`]
    /// when nothing is left.
    pub fn new(text: impl AsRef<str>) -> Result<Self, PromptError> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            return Err(PromptError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    /// The prompt text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes) in the prompt.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for Prompt {
    type Error = PromptError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for Prompt {
    type Error = PromptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_trimmed() {
        let prompt = Prompt::new("  今天星期幾？ \n").unwrap();
        assert_eq!(prompt.as_str(), "今天星期幾？");
        assert_eq!(prompt.char_count(), 6);
    }

    #[test]
    fn test_blank_prompt_rejected() {
        assert_eq!(Prompt::new(""), Err(PromptError::Empty));
        assert_eq!(Prompt::new(" \t\n"), Err(PromptError::Empty));
    }

    #[test]
    fn test_try_from() {
        let prompt: Prompt = "hello".try_into().unwrap();
        assert_eq!(prompt.to_string(), "hello");
        assert!(Prompt::try_from(String::from("   ")).is_err());
    }
}
