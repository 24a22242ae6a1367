//! Chat command parsing.

/// Tokens that request the help text. Matched case-insensitively.
pub const HELP_TOKENS: &[&str] = &["/help", "help", "幫助"];

/// Leading tokens that request an image.
pub const IMAGE_TOKENS: &[&str] = &["/image", "/img", "畫圖"];

/// A recognized command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show the help text.
    Help,
    /// Generate an image. `None` when no description followed the command.
    Image(Option<String>),
}

impl Command {
    /// Parse `text` as a command.
    ///
    /// Returns `None` for ordinary chat text, which goes to the providers.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        if HELP_TOKENS.iter().any(|token| text.eq_ignore_ascii_case(token)) {
            return Some(Command::Help);
        }

        let (head, rest) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (text, ""),
        };

        if IMAGE_TOKENS.iter().any(|token| head.eq_ignore_ascii_case(token)) {
            let description = (!rest.is_empty()).then(|| rest.to_string());
            return Some(Command::Image(description));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_tokens() {
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("  HELP "), Some(Command::Help));
        assert_eq!(Command::parse("幫助"), Some(Command::Help));
        assert_eq!(Command::parse("help me with math"), None);
    }

    #[test]
    fn test_image_with_description() {
        assert_eq!(
            Command::parse("/image 一隻在海邊的貓"),
            Some(Command::Image(Some("一隻在海邊的貓".to_string())))
        );
        assert_eq!(
            Command::parse("畫圖   sunset over Taipei 101 "),
            Some(Command::Image(Some("sunset over Taipei 101".to_string())))
        );
        assert_eq!(
            Command::parse("/IMG cat"),
            Some(Command::Image(Some("cat".to_string())))
        );
    }

    #[test]
    fn test_image_without_description() {
        assert_eq!(Command::parse("/image"), Some(Command::Image(None)));
        assert_eq!(Command::parse("/img   "), Some(Command::Image(None)));
    }

    #[test]
    fn test_plain_text_is_not_a_command() {
        assert_eq!(Command::parse("今天星期幾？"), None);
        assert_eq!(Command::parse("/imagine a cat"), None);
        assert_eq!(Command::parse("I like /image tags"), None);
    }
}
