//! Human-readable and JSON reporting
//!
//! Data goes to stdout; status lines and errors go to stderr, except the
//! success line which belongs to the command's normal output.

use serde::Serialize;

use bsc_core::Error;

use super::OutputConfig;

/// Characters of an access key left visible in error output
const VISIBLE_KEY_CHARS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Status {
    Success,
    Failure,
}

impl Status {
    fn symbol(self) -> &'static str {
        match self {
            Status::Success => "✓",
            Status::Failure => "✗",
        }
    }

    /// ANSI color code
    fn color(self) -> u8 {
        match self {
            Status::Success => 32,
            Status::Failure => 31,
        }
    }
}

/// Reports command results according to the output flags
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> OutputConfig {
        self.config
    }

    pub fn is_json(&self) -> bool {
        self.config.json
    }

    fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Success line; silent in quiet and JSON modes
    pub fn success(&self, message: &str) {
        if !self.config.quiet && !self.config.json {
            println!("{}", render(Status::Success, message, self.colors_enabled()));
        }
    }

    /// Error message; printed in every mode
    pub fn error(&self, message: &str) {
        if self.config.json {
            self.json_to_stderr(&serde_json::json!({ "error": message }));
        } else {
            eprintln!("{}", render(Status::Failure, message, self.colors_enabled()));
        }
    }

    /// Report a library error with secrets masked
    pub fn failure(&self, error: &Error) {
        self.error(&describe(error));
    }

    /// Pretty JSON on stdout
    pub fn json<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    fn json_to_stderr<T: Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => eprintln!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Plain data line; silent in quiet mode
    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }
}

fn render(status: Status, message: &str, colors: bool) -> String {
    if colors {
        format!("\x1b[{}m{}\x1b[0m {message}", status.color(), status.symbol())
    } else {
        format!("{} {message}", status.symbol())
    }
}

/// User-facing text of an error
///
/// The authentication message carries the access key; only its last few
/// characters are shown.
fn describe(error: &Error) -> String {
    match error {
        Error::Authentication { zone, access_key } => format!(
            "Authentication failed for storage zone '{zone}' with access key '{}'.",
            mask_key(access_key)
        ),
        other => other.to_string(),
    }
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= VISIBLE_KEY_CHARS * 2 {
        return "*".repeat(chars.len().max(VISIBLE_KEY_CHARS));
    }
    let tail: String = chars[chars.len() - VISIBLE_KEY_CHARS..].iter().collect();
    format!("{}{tail}", "*".repeat(chars.len() - VISIBLE_KEY_CHARS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain_and_colored() {
        assert_eq!(render(Status::Success, "done", false), "✓ done");
        assert_eq!(render(Status::Failure, "boom", false), "✗ boom");
        assert_eq!(
            render(Status::Failure, "boom", true),
            "\x1b[31m✗\x1b[0m boom"
        );
    }

    #[test]
    fn test_colors_follow_flags() {
        assert!(Formatter::default().colors_enabled());

        let json = Formatter::new(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(json.is_json());
        assert!(!json.colors_enabled());

        let no_color = Formatter::new(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert!(!no_color.colors_enabled());
    }

    #[test]
    fn test_describe_masks_access_key() {
        let key = "7a1f2c9e-51b0-4d3e-a8f2-0c6d9e4b1234";
        let error = Error::Authentication {
            zone: "images".to_string(),
            access_key: key.to_string(),
        };

        let text = describe(&error);
        assert!(!text.contains(key));
        assert!(!text.contains("7a1f2c9e"));
        assert!(text.contains("images"));
        assert!(text.ends_with("1234'."));

        // The library message itself is left untouched
        assert!(error.to_string().contains(key));
    }

    #[test]
    fn test_describe_other_errors_unchanged() {
        let error = Error::ObjectNotFound {
            path: "zone/a.txt".to_string(),
        };
        assert_eq!(describe(&error), error.to_string());
    }

    #[test]
    fn test_mask_short_keys_fully() {
        assert_eq!(mask_key("abc"), "****");
        assert_eq!(mask_key("abcdefgh"), "********");
        assert_eq!(mask_key("abcdefghij"), "******ghij");
    }
}
