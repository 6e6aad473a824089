//! Chat command parsing.

/// Name the bot answers to.
pub const BOT_NAME: &str = "gifr";

/// A chat line addressed to the bot.
///
/// Arguments are kept raw; validation happens when the command runs so that
/// a missing argument can be answered with a usage hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GifrCommand {
    /// Randomize the image at the given URL.
    Randomize(Option<String>),
    /// Sample N cached entries.
    Gimme(Option<String>),
    /// List every cached entry.
    Spew,
    /// Remove one cached entry, or `all`.
    Zap(Option<String>),
}

/// Recognizes `<prefix>gifr ...` lines.
///
/// Both `!gifr zap URL` and the underscore form `!gifr_zap URL` are accepted.
#[derive(Debug, Clone)]
pub struct CommandParser {
    prefix: String,
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new("!")
    }
}

impl CommandParser {
    /// Creates a parser for lines starting with `prefix`.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// Returns the command prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Parses a chat line, returning `None` when it is not addressed to gifr.
    #[must_use]
    pub fn parse(&self, line: &str) -> Option<GifrCommand> {
        let body = line.trim_start().strip_prefix(self.prefix.as_str())?;
        let mut words = body.split_whitespace();
        let head = words.next()?;

        let subcommand = if head == BOT_NAME {
            match words.clone().next() {
                Some(word @ ("gimme" | "spew" | "zap")) => {
                    words.next();
                    Some(word)
                }
                _ => None,
            }
        } else {
            Some(head.strip_prefix(BOT_NAME)?.strip_prefix('_')?)
        };

        let argument = words.next().map(str::to_string);

        match subcommand {
            None => Some(GifrCommand::Randomize(argument)),
            Some("gimme") => Some(GifrCommand::Gimme(argument)),
            Some("spew") => Some(GifrCommand::Spew),
            Some("zap") => Some(GifrCommand::Zap(argument)),
            Some(_) => None,
        }
    }
}
