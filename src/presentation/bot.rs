//! Chat boundary turning commands into replies.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::commands::{BOT_NAME, CommandParser, GifrCommand};
use crate::application::dto::{ZapOutcome, ZapTarget};
use crate::application::use_cases::{CacheAdminUseCase, RandomizeUseCase};
use crate::domain::entities::SourceUrl;
use crate::domain::errors::PipelineError;

/// Answers gifr chat commands.
///
/// Every command yields a reply; pipeline and cache errors are rendered as
/// messages instead of being returned.
pub struct GifrBot {
    randomize: Arc<RandomizeUseCase>,
    admin: CacheAdminUseCase,
    parser: CommandParser,
}

impl GifrBot {
    /// Creates new bot.
    #[must_use]
    pub const fn new(
        randomize: Arc<RandomizeUseCase>,
        admin: CacheAdminUseCase,
        parser: CommandParser,
    ) -> Self {
        Self {
            randomize,
            admin,
            parser,
        }
    }

    /// Replies to a chat line, or returns `None` if it is not for gifr.
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let command = self.parser.parse(line)?;
        debug!(?command, "Handling chat command");
        Some(self.execute(command).await)
    }

    /// Runs a parsed command.
    pub async fn execute(&self, command: GifrCommand) -> String {
        match command {
            GifrCommand::Randomize(url) => self.randomize(url.as_deref()).await,
            GifrCommand::Gimme(count) => self.gimme(count.as_deref()).await,
            GifrCommand::Spew => self.spew().await,
            GifrCommand::Zap(target) => self.zap(target.as_deref()).await,
        }
    }

    /// Randomizes `url`, replying with the hosted link.
    pub async fn randomize(&self, url: Option<&str>) -> String {
        let Some(url) = url else {
            return format!("Usage: {} IMAGE_URL", self.invocation());
        };

        match self.randomize.execute(&SourceUrl::new(url)).await {
            Ok(response) => response.result_url,
            Err(e) => self.reply_for_error(&e),
        }
    }

    /// Replies with `count` random entries as JSON.
    pub async fn gimme(&self, count: Option<&str>) -> String {
        let Some(count) = count else {
            return format!("Usage: {} gimme N", self.invocation());
        };

        let sampled = match count.parse::<usize>() {
            Ok(n) => self.admin.sample(n).await,
            Err(_) => Err(PipelineError::invalid_argument(format!(
                "'{count}' is not a number of entries"
            ))),
        };

        match sampled {
            Ok(entries) => to_json(&entries),
            Err(e) => self.reply_for_error(&e),
        }
    }

    /// Replies with every entry as JSON.
    pub async fn spew(&self) -> String {
        match self.admin.list_all().await {
            Ok(entries) => to_json(&entries),
            Err(e) => self.reply_for_error(&e),
        }
    }

    /// Zaps one source, or the whole cache for `all`.
    pub async fn zap(&self, target: Option<&str>) -> String {
        let Some(target) = target else {
            return "Please specify a source url or 'all'".to_string();
        };

        match self.admin.zap(ZapTarget::parse(target)).await {
            Ok(ZapOutcome::Cleared) => "The cache is now empty".to_string(),
            Ok(ZapOutcome::Removed(entry)) => {
                format!("{} has been zapped from the cache", entry.source)
            }
            Err(e) => self.reply_for_error(&e),
        }
    }

    fn invocation(&self) -> String {
        format!("{}{BOT_NAME}", self.parser.prefix())
    }

    /// Renders an error as a chat reply.
    #[must_use]
    pub fn reply_for_error(&self, error: &PipelineError) -> String {
        if !error.is_rejection() {
            warn!(error = %error, "Command failed");
        }

        match error {
            PipelineError::Fetch { message } => format!("Couldn't fetch that image: {message}"),
            PipelineError::NotAnImage { message } => {
                format!("That doesn't appear to be an image: {message}")
            }
            PipelineError::NotAnimated => "Sorry, that doesn't appear to be animated".to_string(),
            PipelineError::Transform { message } => {
                format!("Couldn't randomize that image: {message}")
            }
            PipelineError::Upload { body, .. } => {
                format!("There was a problem uploading to imgur: {body}")
            }
            PipelineError::InsufficientEntries {
                requested,
                available,
            } => format!("Can't sample {requested} entries, the cache only has {available}"),
            PipelineError::NotFound { .. } => "URL isn't in the cache".to_string(),
            PipelineError::Storage { message } => format!("Couldn't update the cache: {message}"),
            PipelineError::InvalidArgument { message } => {
                format!("{message}. Usage: {} gimme N", self.invocation())
            }
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("Couldn't encode the cache: {e}"))
}
