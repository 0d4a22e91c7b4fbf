use std::io::Write;
use std::process::ExitCode;

use url::Url;

use crate::bot::{Connect, WebhookApi};
use crate::cli::help_text;
use crate::config::ConfigSource;
use crate::error::WebhookError;
use crate::tunnel::{TunnelInspector, select_webhook_url};
use render::{render_info_lines, write_failure};

mod render;

const UNKNOWN_SUBCOMMAND: &str = "Please specify a valid subcommand: get, set, delete";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Get,
    Set,
    Delete,
}

impl Action {
    #[must_use]
    pub fn parse(subcommand: &str) -> Option<Self> {
        match subcommand {
            "get" => Some(Self::Get),
            "set" => Some(Self::Set),
            "delete" | "del" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub fn verb(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Set => "set",
            Self::Delete => "delete",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Usage and help were printed instead of running anything.
    Usage,
    Failure,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Success | Outcome::Usage => ExitCode::SUCCESS,
            Outcome::Failure => ExitCode::FAILURE,
        }
    }
}

/// Reads, registers and removes the bot webhook.
///
/// Credentials are loaded again for every operation, and no client is connected
/// until the access token has been validated.
pub struct WebhookManager<C, T> {
    config: ConfigSource,
    connector: C,
    tunnels: T,
}

impl<C, T> WebhookManager<C, T>
where
    C: Connect,
    T: TunnelInspector,
{
    pub fn new(config: ConfigSource, connector: C, tunnels: T) -> Self {
        Self {
            config,
            connector,
            tunnels,
        }
    }

    /// Routes a raw subcommand. Unknown or missing subcommands print usage and
    /// touch no API.
    pub async fn dispatch(
        &self,
        subcommand: Option<&str>,
        webhook: Option<&str>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Outcome {
        let Some(action) = subcommand.and_then(Action::parse) else {
            let _ = writeln!(err, "{UNKNOWN_SUBCOMMAND}");
            let _ = write!(out, "{}", help_text());
            return Outcome::Usage;
        };

        self.run(action, webhook, out, err).await
    }

    /// Runs one action and reports its failure, if any, on `err`.
    pub async fn run(
        &self,
        action: Action,
        webhook: Option<&str>,
        out: &mut dyn Write,
        err: &mut dyn Write,
    ) -> Outcome {
        let result = match action {
            Action::Get => self.get(out).await,
            Action::Set => self.set(webhook, out).await,
            Action::Delete => self.delete(out).await,
        };

        match result {
            Ok(()) => Outcome::Success,
            Err(error) => {
                tracing::debug!("webhook {} failed: {error:?}", action.verb());
                write_failure(err, action, &error);
                Outcome::Failure
            }
        }
    }

    pub async fn get(&self, out: &mut dyn Write) -> Result<(), WebhookError> {
        let client = self.connect()?;
        let info = client
            .get_webhook_info()
            .await?
            .require_ok("Getting Telegram webhook is failed")?
            .ok_or(WebhookError::MissingResult("getWebhookInfo"))?;

        for line in render_info_lines(&info) {
            writeln!(out, "{line}")?;
        }
        Ok(())
    }

    pub async fn set(&self, webhook: Option<&str>, out: &mut dyn Write) -> Result<(), WebhookError> {
        let client = self.connect()?;
        let webhook = self.resolve_webhook(webhook).await?;
        if let Err(source) = Url::parse(&webhook) {
            return Err(WebhookError::InvalidUrl {
                url: webhook,
                source,
            });
        }

        tracing::info!("setting webhook to {webhook}");
        client
            .set_webhook(&webhook)
            .await?
            .require_ok("Setting for webhook is failed")?;

        writeln!(out, "Successfully set Telegram webhook callback URL")?;
        Ok(())
    }

    pub async fn delete(&self, out: &mut dyn Write) -> Result<(), WebhookError> {
        let client = self.connect()?;
        client
            .delete_webhook()
            .await?
            .require_ok("Deleting Telegram webhook is failed")?;

        writeln!(out, "Successfully deleted Telegram webhook")?;
        Ok(())
    }

    fn connect(&self) -> Result<C::Client, WebhookError> {
        tracing::debug!(
            "loading [{}] from {}",
            self.config.provider(),
            self.config.path().display()
        );
        let config = self.config.load().map_err(WebhookError::Config)?;
        config.access_token()?;
        self.connector.connect(&config)
    }

    async fn resolve_webhook(&self, explicit: Option<&str>) -> Result<String, WebhookError> {
        if let Some(url) = explicit.map(str::trim).filter(|url| !url.is_empty()) {
            return Ok(url.to_owned());
        }

        tracing::debug!("no webhook given, asking ngrok for the https tunnel");
        let tunnels = self.tunnels.list_tunnels().await?;
        select_webhook_url(&tunnels)
            .map(str::to_owned)
            .ok_or(WebhookError::MissingWebhook)
    }
}
