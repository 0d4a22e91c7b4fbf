use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::tunnel::DEFAULT_NGROK_API_URL;

/// Manage the webhook of a Telegram bot.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "telegram-webhook",
    version,
    after_help = "Subcommands:\n  get           Print the current webhook info\n  set           Register a webhook (-w <URL> or the running ngrok https tunnel)\n  delete, del   Remove the webhook"
)]
pub struct Cli {
    /// One of: get, set, delete (del)
    #[arg(value_name = "SUBCOMMAND")]
    pub subcommand: Option<String>,

    /// Webhook URL used by `set`
    #[arg(short = 'w', long = "webhook", value_name = "URL")]
    pub webhook: Option<String>,

    /// Config file [default: $BOTTENDER_CONFIG or bottender.toml]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Base URL of the ngrok agent API
    #[arg(long = "ngrok-api", value_name = "URL", default_value = DEFAULT_NGROK_API_URL)]
    pub ngrok_api: String,
}

#[must_use]
pub fn help_text() -> String {
    Cli::command().render_help().to_string()
}
