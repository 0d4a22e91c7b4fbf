use std::io;

use crate::bot::telegram::TelegramConnector;
use crate::cli::Cli;
use crate::config::{ConfigSource, resolve_config_path};
use crate::tunnel::NgrokInspector;
use crate::webhook::{Outcome, WebhookManager};

pub async fn run(cli: Cli) -> Outcome {
    init_tracing();

    let config = ConfigSource::telegram(resolve_config_path(cli.config));
    let tunnels = NgrokInspector::new(cli.ngrok_api);
    let manager = WebhookManager::new(config, TelegramConnector, tunnels);

    manager
        .dispatch(
            cli.subcommand.as_deref(),
            cli.webhook.as_deref(),
            &mut io::stdout(),
            &mut io::stderr(),
        )
        .await
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .without_time()
        .init();
}
