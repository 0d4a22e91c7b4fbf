use std::process::ExitCode;

use clap::Parser;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = telegram_webhook::Cli::parse();
    telegram_webhook::run(cli).await.into()
}
