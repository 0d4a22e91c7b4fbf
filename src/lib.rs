pub mod app;
pub mod bot;
pub mod cli;
pub mod config;
pub mod error;
pub mod tunnel;
pub mod webhook;

pub use app::run;
pub use cli::Cli;
pub use config::{ConfigSource, ProviderConfig};
pub use error::WebhookError;
pub use webhook::{Action, Outcome, WebhookManager};
