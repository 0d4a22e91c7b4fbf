use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use url::Url;

use crate::error::WebhookError;

pub const CONFIG_PATH_ENV: &str = "BOTTENDER_CONFIG";
pub const DEFAULT_CONFIG_PATH: &str = "bottender.toml";
pub const TELEGRAM_PROVIDER: &str = "telegram";

/// Credentials for one messaging provider, taken from `[<provider>]` of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderConfig {
    #[serde(default, alias = "accessToken")]
    pub access_token: String,
    /// Base URL of a self-hosted Bot API server.
    #[serde(default, alias = "apiUrl")]
    pub api_url: Option<Url>,
}

impl ProviderConfig {
    /// Returns the trimmed token, failing when it is absent or blank.
    pub fn access_token(&self) -> Result<&str, WebhookError> {
        let token = self.access_token.trim();
        if token.is_empty() {
            return Err(WebhookError::MissingAccessToken);
        }
        Ok(token)
    }
}

/// Where to read provider credentials from. Nothing is cached: every call to
/// [`ConfigSource::load`] reads the file again.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    path: PathBuf,
    provider: String,
}

impl ConfigSource {
    pub fn new(path: impl Into<PathBuf>, provider: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            provider: provider.into(),
        }
    }

    pub fn telegram(path: impl Into<PathBuf>) -> Self {
        Self::new(path, TELEGRAM_PROVIDER)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn load(&self) -> Result<ProviderConfig> {
        load_provider_config(&self.path, &self.provider)
    }
}

/// Picks the config file: explicit flag, then `BOTTENDER_CONFIG`, then `bottender.toml`.
pub fn resolve_config_path(explicit: Option<PathBuf>) -> PathBuf {
    resolve_config_path_with(explicit, |key| env::var_os(key))
}

fn resolve_config_path_with(
    explicit: Option<PathBuf>,
    lookup: impl Fn(&str) -> Option<OsString>,
) -> PathBuf {
    explicit
        .or_else(|| {
            lookup(CONFIG_PATH_ENV)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        })
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

pub fn load_provider_config(path: impl AsRef<Path>, provider: &str) -> Result<ProviderConfig> {
    let path_ref = path.as_ref();
    let raw = fs::read_to_string(path_ref)
        .with_context(|| format!("failed to read config file {}", path_ref.display()))?;
    parse_provider_config(&raw, provider)
        .with_context(|| format!("failed to parse config file {}", path_ref.display()))
}

fn parse_provider_config(raw: &str, provider: &str) -> Result<ProviderConfig> {
    let mut table: toml::Table = toml::from_str(raw)?;

    match table.remove(provider) {
        None => Ok(ProviderConfig::default()),
        Some(section @ toml::Value::Table(_)) => section
            .try_into::<ProviderConfig>()
            .with_context(|| format!("invalid [{provider}] section")),
        Some(other) => Err(anyhow!(
            "`{provider}` must be a table, got {}",
            other.type_str()
        )),
    }
}
