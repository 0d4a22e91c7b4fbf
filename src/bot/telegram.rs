use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use teloxide::Bot;
use url::Url;

use super::{ApiResponse, Connect, WebhookApi, WebhookInfo};
use crate::config::ProviderConfig;
use crate::error::WebhookError;

/// Connects Telegram Bot API clients.
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramConnector;

impl Connect for TelegramConnector {
    type Client = TelegramClient;

    fn connect(&self, config: &ProviderConfig) -> Result<TelegramClient, WebhookError> {
        let token = config.access_token()?;
        let mut bot = Bot::new(token.to_owned());
        if let Some(api_url) = &config.api_url {
            bot = bot.set_api_url(api_url.clone());
        }
        Ok(TelegramClient { bot })
    }
}

/// Telegram Bot API client.
///
/// The teloxide `Bot` supplies the token, API base URL and HTTP client. Replies are
/// read as the raw `{ ok, result, description }` envelope so every field Telegram
/// sends is kept.
#[derive(Clone)]
pub struct TelegramClient {
    bot: Bot,
}

impl TelegramClient {
    #[must_use]
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn method_url(&self, method: &str) -> Result<Url, WebhookError> {
        let base: Url = self.bot.api_url().clone();
        // Never echo the token back in errors.
        base.join(&format!("/bot{}/{method}", self.bot.token()))
            .map_err(|source| WebhookError::InvalidUrl {
                url: format!("{base}bot<token>/{method}"),
                source,
            })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<ApiResponse<T>, WebhookError> {
        let url = self.method_url(method)?;
        tracing::debug!("calling Telegram {method}");

        let response = self
            .bot
            .client()
            .post(url)
            .json(&params)
            .send()
            .await
            .map_err(|err| WebhookError::from(err.without_url()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| WebhookError::from(err.without_url()))?;

        if !status.is_success() {
            return Err(WebhookError::Response {
                status: Some(status.as_u16()),
                body,
            });
        }

        match serde_json::from_str(&body) {
            Ok(reply) => Ok(reply),
            Err(err) => {
                tracing::debug!("Telegram {method} reply is not an envelope: {err}");
                Err(WebhookError::Response {
                    status: Some(status.as_u16()),
                    body,
                })
            }
        }
    }
}

#[async_trait]
impl WebhookApi for TelegramClient {
    async fn get_webhook_info(&self) -> Result<ApiResponse<WebhookInfo>, WebhookError> {
        self.call("getWebhookInfo", json!({})).await
    }

    async fn set_webhook(&self, url: &str) -> Result<ApiResponse<bool>, WebhookError> {
        self.call("setWebhook", json!({ "url": url })).await
    }

    async fn delete_webhook(&self) -> Result<ApiResponse<bool>, WebhookError> {
        self.call("deleteWebhook", json!({})).await
    }
}
