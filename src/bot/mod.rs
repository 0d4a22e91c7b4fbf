use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::config::ProviderConfig;
use crate::error::WebhookError;

pub mod telegram;

/// Fields of a `getWebhookInfo` result.
pub type WebhookInfo = Map<String, Value>;

/// The Bot API reply envelope: `{ ok, result?, description? }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

impl<T> ApiResponse<T> {
    #[must_use]
    pub fn success(result: T) -> Self {
        Self {
            ok: true,
            result: Some(result),
            description: None,
        }
    }

    #[must_use]
    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            ok: false,
            result: None,
            description: Some(description.into()),
        }
    }

    /// Turns an `ok: false` reply into [`WebhookError::ApiFailure`].
    pub fn require_ok(self, message: &'static str) -> Result<Option<T>, WebhookError> {
        if self.ok {
            return Ok(self.result);
        }
        Err(WebhookError::ApiFailure {
            message,
            description: self.description,
        })
    }
}

/// Webhook methods of a bot platform API.
#[async_trait]
pub trait WebhookApi {
    async fn get_webhook_info(&self) -> Result<ApiResponse<WebhookInfo>, WebhookError>;

    /// `url` is sent exactly as given.
    async fn set_webhook(&self, url: &str) -> Result<ApiResponse<bool>, WebhookError>;

    async fn delete_webhook(&self) -> Result<ApiResponse<bool>, WebhookError>;
}

/// Builds an API client from provider credentials.
///
/// Called only after the access token has been validated.
pub trait Connect {
    type Client: WebhookApi;

    fn connect(&self, config: &ProviderConfig) -> Result<Self::Client, WebhookError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_ok_returns_result_on_success() {
        let response = ApiResponse::success(7_u8);
        let result = response.require_ok("unused").expect("ok response");
        assert_eq!(result, Some(7));
    }

    #[test]
    fn require_ok_carries_description_on_failure() {
        let response: ApiResponse<()> = ApiResponse::failure("Unauthorized");
        let err = response
            .require_ok("Deleting Telegram webhook is failed")
            .expect_err("failure must be rejected");

        match err {
            WebhookError::ApiFailure {
                message,
                description,
            } => {
                assert_eq!(message, "Deleting Telegram webhook is failed");
                assert_eq!(description.as_deref(), Some("Unauthorized"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn envelope_keeps_result_fields_verbatim() {
        let raw = r#"{"ok":true,"result":{"url":"","pending_update_count":0,"custom_field":"x"}}"#;
        let response: ApiResponse<WebhookInfo> = serde_json::from_str(raw).expect("envelope");

        let info = response.require_ok("unused").expect("ok").expect("result");
        assert_eq!(info.get("url"), Some(&Value::String(String::new())));
        assert_eq!(info.get("custom_field"), Some(&Value::String("x".to_string())));
    }

    #[test]
    fn envelope_without_result_or_description() {
        let response: ApiResponse<bool> =
            serde_json::from_str(r#"{"ok":false}"#).expect("envelope");
        assert!(!response.ok);
        assert!(response.result.is_none());
        assert!(response.description.is_none());
    }

    #[test]
    fn require_ok_without_description() {
        let response: ApiResponse<()> = ApiResponse {
            ok: false,
            result: None,
            description: None,
        };
        let err = response.require_ok("failed").expect_err("must fail");
        assert_eq!(err.to_string(), "failed");
    }
}
