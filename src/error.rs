use std::io;

use thiserror::Error;

/// Everything that can end a webhook invocation.
#[derive(Debug, Error)]
pub enum WebhookError {
    #[error("{0:#}")]
    Config(anyhow::Error),

    #[error("`access_token` is not found in config file")]
    MissingAccessToken,

    #[error(
        "`webhook` is required but not found. Use -w <webhook> to setup or make sure you are running ngrok server."
    )]
    MissingWebhook,

    #[error("invalid url `{url}`: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The Bot API answered with `ok: false`.
    #[error("{message}")]
    ApiFailure {
        message: &'static str,
        description: Option<String>,
    },

    #[error("`{0}` reported success without a result")]
    MissingResult(&'static str),

    /// The request never produced a usable reply.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    /// A reply arrived but could not be accepted.
    #[error("unexpected response{}", .status.map(|code| format!(" (status {code})")).unwrap_or_default())]
    Response { status: Option<u16>, body: String },

    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

impl WebhookError {
    /// HTTP status attached to the failure, if the server sent one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } | Self::Response { status, .. } => *status,
            _ => None,
        }
    }

    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Response { body, .. } if !body.is_empty() => Some(body),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for WebhookError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport {
            status: err.status().map(|status| status.as_u16()),
            message: err.to_string(),
        }
    }
}
