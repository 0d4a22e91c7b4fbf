use async_trait::async_trait;
use serde::Deserialize;
use url::Url;

use crate::error::WebhookError;

pub const DEFAULT_NGROK_API_URL: &str = "http://localhost:4040";
const TUNNELS_PATH: &str = "/api/tunnels";

/// ngrok lists the `http` tunnel first and the `https` one second.
pub const HTTPS_TUNNEL_INDEX: usize = 1;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Tunnel {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub proto: Option<String>,
    #[serde(default)]
    pub public_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TunnelList {
    #[serde(default)]
    tunnels: Vec<Tunnel>,
}

/// Reports the public URLs currently proxied to this machine.
#[async_trait]
pub trait TunnelInspector {
    async fn list_tunnels(&self) -> Result<Vec<Tunnel>, WebhookError>;
}

/// Public URL of the HTTPS tunnel, if the inspector reported one.
#[must_use]
pub fn select_webhook_url(tunnels: &[Tunnel]) -> Option<&str> {
    tunnels
        .get(HTTPS_TUNNEL_INDEX)?
        .public_url
        .as_deref()
        .filter(|url| !url.trim().is_empty())
}

/// Client for the local ngrok agent API.
///
/// The base URL is only parsed when tunnels are listed, so commands that never
/// ask ngrok are unaffected by a bad value.
#[derive(Debug, Clone)]
pub struct NgrokInspector {
    client: reqwest::Client,
    base_url: String,
}

impl NgrokInspector {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn tunnels_url(&self) -> Result<Url, WebhookError> {
        Url::parse(&self.base_url)
            .and_then(|base| base.join(TUNNELS_PATH))
            .map_err(|source| WebhookError::InvalidUrl {
                url: self.base_url.clone(),
                source,
            })
    }
}

#[async_trait]
impl TunnelInspector for NgrokInspector {
    async fn list_tunnels(&self) -> Result<Vec<Tunnel>, WebhookError> {
        let url = self.tunnels_url()?;
        tracing::debug!("querying ngrok tunnels at {url}");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WebhookError::Response {
                status: Some(status.as_u16()),
                body,
            });
        }

        let list: TunnelList = match serde_json::from_str(&body) {
            Ok(list) => list,
            Err(err) => {
                tracing::debug!("ngrok reply is not a tunnel list: {err}");
                return Err(WebhookError::Response {
                    status: Some(status.as_u16()),
                    body,
                });
            }
        };
        tracing::debug!("ngrok reported {} tunnel(s)", list.tunnels.len());
        Ok(list.tunnels)
    }
}
