use async_trait::async_trait;
use reqwest::header;
use serde_json::Value;
use std::time::Instant;

use crate::error::{RagError, Result};

/// The only network capability the clients need: POST a JSON body with a bearer token
/// and get JSON back. Tests swap in a fake returning canned bodies.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Non-2xx statuses come back as [`RagError::Upstream`].
    async fn post_json(&self, url: &str, bearer_token: &str, body: &Value) -> Result<Value>;
}

/// `reqwest`-backed transport. No client-side timeout beyond the library default, since
/// live-crawl searches can legitimately take a long time.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> ReqwestTransport {
        ReqwestTransport {
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn post_json(&self, url: &str, bearer_token: &str, body: &Value) -> Result<Value> {
        let started = Instant::now();
        tracing::debug!(%url, "POST");

        let res = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, format!("Bearer {bearer_token}"))
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = res.status();
        let text = res.text().await?;

        if !status.is_success() {
            tracing::error!(
                %url,
                status = status.as_u16(),
                latency_ms = started.elapsed().as_millis() as u64,
                "upstream returned non-success status"
            );
            return Err(RagError::Upstream {
                url: url.to_string(),
                status: status.as_u16(),
                body: text,
            });
        }

        tracing::debug!(
            %url,
            status = status.as_u16(),
            bytes = text.len(),
            latency_ms = started.elapsed().as_millis() as u64,
            "response received"
        );

        serde_json::from_str(&text).map_err(|e| RagError::Decode {
            url: url.to_string(),
            reason: format!("body is not JSON: {e}"),
        })
    }
}

/// Decodes a JSON value into one of the response models, tagging failures with the URL.
pub(crate) fn decode<T>(url: &str, value: Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|e| RagError::Decode {
        url: url.to_string(),
        reason: e.to_string(),
    })
}
