//! Slack Web API client for `chat.postMessage`

use crate::error::{Error, Result};
use crate::traits::ChatTransport;
use crate::types::{MessageId, NotifyConfig};
use reqwest::header::RETRY_AFTER;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::future::Future;

/// Request body for `chat.postMessage`
#[derive(Debug, Serialize)]
struct PostMessageRequest<'a> {
    channel: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    thread_ts: Option<&'a str>,
}

/// Slack answers HTTP 200 with `ok: false` for API-level failures
#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    channel: Option<String>,
    #[serde(default)]
    ts: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl PostMessageResponse {
    fn into_message_id(self) -> Result<MessageId> {
        if !self.ok {
            return Err(Error::Slack(
                self.error.unwrap_or_else(|| "unknown_error".to_string()),
            ));
        }
        self.ts
            .map(MessageId)
            .ok_or_else(|| Error::Slack("response carried no message ts".to_string()))
    }
}

/// Slack Web API client
pub struct SlackClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish_non_exhaustive()
    }
}

impl SlackClient {
    /// Create a new Slack client
    pub fn new(base_url: String, token: Option<String>) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!("deploynotify/", env!("CARGO_PKG_VERSION")))
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self::with_http_client(client, base_url, token)
    }

    /// Create around an already configured reqwest client
    pub fn with_http_client(
        client: reqwest::Client,
        base_url: String,
        token: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    /// Create from notifier configuration
    pub fn from_config(config: &NotifyConfig<'_>) -> Self {
        Self::new(
            config.slack_api_url.to_string(),
            config.slack_token.as_ref().map(|t| t.to_string()),
        )
    }

    async fn post_message(&self, request: PostMessageRequest<'_>) -> Result<MessageId> {
        let token = self
            .token
            .as_deref()
            .ok_or_else(|| Error::Config("SLACK_ACCESS_TOKEN not set".to_string()))?;

        let url = format!("{}/chat.postMessage", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("unknown");
            return Err(Error::RateLimitExceeded(format!(
                "chat.postMessage, retry after {}s",
                retry_after
            )));
        }
        if !status.is_success() {
            return Err(Error::Http(format!("Slack API returned {}", status)));
        }

        let body: PostMessageResponse = response.json().await?;
        let channel = body.channel.clone().unwrap_or_default();
        let id = body.into_message_id()?;
        tracing::info!(
            channel = %channel,
            ts = %id,
            sent_at = ?id.sent_at(),
            threaded = request.thread_ts.is_some(),
            "message sent to Slack"
        );
        Ok(id)
    }
}

impl ChatTransport for SlackClient {
    fn post<'a>(
        &'a self,
        channel: &'a str,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a {
        self.post_message(PostMessageRequest {
            channel,
            text,
            thread_ts: None,
        })
    }

    fn reply<'a>(
        &'a self,
        channel: &'a str,
        thread: &'a MessageId,
        text: &'a str,
    ) -> impl Future<Output = Result<MessageId>> + Send + 'a {
        self.post_message(PostMessageRequest {
            channel,
            text,
            thread_ts: Some(thread.as_str()),
        })
    }
}
