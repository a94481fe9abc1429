//! ntfy publish client
//!
//! Messages are posted as one JSON body per notification to the server's
//! base URL, with the topic carried inside the body. Only the response
//! status is consumed; bodies are never read.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::{AppError, AppResult};

/// A single ntfy publish payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NtfyMessage {
    pub topic: String,
    pub message: String,
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
    pub click: Option<String>,
    pub attach: Option<String>,
    pub actions: Option<Vec<NtfyAction>>,
}

/// An ntfy action button attached to a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NtfyAction {
    pub action: String,
    pub label: String,
    pub url: Option<String>,
    pub clear: Option<bool>,
}

/// Notification priority, either a numeric level or a named one.
///
/// Named levels map onto the 1-5 scale the server expects. The lookup is
/// exact; a name it does not know, case variants included, is omitted
/// from the payload entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Priority {
    Level(u8),
    Named(String),
}

impl Priority {
    /// Resolve to a numeric level, if one applies.
    pub fn as_level(&self) -> Option<u8> {
        match self {
            Priority::Level(level) => Some(*level),
            Priority::Named(name) => match name.as_str() {
                "urgent" => Some(5),
                "high" => Some(4),
                "default" => Some(3),
                "low" => Some(2),
                "min" => Some(1),
                _ => None,
            },
        }
    }
}

/// Async client for publishing to an ntfy server.
#[derive(Debug)]
pub struct NtfyClient {
    client: reqwest::Client,
    server_url: Url,
}

impl NtfyClient {
    /// Create a client for the given server base URL.
    ///
    /// No request timeout is applied unless `timeout_secs` is given; a
    /// stalled server stalls the caller.
    pub fn new(server_url: &str, timeout_secs: Option<u64>) -> AppResult<Self> {
        let url = Url::parse(server_url)
            .map_err(|source| AppError::invalid_server_url(server_url, source))?;

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|source| AppError::HttpClient { source })?;

        Ok(NtfyClient {
            client,
            server_url: url,
        })
    }

    /// Publish one message. Fire-and-forget from the caller's point of
    /// view: no retries, the response body is ignored, and any status
    /// other than 200 counts as a failure.
    pub async fn publish(&self, message: &NtfyMessage) -> AppResult<()> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = self.build_message_body(message);
        let response = self
            .client
            .post(self.server_url.clone())
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        if response.status() != StatusCode::OK {
            return Err(AppError::notification_failed(response.status()));
        }

        Ok(())
    }

    fn build_message_body(&self, message: &NtfyMessage) -> serde_json::Value {
        let mut body = serde_json::json!({
            "topic": message.topic,
            "message": message.message,
        });

        if let Some(title) = &message.title {
            body["title"] = serde_json::json!(title);
        }

        if let Some(priority) = &message.priority {
            if let Some(level) = priority.as_level() {
                body["priority"] = serde_json::json!(level);
            }
        }

        if let Some(tags) = &message.tags {
            body["tags"] = serde_json::json!(tags);
        }

        if let Some(click) = &message.click {
            body["click"] = serde_json::json!(click);
        }

        if let Some(attach) = &message.attach {
            body["attach"] = serde_json::json!(attach);
        }

        if let Some(actions) = &message.actions {
            body["actions"] = serde_json::json!(actions);
        }

        body
    }
}
