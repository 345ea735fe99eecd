//! Outbound message transport.
//!
//! The sync and router layers speak to the platform only through the
//! [`MessageTransport`] trait; [`HttpTransport`] is the real REST client.
//! The one error the callers care about distinguishing is the exhausted
//! edit quota, which is mapped to its own variant so the synchronizer can
//! run the delete-and-recreate recovery.

use crate::errors::{Error, Result};
use crate::wire::payload::MessagePayload;
use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

const API_BASE: &str = "https://discord.com/api/v10";

/// Platform error code for an exhausted message edit quota.
const CODE_EDIT_QUOTA_EXHAUSTED: u32 = 30_046;

/// Durable coordinates of a published message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageRef {
    /// Message id
    pub message_id: String,
    /// Channel the message lives in
    pub channel_id: String,
}

/// Where a new message goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SendTarget {
    /// Fill in the deferred original response of an interaction
    Followup {
        /// Interaction token
        token: String,
    },
    /// Post a fresh message into a channel
    Channel {
        /// Channel id
        channel_id: String,
    },
}

/// Sends, edits and deletes platform messages.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Publishes a message and returns its durable coordinates.
    async fn send(&self, target: &SendTarget, payload: &MessagePayload) -> Result<MessageRef>;

    /// Replaces an existing message's body in place.
    async fn edit(&self, message: &MessageRef, payload: &MessagePayload) -> Result<()>;

    /// Deletes a message.
    async fn delete(&self, message: &MessageRef) -> Result<()>;
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: Option<u32>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageCreated {
    id: String,
    channel_id: String,
}

/// REST client for the platform messaging API.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
    app_id: String,
    bot_token: String,
}

impl HttpTransport {
    /// Creates a transport bound to one application and bot token.
    #[must_use]
    pub fn new(client: reqwest::Client, app_id: String, bot_token: String) -> Self {
        Self {
            client,
            app_id,
            bot_token,
        }
    }

    fn auth_header(&self) -> String {
        format!("Bot {}", self.bot_token)
    }

    /// Maps a non-success response to the error taxonomy, recognizing the
    /// edit-quota code.
    async fn check(response: reqwest::Response, message_id: &str) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body: ApiError = response.json().await.unwrap_or(ApiError {
            code: None,
            message: None,
        });
        if body.code == Some(CODE_EDIT_QUOTA_EXHAUSTED) {
            return Err(Error::EditQuotaExceeded {
                message_id: message_id.to_string(),
            });
        }
        Err(Error::Transport {
            message: format!(
                "{status}: {}",
                body.message.unwrap_or_else(|| "no error body".to_string())
            ),
        })
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn send(&self, target: &SendTarget, payload: &MessagePayload) -> Result<MessageRef> {
        let request = match target {
            SendTarget::Followup { token } => {
                // Editing @original turns the deferred ack into the message.
                let url = format!(
                    "{API_BASE}/webhooks/{}/{token}/messages/@original",
                    self.app_id
                );
                self.client.patch(url)
            }
            SendTarget::Channel { channel_id } => {
                let url = format!("{API_BASE}/channels/{channel_id}/messages");
                self.client
                    .post(url)
                    .header("Authorization", self.auth_header())
            }
        };

        let response = request.json(payload).send().await?;
        let response = Self::check(response, "").await?;
        let created: MessageCreated = response.json().await?;
        debug!(message_id = %created.id, channel_id = %created.channel_id, "message published");
        Ok(MessageRef {
            message_id: created.id,
            channel_id: created.channel_id,
        })
    }

    async fn edit(&self, message: &MessageRef, payload: &MessagePayload) -> Result<()> {
        let url = format!(
            "{API_BASE}/channels/{}/messages/{}",
            message.channel_id, message.message_id
        );
        let response = self
            .client
            .patch(url)
            .header("Authorization", self.auth_header())
            .json(payload)
            .send()
            .await?;
        Self::check(response, &message.message_id).await?;
        Ok(())
    }

    async fn delete(&self, message: &MessageRef) -> Result<()> {
        let url = format!(
            "{API_BASE}/channels/{}/messages/{}",
            message.channel_id, message.message_id
        );
        let response = self
            .client
            .delete(url)
            .header("Authorization", self.auth_header())
            .send()
            .await?;
        Self::check(response, &message.message_id).await?;
        Ok(())
    }
}
