//! Test utilities for in-memory integration tests.

use crate::config::database::create_tables;
use crate::entities::{game, player, poll};
use crate::errors::{Error, Result};
use crate::resolver::{IdentityResolver, ResolvedMedia};
use crate::store;
use crate::transport::{MessageRef, MessageTransport, SendTarget};
use crate::wire::payload::MessagePayload;
use async_trait::async_trait;
use sea_orm::{Database, DatabaseConnection};
use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Creates an in-memory SQLite database with all tables created.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await?;
    create_tables(&db).await?;
    Ok(db)
}

/// A database pre-seeded with one game, one registered player and one poll
/// that player opened for the game.
pub async fn setup_with_poll()
-> Result<(DatabaseConnection, game::Model, player::Model, poll::Model)> {
    let db = setup_test_db().await?;
    let game = store::game::get_or_create(
        &db,
        "Factorio",
        "https://store.steampowered.com/app/427520/Factorio/",
        Some("https://img.example/factorio.jpg"),
        Some("u1"),
    )
    .await?;
    let creator = store::player::get_or_create(&db, "u1", "Alice").await?;
    let poll = store::poll::create(&db, game.id, creator.id, Some("Weekend run")).await?;
    Ok((db, game, creator, poll))
}

/// In-memory transport double recording every send, edit and delete.
#[derive(Debug, Default)]
pub struct MockTransport {
    counter: AtomicU64,
    quota_exhausted: Mutex<HashSet<String>>,
    broken: Mutex<HashSet<String>>,
    sent: Mutex<Vec<(SendTarget, MessagePayload)>>,
    edited: Mutex<Vec<(MessageRef, MessagePayload)>>,
    deleted: Mutex<Vec<MessageRef>>,
}

#[allow(clippy::unwrap_used)]
impl MockTransport {
    /// Makes every edit of `message_id` fail with the quota error.
    pub fn exhaust_quota(&self, message_id: &str) {
        self.quota_exhausted
            .lock()
            .unwrap()
            .insert(message_id.to_string());
    }

    /// Makes every edit of `message_id` fail with a generic transport error.
    pub fn break_message(&self, message_id: &str) {
        self.broken.lock().unwrap().insert(message_id.to_string());
    }

    /// Every send so far, in order.
    pub fn sent(&self) -> Vec<(SendTarget, MessagePayload)> {
        self.sent.lock().unwrap().clone()
    }

    /// Every edit so far, in order.
    pub fn edits(&self) -> Vec<(MessageRef, MessagePayload)> {
        self.edited.lock().unwrap().clone()
    }

    /// Message ids edited so far, in order.
    pub fn edited_ids(&self) -> Vec<String> {
        self.edited
            .lock()
            .unwrap()
            .iter()
            .map(|(message, _)| message.message_id.clone())
            .collect()
    }

    /// Message ids deleted so far, in order.
    pub fn deleted_ids(&self) -> Vec<String> {
        self.deleted
            .lock()
            .unwrap()
            .iter()
            .map(|message| message.message_id.clone())
            .collect()
    }
}

#[allow(clippy::unwrap_used)]
#[async_trait]
impl MessageTransport for MockTransport {
    async fn send(&self, target: &SendTarget, payload: &MessagePayload) -> Result<MessageRef> {
        let n = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        let channel_id = match target {
            SendTarget::Followup { .. } => "c-main".to_string(),
            SendTarget::Channel { channel_id } => channel_id.clone(),
        };
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), payload.clone()));
        Ok(MessageRef {
            message_id: format!("mock-{n}"),
            channel_id,
        })
    }

    async fn edit(&self, message: &MessageRef, payload: &MessagePayload) -> Result<()> {
        if self
            .quota_exhausted
            .lock()
            .unwrap()
            .contains(&message.message_id)
        {
            return Err(Error::EditQuotaExceeded {
                message_id: message.message_id.clone(),
            });
        }
        if self.broken.lock().unwrap().contains(&message.message_id) {
            return Err(Error::Transport {
                message: "mock edit failure".to_string(),
            });
        }
        self.edited
            .lock()
            .unwrap()
            .push((message.clone(), payload.clone()));
        Ok(())
    }

    async fn delete(&self, message: &MessageRef) -> Result<()> {
        self.deleted.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Resolver double returning a fixed result for every url.
#[derive(Debug, Default)]
pub struct StubResolver {
    /// What every lookup resolves to
    pub media: ResolvedMedia,
}

#[async_trait]
impl IdentityResolver for StubResolver {
    async fn resolve(&self, _url: &str) -> Result<ResolvedMedia> {
        Ok(self.media.clone())
    }
}
