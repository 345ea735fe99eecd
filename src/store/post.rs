//! The post-location ledger - maps games to the messages that render them.
//!
//! Rows are appended exactly once per successful send and never updated;
//! recreating a dead message appends a fresh row alongside the old one.

use crate::{
    entities::{Game, Poll, Post, game, poll, post},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*};

/// Kinds of externally visible renderings of a game's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostType {
    /// A looking-for-group suggestion post with vote buttons
    Lfg,
    /// A transient list summary (never actually recorded)
    List,
    /// A scheduling poll post
    Poll,
}

impl PostType {
    /// Stored representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lfg => "lfg",
            Self::List => "list",
            Self::Poll => "poll",
        }
    }
}

/// Appends a ledger row for a freshly sent message.
pub async fn record(
    db: &DatabaseConnection,
    game_id: i64,
    message_id: &str,
    channel_id: &str,
    post_type: PostType,
) -> Result<post::Model> {
    let model = post::ActiveModel {
        game_id: Set(game_id),
        message_id: Set(message_id.to_string()),
        channel_id: Set(channel_id.to_string()),
        post_type: Set(post_type.as_str().to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Every recorded post of the given kind for a game, oldest first.
pub async fn for_game(
    db: &DatabaseConnection,
    game_id: i64,
    post_type: PostType,
) -> Result<Vec<post::Model>> {
    Post::find()
        .filter(post::Column::GameId.eq(game_id))
        .filter(post::Column::PostType.eq(post_type.as_str()))
        .order_by_asc(post::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Resolves an external message id to the game it renders.
///
/// Fails with `NotFound` when the message was never recorded - e.g. a click
/// relayed for a message this bot did not create.
pub async fn game_for_message(db: &DatabaseConnection, message_id: &str) -> Result<game::Model> {
    let post = Post::find()
        .filter(post::Column::MessageId.eq(message_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "post",
            key: message_id.to_string(),
        })?;

    Game::find_by_id(post.game_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "game",
            key: post.game_id.to_string(),
        })
}

/// Resolves an external message id to the poll its post renders.
///
/// Latest poll wins when a game has had several. Fails with `NotFound` when
/// the message was never recorded, or when the rendered game has no poll.
pub async fn poll_for_message(db: &DatabaseConnection, message_id: &str) -> Result<poll::Model> {
    let post = Post::find()
        .filter(post::Column::MessageId.eq(message_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "post",
            key: message_id.to_string(),
        })?;

    Poll::find()
        .filter(poll::Column::GameId.eq(post.game_id))
        .order_by_desc(poll::Column::Id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "poll",
            key: message_id.to_string(),
        })
}
