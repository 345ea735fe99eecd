//! Post synchronizer - fans a rebuilt payload out to every recorded post.
//!
//! Each target is handled independently so one dead message never blocks
//! the rest. An edit refused for an exhausted edit quota triggers the
//! recovery path: delete the old message, send a fresh copy to the same
//! channel, and append the new coordinates to the ledger. Old rows are
//! never removed, so later passes will report them as failed and skip on.

use crate::errors::{Error, Result};
use crate::store::post::{self, PostType};
use crate::transport::{MessageRef, MessageTransport, SendTarget};
use crate::wire::payload::MessagePayload;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// What happened to one recorded post during a sync pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Edited in place
    Edited,
    /// Edit quota was exhausted; the post was recreated at new coordinates
    Recreated(MessageRef),
    /// The edit failed for any other reason and was skipped
    Failed,
}

/// Pushes `payload` to every recorded post of the given kind for a game.
///
/// Returns one outcome per ledger row, oldest first.
pub async fn sync_game_posts(
    db: &DatabaseConnection,
    transport: &dyn MessageTransport,
    game_id: i64,
    post_type: PostType,
    payload: &MessagePayload,
) -> Result<Vec<SyncOutcome>> {
    let posts = post::for_game(db, game_id, post_type).await?;
    let mut outcomes = Vec::with_capacity(posts.len());

    for recorded in posts {
        let message = MessageRef {
            message_id: recorded.message_id.clone(),
            channel_id: recorded.channel_id.clone(),
        };

        let outcome = match transport.edit(&message, payload).await {
            Ok(()) => SyncOutcome::Edited,
            Err(Error::EditQuotaExceeded { .. }) => {
                recreate(db, transport, game_id, post_type, &message, payload).await?
            }
            Err(error) => {
                warn!(
                    message_id = %message.message_id,
                    %error,
                    "post edit failed, skipping"
                );
                SyncOutcome::Failed
            }
        };
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// The quota recovery path: delete, re-send to the same channel, record.
async fn recreate(
    db: &DatabaseConnection,
    transport: &dyn MessageTransport,
    game_id: i64,
    post_type: PostType,
    dead: &MessageRef,
    payload: &MessagePayload,
) -> Result<SyncOutcome> {
    info!(
        message_id = %dead.message_id,
        channel_id = %dead.channel_id,
        "edit quota exhausted, recreating post"
    );

    if let Err(error) = transport.delete(dead).await {
        // The replacement still goes out; the dead message just lingers.
        warn!(message_id = %dead.message_id, %error, "could not delete quota-dead post");
    }

    let target = SendTarget::Channel {
        channel_id: dead.channel_id.clone(),
    };
    let fresh = match transport.send(&target, payload).await {
        Ok(fresh) => fresh,
        Err(error) => {
            warn!(channel_id = %dead.channel_id, %error, "post recreation failed");
            return Ok(SyncOutcome::Failed);
        }
    };

    post::record(db, game_id, &fresh.message_id, &fresh.channel_id, post_type).await?;
    Ok(SyncOutcome::Recreated(fresh))
}
