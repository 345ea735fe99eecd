//! Component click handlers.
//!
//! Custom ids decode once into [`Action`]; the match below is exhaustive,
//! so adding an action variant forces a handler.

use super::{AppContext, FollowUp, Outcome, actor, game_view, poll_view};
use crate::action::Action;
use crate::aggregate::{self, VoteRecord};
use crate::composer;
use crate::errors::{Error, Result};
use crate::store::{self, post::PostType};
use crate::wire::interaction::Interaction;
use crate::wire::payload::ResponseEnvelope;
use tracing::info;

pub async fn handle(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    let custom_id = interaction
        .data
        .as_ref()
        .and_then(|data| data.custom_id.as_deref())
        .ok_or_else(|| Error::UnknownAction {
            custom_id: String::new(),
        })?;

    match Action::decode(custom_id)? {
        Action::Vote { game_id, value } => {
            let user = actor(interaction)?;
            store::player::get_or_create(&ctx.db, &user.id, user.display_name()).await?;
            store::vote::upsert(&ctx.db, &user.id, game_id, value).await?;
            info!(game_id, user_id = %user.id, "vote recorded");

            let game = store::game::by_id(&ctx.db, game_id).await?;
            let view = game_view(&ctx.db, &game).await?;
            Ok(Outcome::Deferred {
                ack: ResponseEnvelope::deferred_update(),
                followup: FollowUp::SyncPosts {
                    game_id,
                    post_type: PostType::Lfg,
                    payload: composer::lfg_post(&view),
                },
            })
        }
        Action::Details { game_id } => {
            let game = store::game::by_id(&ctx.db, game_id).await?;
            let rows = store::vote::votes_with_players(&ctx.db, game_id).await?;
            let tally = aggregate::partition_votes(&VoteRecord::from_rows(&rows));
            Ok(Outcome::Respond(ResponseEnvelope::channel_message(
                composer::voter_details(&game.title, &tally),
            )))
        }
        Action::AddTime { poll_id } => {
            store::poll::by_id(&ctx.db, poll_id).await?;
            Ok(Outcome::Respond(ResponseEnvelope::modal(
                composer::time_slot_modal(poll_id),
            )))
        }
        Action::Rsvp { poll_id } => {
            let poll = store::poll::by_id(&ctx.db, poll_id).await?;
            let view = poll_view(&ctx.db, &poll).await?;
            if view.slots.is_empty() {
                return Ok(Outcome::Respond(ResponseEnvelope::ephemeral_text(
                    "❌ This poll has no timeslots yet. Add one first!",
                )));
            }
            Ok(Outcome::Respond(ResponseEnvelope::channel_message(
                composer::poll_rsvp_panel(&view),
            )))
        }
        Action::PollVote {
            timeslot_id,
            choice,
        } => {
            let user = actor(interaction)?;
            store::player::get_or_create(&ctx.db, &user.id, user.display_name()).await?;
            store::poll::upsert_vote(&ctx.db, &user.id, timeslot_id, choice).await?;
            info!(timeslot_id, user_id = %user.id, "rsvp recorded");

            let slot = store::poll::timeslot_by_id(&ctx.db, timeslot_id).await?;
            let poll = store::poll::by_id(&ctx.db, slot.poll_id).await?;
            let view = poll_view(&ctx.db, &poll).await?;
            Ok(Outcome::Deferred {
                ack: ResponseEnvelope::deferred_update(),
                followup: FollowUp::SyncPosts {
                    game_id: poll.game_id,
                    post_type: PostType::Poll,
                    payload: composer::poll_post(&view),
                },
            })
        }
    }
}
