//! Modal submission handler: the timeslot form.

use super::{AppContext, FollowUp, Outcome, poll_view};
use crate::action;
use crate::composer;
use crate::errors::{Error, Result};
use crate::store::{self, post::PostType};
use crate::wire::interaction::Interaction;
use crate::wire::payload::ResponseEnvelope;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::info;

/// Accepted form of a submitted time, e.g. "2026-09-04 18:30".
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub async fn handle(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    let custom_id = interaction
        .data
        .as_ref()
        .and_then(|data| data.custom_id.as_deref())
        .unwrap_or_default();
    let poll_id =
        action::parse_time_modal_id(custom_id).ok_or_else(|| Error::UnknownAction {
            custom_id: custom_id.to_string(),
        })?;
    store::poll::by_id(&ctx.db, poll_id).await?;

    let start = parse_submitted_time(interaction, "start_time")?;
    let end = parse_submitted_time(interaction, "end_time")?;
    if end <= start {
        return Err(Error::Validation {
            message: "❌ The end time must be after the start time.".to_string(),
        });
    }

    let slot = store::poll::add_timeslot(&ctx.db, poll_id, start, end).await?;
    info!(poll_id, timeslot_id = slot.id, "timeslot added");

    let poll = store::poll::by_id(&ctx.db, poll_id).await?;
    let view = poll_view(&ctx.db, &poll).await?;
    Ok(Outcome::Deferred {
        ack: ResponseEnvelope::ephemeral_text(format!(
            "✅ Timeslot added: {} → {}",
            composer::format_slot_time(start),
            composer::format_slot_time(end),
        )),
        followup: FollowUp::SyncPosts {
            game_id: poll.game_id,
            post_type: PostType::Poll,
            payload: composer::poll_post(&view),
        },
    })
}

fn parse_submitted_time(interaction: &Interaction, field: &str) -> Result<DateTime<Utc>> {
    let raw = interaction
        .modal_field(field)
        .map(str::trim)
        .filter(|raw| !raw.is_empty())
        .ok_or_else(|| Error::Validation {
            message: format!("❌ The {field} field is required."),
        })?;

    let naive = NaiveDateTime::parse_from_str(raw, TIME_FORMAT).map_err(|_| Error::Validation {
        message: format!(
            "❌ Could not parse \"{raw}\". Use the format YYYY-MM-DD HH:MM, \
             e.g. 2026-09-04 18:30."
        ),
    })?;
    Ok(naive.and_utc())
}
