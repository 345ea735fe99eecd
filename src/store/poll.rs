//! Polls, timeslots and RSVP votes.
//!
//! Timeslots are append-only within a poll; RSVP answers are upserts keyed
//! on (timeslot, player), same shape as game votes.

use crate::{
    entities::{Player, Poll, PollVote, Timeslot, player, poll, poll_vote, timeslot},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// The three RSVP answers for a timeslot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RsvpChoice {
    /// Can play
    Yes,
    /// Might play
    Maybe,
    /// Cannot play
    No,
}

impl RsvpChoice {
    /// Stored and wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Maybe => "maybe",
            Self::No => "no",
        }
    }

    /// Parses the stored/wire representation.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "yes" => Some(Self::Yes),
            "maybe" => Some(Self::Maybe),
            "no" => Some(Self::No),
            _ => None,
        }
    }
}

/// Opens a poll for a game.
pub async fn create(
    db: &DatabaseConnection,
    game_id: i64,
    created_by: i64,
    description: Option<&str>,
) -> Result<poll::Model> {
    let model = poll::ActiveModel {
        game_id: Set(game_id),
        created_by: Set(created_by),
        description: Set(description.map(ToString::to_string)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Looks a poll up by id, failing with `NotFound` on a miss.
pub async fn by_id(db: &DatabaseConnection, poll_id: i64) -> Result<poll::Model> {
    Poll::find_by_id(poll_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "poll",
            key: poll_id.to_string(),
        })
}

/// Appends a candidate time window to a poll.
pub async fn add_timeslot(
    db: &DatabaseConnection,
    poll_id: i64,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
) -> Result<timeslot::Model> {
    by_id(db, poll_id).await?;

    let model = timeslot::ActiveModel {
        poll_id: Set(poll_id),
        start_time: Set(start_time),
        end_time: Set(end_time),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// All timeslots of a poll, earliest start first.
pub async fn timeslots(db: &DatabaseConnection, poll_id: i64) -> Result<Vec<timeslot::Model>> {
    Timeslot::find()
        .filter(timeslot::Column::PollId.eq(poll_id))
        .order_by_asc(timeslot::Column::StartTime)
        .order_by_asc(timeslot::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks a timeslot up by id, failing with `NotFound` on a miss.
pub async fn timeslot_by_id(db: &DatabaseConnection, timeslot_id: i64) -> Result<timeslot::Model> {
    Timeslot::find_by_id(timeslot_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "timeslot",
            key: timeslot_id.to_string(),
        })
}

/// Records or replaces a player's RSVP for a timeslot.
///
/// Same contract as game votes: `NotRegistered` for an unknown player,
/// `NotFound` for a missing timeslot, one atomic upsert for the row.
pub async fn upsert_vote(
    db: &DatabaseConnection,
    user_id: &str,
    timeslot_id: i64,
    choice: RsvpChoice,
) -> Result<poll_vote::Model> {
    let player = Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotRegistered {
            user_id: user_id.to_string(),
        })?;

    timeslot_by_id(db, timeslot_id).await?;

    let model = poll_vote::ActiveModel {
        timeslot_id: Set(timeslot_id),
        player_id: Set(player.id),
        value: Set(choice.as_str().to_string()),
        created_at: Set(Utc::now()),
    };

    PollVote::insert(model)
        .on_conflict(
            OnConflict::columns([poll_vote::Column::TimeslotId, poll_vote::Column::PlayerId])
                .update_columns([poll_vote::Column::Value, poll_vote::Column::CreatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    PollVote::find_by_id((timeslot_id, player.id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "poll_vote",
            key: format!("{timeslot_id}/{}", player.id),
        })
}

/// All RSVP rows across a poll's timeslots joined to their players, in a
/// stable order.
pub async fn votes_with_players(
    db: &DatabaseConnection,
    poll_id: i64,
) -> Result<Vec<(poll_vote::Model, player::Model)>> {
    let slot_ids: Vec<i64> = timeslots(db, poll_id)
        .await?
        .into_iter()
        .map(|slot| slot.id)
        .collect();

    if slot_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows = PollVote::find()
        .filter(poll_vote::Column::TimeslotId.is_in(slot_ids))
        .find_also_related(Player)
        .order_by_asc(poll_vote::Column::CreatedAt)
        .order_by_asc(poll_vote::Column::PlayerId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(vote, player)| player.map(|p| (vote, p)))
        .collect())
}
