//! Interest votes - atomic upsert keyed on (player, game).

use crate::{
    entities::{Game, Player, Vote, player, vote},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// The two sides of an interest vote.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VoteValue {
    /// Wants to play
    Interested,
    /// Does not want to play
    NotInterested,
}

impl VoteValue {
    /// Stored representation (1 = interested, 0 = not interested).
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::Interested => 1,
            Self::NotInterested => 0,
        }
    }

    /// Decodes the stored representation; anything nonzero counts as
    /// interested, matching the original column semantics.
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        if value == 0 {
            Self::NotInterested
        } else {
            Self::Interested
        }
    }
}

/// Records or replaces a player's vote on a game.
///
/// Fails with `NotRegistered` if the player has never been seen and
/// `NotFound` if the game does not exist. The write itself is one
/// `ON CONFLICT (player_id, game_id) DO UPDATE` statement: re-voting and
/// duplicate click delivery both collapse into the same single row.
pub async fn upsert(
    db: &DatabaseConnection,
    user_id: &str,
    game_id: i64,
    value: VoteValue,
) -> Result<vote::Model> {
    let player = Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotRegistered {
            user_id: user_id.to_string(),
        })?;

    Game::find_by_id(game_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "game",
            key: game_id.to_string(),
        })?;

    let model = vote::ActiveModel {
        player_id: Set(player.id),
        game_id: Set(game_id),
        value: Set(value.as_i32()),
        created_at: Set(Utc::now()),
    };

    Vote::insert(model)
        .on_conflict(
            OnConflict::columns([vote::Column::PlayerId, vote::Column::GameId])
                .update_columns([vote::Column::Value, vote::Column::CreatedAt])
                .to_owned(),
        )
        .exec(db)
        .await?;

    Vote::find_by_id((player.id, game_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "vote",
            key: format!("{}/{game_id}", player.id),
        })
}

/// All vote rows for a game joined to their players, in a stable order.
pub async fn votes_with_players(
    db: &DatabaseConnection,
    game_id: i64,
) -> Result<Vec<(vote::Model, player::Model)>> {
    let rows = Vote::find()
        .filter(vote::Column::GameId.eq(game_id))
        .find_also_related(Player)
        .order_by_asc(vote::Column::CreatedAt)
        .order_by_asc(vote::Column::PlayerId)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(vote, player)| player.map(|p| (vote, p)))
        .collect())
}
