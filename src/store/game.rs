//! Game get-or-create and aggregate listing.
//!
//! Title is the idempotency key: creation is an `ON CONFLICT DO NOTHING`
//! insert followed by a select, so two racing commands with the same title
//! resolve to the same row. A different url submitted for an existing title
//! is ignored; the stored url wins.

use crate::{
    entities::{Game, Vote, game, vote},
    errors::{Error, Result},
};
use chrono::Utc;
use sea_orm::{DbErr, QueryOrder, Set, prelude::*, sea_query::OnConflict};
use std::collections::HashMap;

/// A game together with its current interest tallies, derived from vote rows.
#[derive(Clone, Debug, PartialEq)]
pub struct GameVoteCounts {
    /// The game row
    pub game: game::Model,
    /// Number of players currently voting interested
    pub interested: u64,
    /// Number of players currently voting not interested
    pub not_interested: u64,
}

/// Resolves a title to its game row, creating the row on first mention.
pub async fn get_or_create(
    db: &DatabaseConnection,
    title: &str,
    url: &str,
    image_url: Option<&str>,
    suggested_by: Option<&str>,
) -> Result<game::Model> {
    let model = game::ActiveModel {
        title: Set(title.to_string()),
        url: Set(url.to_string()),
        image_url: Set(image_url.map(ToString::to_string)),
        suggested_by: Set(suggested_by.map(ToString::to_string)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let inserted = Game::insert(model)
        .on_conflict(
            OnConflict::column(game::Column::Title)
                .do_nothing()
                .to_owned(),
        )
        .exec(db)
        .await;

    match inserted {
        Ok(_) | Err(DbErr::RecordNotInserted) => {}
        Err(err) => return Err(err.into()),
    }

    by_title(db, title).await?.ok_or_else(|| Error::NotFound {
        entity: "game",
        key: title.to_string(),
    })
}

/// Looks a game up by title.
pub async fn by_title(db: &DatabaseConnection, title: &str) -> Result<Option<game::Model>> {
    Game::find()
        .filter(game::Column::Title.eq(title))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Looks a game up by id, failing with `NotFound` on a miss.
pub async fn by_id(db: &DatabaseConnection, game_id: i64) -> Result<game::Model> {
    Game::find_by_id(game_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "game",
            key: game_id.to_string(),
        })
}

/// Every game with its current vote counts, in suggestion order.
///
/// Counts are recomputed from the vote rows on every call; there is no
/// cached counter anywhere that could drift from the source rows.
pub async fn list_with_vote_counts(db: &DatabaseConnection) -> Result<Vec<GameVoteCounts>> {
    let games = Game::find().order_by_asc(game::Column::Id).all(db).await?;
    let votes = Vote::find().all(db).await?;

    let mut counts: HashMap<i64, (u64, u64)> = HashMap::new();
    for row in &votes {
        let entry = counts.entry(row.game_id).or_default();
        if row.value == 1 {
            entry.0 += 1;
        } else {
            entry.1 += 1;
        }
    }

    Ok(games
        .into_iter()
        .map(|game| {
            let (interested, not_interested) = counts.get(&game.id).copied().unwrap_or((0, 0));
            GameVoteCounts {
                game,
                interested,
                not_interested,
            }
        })
        .collect())
}
