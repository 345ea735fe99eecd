//! Sessions and session membership.
//!
//! Forward-looking: the store contract exists and is covered by tests, but
//! no interaction is routed to it yet.

use crate::{
    entities::{Game, Player, Session, SessionPlayer, game, player, session, session_player},
    errors::{Error, Result},
};
use chrono::{DateTime, Utc};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::OnConflict};

/// Schedules a session for a game.
pub async fn create(
    db: &DatabaseConnection,
    game_id: i64,
    time_from: DateTime<Utc>,
    time_to: DateTime<Utc>,
) -> Result<session::Model> {
    Game::find_by_id(game_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "game",
            key: game_id.to_string(),
        })?;

    let model = session::ActiveModel {
        game_id: Set(game_id),
        time_from: Set(time_from),
        time_to: Set(time_to),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    model.insert(db).await.map_err(Into::into)
}

/// Adds a player to a session; joining twice is a no-op.
pub async fn join(db: &DatabaseConnection, session_id: i64, user_id: &str) -> Result<()> {
    let player = Player::find()
        .filter(player::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or_else(|| Error::NotRegistered {
            user_id: user_id.to_string(),
        })?;

    Session::find_by_id(session_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: "session",
            key: session_id.to_string(),
        })?;

    let model = session_player::ActiveModel {
        session_id: Set(session_id),
        player_id: Set(player.id),
        joined_at: Set(Utc::now()),
    };

    let inserted = SessionPlayer::insert(model)
        .on_conflict(
            OnConflict::columns([
                session_player::Column::SessionId,
                session_player::Column::PlayerId,
            ])
            .do_nothing()
            .to_owned(),
        )
        .exec(db)
        .await;

    match inserted {
        Ok(_) | Err(sea_orm::DbErr::RecordNotInserted) => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// All sessions with their games, earliest first.
pub async fn all_with_games(
    db: &DatabaseConnection,
) -> Result<Vec<(session::Model, game::Model)>> {
    let rows = Session::find()
        .find_also_related(Game)
        .order_by_asc(session::Column::TimeFrom)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(session, game)| game.map(|g| (session, g)))
        .collect())
}

/// Everyone who joined a session.
pub async fn players(db: &DatabaseConnection, session_id: i64) -> Result<Vec<player::Model>> {
    let memberships = SessionPlayer::find()
        .filter(session_player::Column::SessionId.eq(session_id))
        .find_also_related(Player)
        .order_by_asc(session_player::Column::JoinedAt)
        .all(db)
        .await?;

    Ok(memberships
        .into_iter()
        .filter_map(|(_, player)| player)
        .collect())
}
