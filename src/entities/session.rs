//! Session entity - A scheduled play session for a game.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    /// Unique identifier for the session
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Game being played
    pub game_id: i64,
    /// Session start
    pub time_from: DateTimeUtc,
    /// Session end
    pub time_to: DateTimeUtc,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Session and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every session belongs to exactly one game
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id"
    )]
    Game,
    /// One session has many memberships
    #[sea_orm(has_many = "super::session_player::Entity")]
    SessionPlayers,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::session_player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SessionPlayers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
