//! SessionPlayer entity - Player membership in a session.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Session membership database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "session_players")]
pub struct Model {
    /// Session joined
    #[sea_orm(primary_key, auto_increment = false)]
    pub session_id: i64,
    /// Joining player
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: i64,
    /// When the player joined
    pub joined_at: DateTimeUtc,
}

/// Defines relationships between SessionPlayer and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every membership belongs to exactly one session
    #[sea_orm(
        belongs_to = "super::session::Entity",
        from = "Column::SessionId",
        to = "super::session::Column::Id"
    )]
    Session,
    /// Every membership belongs to exactly one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
