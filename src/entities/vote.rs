//! Vote entity - Interest votes, one mutable row per (player, game) pair.
//!
//! The composite primary key is what makes re-voting an upsert instead of an
//! append: the same player voting again replaces their previous row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Vote database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "votes")]
pub struct Model {
    /// Voting player
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: i64,
    /// Game voted on
    #[sea_orm(primary_key, auto_increment = false)]
    pub game_id: i64,
    /// 1 = interested, 0 = not interested
    pub value: i32,
    /// Refreshed on every upsert (last-write-wins)
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Vote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every vote belongs to exactly one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
    /// Every vote belongs to exactly one game
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id"
    )]
    Game,
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
