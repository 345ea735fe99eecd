//! Poll entity - Groups a game session's candidate time windows.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Poll database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "polls")]
pub struct Model {
    /// Unique identifier for the poll
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Game the poll schedules a session for
    pub game_id: i64,
    /// Player who opened the poll
    pub created_by: i64,
    /// Free-form description shown on the poll post
    pub description: Option<String>,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Poll and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every poll belongs to exactly one game
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id"
    )]
    Game,
    /// One poll has many timeslots
    #[sea_orm(has_many = "super::timeslot::Entity")]
    Timeslots,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl Related<super::timeslot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timeslots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
