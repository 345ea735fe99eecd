//! PollVote entity - RSVP answers, one mutable row per (timeslot, player).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Poll vote database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "poll_votes")]
pub struct Model {
    /// Timeslot answered
    #[sea_orm(primary_key, auto_increment = false)]
    pub timeslot_id: i64,
    /// Answering player
    #[sea_orm(primary_key, auto_increment = false)]
    pub player_id: i64,
    /// "yes", "maybe" or "no"
    pub value: String,
    /// Refreshed on every upsert (last-write-wins)
    pub created_at: DateTimeUtc,
}

/// Defines relationships between PollVote and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every poll vote belongs to exactly one timeslot
    #[sea_orm(
        belongs_to = "super::timeslot::Entity",
        from = "Column::TimeslotId",
        to = "super::timeslot::Column::Id"
    )]
    Timeslot,
    /// Every poll vote belongs to exactly one player
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id"
    )]
    Player,
}

impl Related<super::timeslot::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timeslot.def()
    }
}

impl Related<super::player::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Player.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
