//! Timeslot entity - A candidate time window inside a poll.
//!
//! Append-only: timeslots are never edited or deleted once submitted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timeslot database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timeslots")]
pub struct Model {
    /// Unique identifier for the timeslot
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Poll this slot belongs to
    pub poll_id: i64,
    /// Start of the proposed window
    pub start_time: DateTimeUtc,
    /// End of the proposed window
    pub end_time: DateTimeUtc,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Timeslot and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every timeslot belongs to exactly one poll
    #[sea_orm(
        belongs_to = "super::poll::Entity",
        from = "Column::PollId",
        to = "super::poll::Column::Id"
    )]
    Poll,
    /// One timeslot has many poll votes
    #[sea_orm(has_many = "super::poll_vote::Entity")]
    PollVotes,
}

impl Related<super::poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poll.def()
    }
}

impl Related<super::poll_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
