//! Player entity - One row per Discord user that has interacted with the bot.
//!
//! Players are created lazily on first vote or poll interaction. The external
//! user id is the natural key; the internal id is immutable once assigned.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Player database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "players")]
pub struct Model {
    /// Internal identifier, immutable once assigned
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Discord user id (snowflake as string)
    #[sea_orm(unique)]
    pub user_id: String,
    /// Display name, refreshed whenever the player interacts again
    pub username: String,
}

/// Defines relationships between Player and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One player has many game votes
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
    /// One player has many poll votes
    #[sea_orm(has_many = "super::poll_vote::Entity")]
    PollVotes,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl Related<super::poll_vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PollVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
