//! Game entity - One row per suggested game.
//!
//! Title is the natural identity key: get-or-create is keyed on it, so the
//! same title submitted twice resolves to one row. The stored url and image
//! are what later re-renders and post recreation derive from.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Game database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    /// Unique identifier for the game
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Game title, globally unique, the idempotency key for creation
    #[sea_orm(unique)]
    pub title: String,
    /// Source url the game was suggested from
    #[sea_orm(unique)]
    pub url: String,
    /// Header/thumbnail image shown in posts, if one was resolvable
    pub image_url: Option<String>,
    /// Discord user id of the player who first suggested the game
    pub suggested_by: Option<String>,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Game and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One game has many votes
    #[sea_orm(has_many = "super::vote::Entity")]
    Votes,
    /// One game has many posts (one per channel/command invocation)
    #[sea_orm(has_many = "super::post::Entity")]
    Posts,
    /// One game has many polls
    #[sea_orm(has_many = "super::poll::Entity")]
    Polls,
    /// One game has many sessions
    #[sea_orm(has_many = "super::session::Entity")]
    Sessions,
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Votes.def()
    }
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Posts.def()
    }
}

impl Related<super::poll::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Polls.def()
    }
}

impl Related<super::session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
