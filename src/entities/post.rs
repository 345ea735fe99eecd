//! Post entity - The ledger of externally visible message instances.
//!
//! One row per message the bot has created for a game. A game may have many
//! posts; all of them are kept in sync when the game's aggregate changes.
//! The ledger is append-only: recreating a message appends a fresh row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Post database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    /// Unique identifier for the post
    #[sea_orm(primary_key)]
    pub id: i64,
    /// The game this post renders; never repointed at a different game
    pub game_id: i64,
    /// Discord message id
    pub message_id: String,
    /// Discord channel id the message lives in
    pub channel_id: String,
    /// Kind of rendering: "lfg", "list" or "poll"
    pub post_type: String,
    /// Creation timestamp
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Post and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Every post belongs to exactly one game
    #[sea_orm(
        belongs_to = "super::game::Entity",
        from = "Column::GameId",
        to = "super::game::Column::Id"
    )]
    Game,
}

impl Related<super::game::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Game.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
