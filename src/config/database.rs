//! Database configuration module for `PartyFinder`.
//!
//! Handles the SQLite connection and table creation using SeaORM. Tables are
//! generated from the entity definitions with `Schema::create_table_from_entity`,
//! so the database schema always matches the Rust struct definitions without
//! hand-written SQL.

use crate::entities::{
    Game, Player, Poll, PollVote, Post, Session, SessionPlayer, Timeslot, Vote,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Idempotent: every
/// statement carries `IF NOT EXISTS`, so this is safe to run at each startup.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(Player),
        schema.create_table_from_entity(Game),
        schema.create_table_from_entity(Post),
        schema.create_table_from_entity(Vote),
        schema.create_table_from_entity(Poll),
        schema.create_table_from_entity(Timeslot),
        schema.create_table_from_entity(PollVote),
        schema.create_table_from_entity(Session),
        schema.create_table_from_entity(SessionPlayer),
    ];

    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(&*statement)).await?;
    }

    Ok(())
}
