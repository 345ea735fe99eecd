//! Entity store - All durable state operations.
//!
//! Free async functions over the SeaORM connection, grouped per entity.
//! Get-or-create and vote upserts are single `ON CONFLICT` statements, so
//! concurrent duplicate interactions serialize to last-write-wins at the
//! database level without any in-process locking.

/// Game get-or-create and vote-count listing
pub mod game;
/// Player registration
pub mod player;
/// Polls, timeslots and RSVP votes
pub mod poll;
/// The post-location ledger
pub mod post;
/// Sessions and session membership
pub mod session;
/// Interest votes
pub mod vote;
