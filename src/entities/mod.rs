//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod game;
pub mod player;
pub mod poll;
pub mod poll_vote;
pub mod post;
pub mod session;
pub mod session_player;
pub mod timeslot;
pub mod vote;

// Re-export specific types to avoid conflicts
pub use game::{Column as GameColumn, Entity as Game, Model as GameModel};
pub use player::{Column as PlayerColumn, Entity as Player, Model as PlayerModel};
pub use poll::{Column as PollColumn, Entity as Poll, Model as PollModel};
pub use poll_vote::{Column as PollVoteColumn, Entity as PollVote, Model as PollVoteModel};
pub use post::{Column as PostColumn, Entity as Post, Model as PostModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use session_player::{
    Column as SessionPlayerColumn, Entity as SessionPlayer, Model as SessionPlayerModel,
};
pub use timeslot::{Column as TimeslotColumn, Entity as Timeslot, Model as TimeslotModel};
pub use vote::{Column as VoteColumn, Entity as Vote, Model as VoteModel};
