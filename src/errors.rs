//! Unified error types for `PartyFinder`.
//!
//! One taxonomy covers the whole request path: validation problems that get
//! reported back to the user, referential-integrity misses from the store,
//! the recognized edit-quota condition that triggers post recreation, and
//! protocol-level rejections that become 400 responses.

use thiserror::Error;

/// All errors that can surface while handling an interaction.
#[derive(Debug, Error)]
pub enum Error {
    /// A required disambiguating field was missing from user input.
    /// Reported to the user verbatim; no state is mutated.
    #[error("{message}")]
    Validation {
        /// User-facing description of what was missing or malformed.
        message: String,
    },

    /// A vote referenced a player that has never been registered.
    #[error("player not registered: {user_id}")]
    NotRegistered {
        /// External user id of the missing player.
        user_id: String,
    },

    /// A lookup by natural key or message id had no matching row.
    #[error("{entity} not found: {key}")]
    NotFound {
        /// Kind of entity that was looked up.
        entity: &'static str,
        /// The key that missed.
        key: String,
    },

    /// The platform refused an edit because the message's edit quota is
    /// exhausted. Triggers the delete-and-recreate recovery path.
    #[error("edit quota exceeded for message {message_id}")]
    EditQuotaExceeded {
        /// Message whose edit was refused.
        message_id: String,
    },

    /// Any other upstream messaging failure. Isolated per fan-out target.
    #[error("transport error: {message}")]
    Transport {
        /// Upstream status or error body.
        message: String,
    },

    /// A slash command name this bot does not serve.
    #[error("unknown command: {name}")]
    UnknownCommand {
        /// The unrecognized command name.
        name: String,
    },

    /// An interaction type outside the closed set we dispatch on.
    #[error("unknown interaction type: {value}")]
    UnknownInteractionType {
        /// The raw numeric type from the payload.
        value: u8,
    },

    /// A component custom id that decodes to no known action.
    #[error("unknown component action: {custom_id}")]
    UnknownAction {
        /// The raw custom id.
        custom_id: String,
    },

    /// Startup or environment configuration problem.
    #[error("configuration error: {message}")]
    Config {
        /// What was missing or malformed.
        message: String,
    },

    /// Database error from the store layer.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Outbound HTTP client error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error (listener binding, mostly).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error.
    #[error("environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// True for errors that should surface as a 400 protocol rejection
    /// rather than a user-facing message.
    #[must_use]
    pub const fn is_protocol_rejection(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand { .. }
                | Self::UnknownInteractionType { .. }
                | Self::UnknownAction { .. }
        )
    }
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
