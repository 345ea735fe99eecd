//! Component action identifiers.
//!
//! Custom ids are decoded once, at the router boundary, into a closed set of
//! (action kind, target reference) variants; everything downstream matches
//! exhaustively on the enum instead of scattering string-prefix checks. The
//! id carries the target's database id directly, so a click on a stale
//! (deleted-and-recreated) post still resolves to the canonical entity.

use crate::errors::{Error, Result};
use crate::store::{poll::RsvpChoice, vote::VoteValue};

/// Every component action this bot serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// An interest vote button on an LFG post
    Vote {
        /// Target game
        game_id: i64,
        /// Which button was pressed
        value: VoteValue,
    },
    /// The "See Voters" button on a list summary
    Details {
        /// Target game
        game_id: i64,
    },
    /// The "Add a timeslot" button on a poll post; opens the modal
    AddTime {
        /// Target poll
        poll_id: i64,
    },
    /// The "RSVP" button on a poll post; opens the private per-slot panel
    Rsvp {
        /// Target poll
        poll_id: i64,
    },
    /// A yes/maybe/no button on the RSVP panel
    PollVote {
        /// Target timeslot
        timeslot_id: i64,
        /// Which answer was pressed
        choice: RsvpChoice,
    },
}

impl Action {
    /// Decodes a raw custom id. Unknown shapes are a single rejection path.
    pub fn decode(custom_id: &str) -> Result<Self> {
        let unknown = || Error::UnknownAction {
            custom_id: custom_id.to_string(),
        };

        if let Some(raw) = custom_id.strip_prefix("vote_yes_") {
            return Ok(Self::Vote {
                game_id: parse_id(raw).ok_or_else(unknown)?,
                value: VoteValue::Interested,
            });
        }
        if let Some(raw) = custom_id.strip_prefix("vote_no_") {
            return Ok(Self::Vote {
                game_id: parse_id(raw).ok_or_else(unknown)?,
                value: VoteValue::NotInterested,
            });
        }
        if let Some(raw) = custom_id.strip_prefix("details_") {
            return Ok(Self::Details {
                game_id: parse_id(raw).ok_or_else(unknown)?,
            });
        }
        if let Some(raw) = custom_id.strip_prefix("add_time_") {
            return Ok(Self::AddTime {
                poll_id: parse_id(raw).ok_or_else(unknown)?,
            });
        }
        if let Some(raw) = custom_id.strip_prefix("rsvp_") {
            return Ok(Self::Rsvp {
                poll_id: parse_id(raw).ok_or_else(unknown)?,
            });
        }
        if let Some(raw) = custom_id.strip_prefix("poll_vote_") {
            // poll_vote_<choice>_<timeslot_id>
            let (choice_raw, id_raw) = raw.split_once('_').ok_or_else(unknown)?;
            let choice = RsvpChoice::parse(choice_raw).ok_or_else(unknown)?;
            return Ok(Self::PollVote {
                timeslot_id: parse_id(id_raw).ok_or_else(unknown)?,
                choice,
            });
        }

        Err(unknown())
    }

    /// Encodes the action back into its custom id.
    #[must_use]
    pub fn encode(self) -> String {
        match self {
            Self::Vote { game_id, value } => match value {
                VoteValue::Interested => format!("vote_yes_{game_id}"),
                VoteValue::NotInterested => format!("vote_no_{game_id}"),
            },
            Self::Details { game_id } => format!("details_{game_id}"),
            Self::AddTime { poll_id } => format!("add_time_{poll_id}"),
            Self::Rsvp { poll_id } => format!("rsvp_{poll_id}"),
            Self::PollVote {
                timeslot_id,
                choice,
            } => format!("poll_vote_{}_{timeslot_id}", choice.as_str()),
        }
    }
}

/// Custom id of the timeslot submission modal for a poll.
#[must_use]
pub fn time_modal_id(poll_id: i64) -> String {
    format!("time_modal_{poll_id}")
}

/// Extracts the poll id from a timeslot modal custom id.
#[must_use]
pub fn parse_time_modal_id(custom_id: &str) -> Option<i64> {
    custom_id.strip_prefix("time_modal_").and_then(parse_id)
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>().ok()
}
