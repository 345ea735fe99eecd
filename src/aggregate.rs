//! Vote aggregation - pure transforms from raw vote rows to display buckets.
//!
//! Everything here is deterministic given its inputs and recomputed on every
//! render; no counter is cached anywhere. Buckets are a true partition: a
//! player with several historical rows (should not happen, the upsert key
//! forbids it, but we stay defensive) lands in exactly one bucket, decided
//! by their latest row.

use crate::entities::{player, poll_vote, vote};
use crate::store::{poll::RsvpChoice, vote::VoteValue};
use std::collections::HashMap;

/// Placeholder rendered for an empty bucket.
pub const NOBODY_YET: &str = "Nobody yet";

/// One vote as the aggregator sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoteRecord {
    /// External user id of the voter
    pub user_id: String,
    /// The voter's current answer
    pub value: VoteValue,
}

impl VoteRecord {
    /// Flattens joined store rows into aggregator input.
    #[must_use]
    pub fn from_rows(rows: &[(vote::Model, player::Model)]) -> Vec<Self> {
        rows.iter()
            .map(|(vote, player)| Self {
                user_id: player.user_id.clone(),
                value: VoteValue::from_i32(vote.value),
            })
            .collect()
    }
}

/// The two interest buckets for a game, each an ordered list of user ids.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoteTally {
    /// Players whose latest vote is "interested"
    pub interested: Vec<String>,
    /// Players whose latest vote is "not interested"
    pub not_interested: Vec<String>,
}

impl VoteTally {
    /// Renders the tally text shown on every LFG post.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "✅ Interested: {}\n❌ Not Interested: {}",
            mention_list(&self.interested),
            mention_list(&self.not_interested),
        )
    }
}

/// Partitions vote records into interest buckets.
///
/// Rows arrive in insertion order; each player keeps their first-seen
/// position but their *last* value, so the output is stable across repeated
/// calls with the same input.
#[must_use]
pub fn partition_votes(rows: &[VoteRecord]) -> VoteTally {
    let mut latest: HashMap<&str, VoteValue> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for row in rows {
        if !latest.contains_key(row.user_id.as_str()) {
            order.push(row.user_id.as_str());
        }
        latest.insert(row.user_id.as_str(), row.value);
    }

    let mut tally = VoteTally::default();
    for user_id in order {
        match latest[user_id] {
            VoteValue::Interested => tally.interested.push(user_id.to_string()),
            VoteValue::NotInterested => tally.not_interested.push(user_id.to_string()),
        }
    }
    tally
}

/// One RSVP answer as the aggregator sees it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PollVoteRecord {
    /// Timeslot the answer applies to
    pub timeslot_id: i64,
    /// External user id of the voter
    pub user_id: String,
    /// The voter's current answer
    pub choice: RsvpChoice,
}

impl PollVoteRecord {
    /// Flattens joined store rows into aggregator input, dropping rows whose
    /// stored value no longer parses.
    #[must_use]
    pub fn from_rows(rows: &[(poll_vote::Model, player::Model)]) -> Vec<Self> {
        rows.iter()
            .filter_map(|(vote, player)| {
                RsvpChoice::parse(&vote.value).map(|choice| Self {
                    timeslot_id: vote.timeslot_id,
                    user_id: player.user_id.clone(),
                    choice,
                })
            })
            .collect()
    }
}

/// Per-timeslot RSVP buckets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotTally {
    /// The timeslot these buckets describe
    pub timeslot_id: i64,
    /// Players answering yes
    pub yes: Vec<String>,
    /// Players answering maybe
    pub maybe: Vec<String>,
    /// Players answering no
    pub no: Vec<String>,
}

/// Partitions RSVP records per timeslot, one `SlotTally` per requested slot
/// (empty slots yield empty buckets). Same dedup and ordering rules as
/// [`partition_votes`].
#[must_use]
pub fn partition_poll_votes(slot_ids: &[i64], rows: &[PollVoteRecord]) -> Vec<SlotTally> {
    slot_ids
        .iter()
        .map(|&slot_id| {
            let mut latest: HashMap<&str, RsvpChoice> = HashMap::new();
            let mut order: Vec<&str> = Vec::new();

            for row in rows.iter().filter(|row| row.timeslot_id == slot_id) {
                if !latest.contains_key(row.user_id.as_str()) {
                    order.push(row.user_id.as_str());
                }
                latest.insert(row.user_id.as_str(), row.choice);
            }

            let mut tally = SlotTally {
                timeslot_id: slot_id,
                yes: Vec::new(),
                maybe: Vec::new(),
                no: Vec::new(),
            };
            for user_id in order {
                match latest[user_id] {
                    RsvpChoice::Yes => tally.yes.push(user_id.to_string()),
                    RsvpChoice::Maybe => tally.maybe.push(user_id.to_string()),
                    RsvpChoice::No => tally.no.push(user_id.to_string()),
                }
            }
            tally
        })
        .collect()
}

/// Renders a bucket as comma-separated mention tokens, or the placeholder.
#[must_use]
pub fn mention_list(user_ids: &[String]) -> String {
    if user_ids.is_empty() {
        return NOBODY_YET.to_string();
    }
    user_ids
        .iter()
        .map(|id| format!("<@{id}>"))
        .collect::<Vec<_>>()
        .join(", ")
}
