//! Message composer - builds the declarative payload tree for each entity
//! state.
//!
//! Pure transforms: every function here receives fully resolved data and
//! returns payload values, never performing I/O. Validation failures are
//! returned as structured errors so the caller can surface a user-facing
//! rejection instead of sending a malformed message.

use crate::action::{self, Action};
use crate::aggregate::{SlotTally, VoteTally, mention_list};
use crate::errors::{Error, Result};
use crate::resolver::ResolvedMedia;
use crate::store::game::GameVoteCounts;
use crate::store::{poll::RsvpChoice, vote::VoteValue};
use crate::wire::payload::{
    ActionRow, Button, Component, Embed, EmbedField, MediaGallery, MessagePayload, Modal,
    TextDisplay, TextInput,
};
use crate::wire::types;
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Accent color of the list summary embed.
const LIST_EMBED_COLOR: u32 = 0x0058_65F2;

/// Platform limit: at most five action rows per message.
const MAX_ACTION_ROWS: usize = 5;

/// Everything needed to render an LFG post.
#[derive(Clone, Debug, PartialEq)]
pub struct GameView {
    /// Game id, used in button custom ids
    pub id: i64,
    /// Game title
    pub title: String,
    /// Source url shown in the pitch line
    pub url: String,
    /// Header image, if one was resolvable at creation
    pub image_url: Option<String>,
    /// User id of the suggester
    pub suggested_by: Option<String>,
    /// Current interest buckets
    pub tally: VoteTally,
}

/// One timeslot with its RSVP buckets.
#[derive(Clone, Debug, PartialEq)]
pub struct SlotView {
    /// Timeslot id, used in button custom ids
    pub id: i64,
    /// Window start
    pub start_time: DateTime<Utc>,
    /// Window end
    pub end_time: DateTime<Utc>,
    /// Current RSVP buckets
    pub tally: SlotTally,
}

/// Everything needed to render a poll post or RSVP panel.
#[derive(Clone, Debug, PartialEq)]
pub struct PollView {
    /// Poll id, used in button custom ids
    pub id: i64,
    /// Title of the game being scheduled
    pub game_title: String,
    /// Free-form poll description
    pub description: Option<String>,
    /// Candidate windows, earliest first
    pub slots: Vec<SlotView>,
}

/// Resolves the title and image an LFG post requires.
///
/// Recognized store links supply both, video links supply only the image;
/// whatever the resolver could not produce must come from the caller's
/// explicit options. A missing title is always a validation failure; a
/// missing image is one only for unrecognized urls. A recognized store
/// link whose metadata lookup degraded still posts, just without the
/// gallery.
pub fn lfg_fields(
    resolved: Option<&ResolvedMedia>,
    game_name: Option<&str>,
    image_url: Option<&str>,
) -> Result<(String, Option<String>)> {
    let recognized = resolved
        .is_some_and(|media| media.title.is_some() || media.image_url.is_some());

    let title = resolved
        .and_then(|media| media.title.as_deref())
        .or(game_name)
        .ok_or_else(|| Error::Validation {
            message: "❌ If the game is not from steam you must provide a game name \
                      by adding the game_name argument in the command."
                .to_string(),
        })?;

    let image = resolved
        .and_then(|media| media.image_url.as_deref())
        .or(image_url);
    if image.is_none() && !recognized {
        return Err(Error::Validation {
            message: "❌ If the game is not from steam or youtube you must provide an \
                      image by adding the image_url argument in the command."
                .to_string(),
        });
    }

    Ok((title.to_string(), image.map(ToString::to_string)))
}

/// The LFG suggestion post: pitch line, image, tally, vote buttons.
#[must_use]
pub fn lfg_post(view: &GameView) -> MessagePayload {
    let pitch = match &view.suggested_by {
        Some(user_id) => format!(
            "@here, seems like <@{user_id}> wants you to check a game out ! {}",
            view.url
        ),
        None => format!("@here, check this game out ! {}", view.url),
    };

    let mut components = vec![Component::Text(TextDisplay::new(pitch))];
    if let Some(image_url) = &view.image_url {
        components.push(Component::Gallery(MediaGallery::single(image_url)));
    }
    components.push(Component::Text(TextDisplay::new(view.tally.render())));
    components.push(Component::Row(ActionRow::buttons(vec![
        Button::new(
            Action::Vote {
                game_id: view.id,
                value: VoteValue::Interested,
            }
            .encode(),
            "Interested 👍",
            types::BUTTON_SUCCESS,
        ),
        Button::new(
            Action::Vote {
                game_id: view.id,
                value: VoteValue::NotInterested,
            }
            .encode(),
            "Not Interested 👎",
            types::BUTTON_DANGER,
        ),
    ])));

    MessagePayload {
        flags: Some(types::FLAG_IS_COMPONENTS_V2),
        components,
        ..MessagePayload::default()
    }
}

/// The transient list summary: one embed field per game plus "See Voters"
/// buttons. Never recorded as a post.
#[must_use]
pub fn list_summary(entries: &[GameVoteCounts]) -> MessagePayload {
    if entries.is_empty() {
        return MessagePayload::text("📭 No games have been suggested yet.");
    }

    let fields = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| EmbedField {
            name: format!("{}. {}", index + 1, entry.game.title),
            value: format!(
                "[🔗]({})\t✅ {}\t❌ {}",
                entry.game.url, entry.interested, entry.not_interested
            ),
            inline: false,
        })
        .collect();

    let buttons: Vec<Button> = entries
        .iter()
        .map(|entry| {
            Button::new(
                Action::Details {
                    game_id: entry.game.id,
                }
                .encode(),
                format!("See Voters: {}", entry.game.title),
                types::BUTTON_PRIMARY,
            )
        })
        .collect();

    let components = buttons
        .chunks(5)
        .take(MAX_ACTION_ROWS)
        .map(|chunk| Component::Row(ActionRow::buttons(chunk.to_vec())))
        .collect();

    MessagePayload {
        embeds: vec![Embed {
            title: "Server Game Votes".to_string(),
            color: LIST_EMBED_COLOR,
            fields,
        }],
        components,
        ..MessagePayload::default()
    }
}

/// The ephemeral voter detail for one game.
#[must_use]
pub fn voter_details(title: &str, tally: &VoteTally) -> MessagePayload {
    MessagePayload::text(format!("**{title}**\n{}", tally.render())).ephemeral()
}

/// The shared poll post: description, timeslot listing with per-slot
/// tallies, and the add-slot / RSVP actions.
#[must_use]
pub fn poll_post(view: &PollView) -> MessagePayload {
    let mut header = format!("📅 Scheduling poll for **{}**", view.game_title);
    if let Some(description) = &view.description {
        let _ = write!(header, "\n{description}");
    }

    let listing = if view.slots.is_empty() {
        "No timeslots yet. Add one with the button below!".to_string()
    } else {
        let mut listing = String::new();
        for (index, slot) in view.slots.iter().enumerate() {
            let _ = writeln!(
                listing,
                "**{}. {} → {}**",
                index + 1,
                format_slot_time(slot.start_time),
                format_slot_time(slot.end_time),
            );
            let _ = writeln!(
                listing,
                "✅ {}  ❓ {}  ❌ {}",
                mention_list(&slot.tally.yes),
                mention_list(&slot.tally.maybe),
                mention_list(&slot.tally.no),
            );
        }
        listing
    };

    MessagePayload {
        flags: Some(types::FLAG_IS_COMPONENTS_V2),
        components: vec![
            Component::Text(TextDisplay::new(header)),
            Component::Text(TextDisplay::new(listing)),
            Component::Row(ActionRow::buttons(vec![
                Button::new(
                    Action::AddTime { poll_id: view.id }.encode(),
                    "Add a timeslot 🕒",
                    types::BUTTON_PRIMARY,
                ),
                Button::new(
                    Action::Rsvp { poll_id: view.id }.encode(),
                    "RSVP 📋",
                    types::BUTTON_SUCCESS,
                ),
            ])),
        ],
        ..MessagePayload::default()
    }
}

/// The private RSVP panel: one yes/maybe/no row per timeslot, capped at the
/// platform's five-row limit.
#[must_use]
pub fn poll_rsvp_panel(view: &PollView) -> MessagePayload {
    let components = view
        .slots
        .iter()
        .take(MAX_ACTION_ROWS)
        .map(|slot| {
            let when = format_slot_time(slot.start_time);
            Component::Row(ActionRow::buttons(vec![
                Button::new(
                    Action::PollVote {
                        timeslot_id: slot.id,
                        choice: RsvpChoice::Yes,
                    }
                    .encode(),
                    format!("✅ {when}"),
                    types::BUTTON_SUCCESS,
                ),
                Button::new(
                    Action::PollVote {
                        timeslot_id: slot.id,
                        choice: RsvpChoice::Maybe,
                    }
                    .encode(),
                    format!("❓ {when}"),
                    types::BUTTON_PRIMARY,
                ),
                Button::new(
                    Action::PollVote {
                        timeslot_id: slot.id,
                        choice: RsvpChoice::No,
                    }
                    .encode(),
                    format!("❌ {when}"),
                    types::BUTTON_DANGER,
                ),
            ]))
        })
        .collect();

    MessagePayload {
        content: Some(format!(
            "Pick your availability for **{}**:",
            view.game_title
        )),
        components,
        ..MessagePayload::default()
    }
    .ephemeral()
}

/// The two-field timeslot submission form.
#[must_use]
pub fn time_slot_modal(poll_id: i64) -> Modal {
    Modal {
        custom_id: action::time_modal_id(poll_id),
        title: "Add a timeslot".to_string(),
        components: vec![
            ActionRow::input(TextInput::short(
                "start_time",
                "Start (YYYY-MM-DD HH:MM)",
                "2026-09-04 18:30",
            )),
            ActionRow::input(TextInput::short(
                "end_time",
                "End (YYYY-MM-DD HH:MM)",
                "2026-09-04 20:30",
            )),
        ],
    }
}

/// Compact day/time rendering used in poll listings, e.g. "Fri Sep 4 18h30".
#[must_use]
pub fn format_slot_time(when: DateTime<Utc>) -> String {
    when.format("%a %b %-d %Hh%M").to_string()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::aggregate::partition_votes;
    use crate::entities::game;
    use chrono::TimeZone;

    fn view_with_empty_tally() -> GameView {
        GameView {
            id: 7,
            title: "Factorio".to_string(),
            url: "https://store.steampowered.com/app/427520/Factorio/".to_string(),
            image_url: Some("https://img.example/header.jpg".to_string()),
            suggested_by: Some("u1".to_string()),
            tally: partition_votes(&[]),
        }
    }

    #[test]
    fn test_lfg_fields_requires_name_for_unrecognized_urls() {
        let err = lfg_fields(None, None, Some("https://img.example")).unwrap_err();
        assert!(matches!(err, Error::Validation { ref message } if message.contains("game_name")));
    }

    #[test]
    fn test_lfg_fields_requires_image_for_unrecognized_urls() {
        let err = lfg_fields(None, Some("Factorio"), None).unwrap_err();
        assert!(matches!(err, Error::Validation { ref message } if message.contains("image_url")));
    }

    #[test]
    fn test_lfg_fields_accepts_resolver_output() {
        let resolved = ResolvedMedia {
            title: Some("Factorio".to_string()),
            image_url: Some("https://img.example/h.jpg".to_string()),
        };
        let (title, image) = lfg_fields(Some(&resolved), None, None).unwrap();
        assert_eq!(title, "Factorio");
        assert_eq!(image.as_deref(), Some("https://img.example/h.jpg"));
    }

    #[test]
    fn test_lfg_fields_degraded_store_lookup_posts_without_image() {
        // A store link whose metadata lookup failed still carries the
        // slug-derived title; the post simply goes out without a gallery.
        let resolved = ResolvedMedia {
            title: Some("Factorio".to_string()),
            image_url: None,
        };
        let (title, image) = lfg_fields(Some(&resolved), None, None).unwrap();
        assert_eq!(title, "Factorio");
        assert_eq!(image, None);
    }

    #[test]
    fn test_lfg_fields_video_link_needs_caller_title() {
        // Video links resolve an image but no canonical title.
        let resolved = ResolvedMedia {
            title: None,
            image_url: Some("https://img.youtube.com/vi/x/maxresdefault.jpg".to_string()),
        };
        assert!(lfg_fields(Some(&resolved), None, None).is_err());
        let (title, _) = lfg_fields(Some(&resolved), Some("Some Game"), None).unwrap();
        assert_eq!(title, "Some Game");
    }

    #[test]
    fn test_lfg_post_structure() {
        let payload = lfg_post(&view_with_empty_tally());

        assert_eq!(payload.flags, Some(types::FLAG_IS_COMPONENTS_V2));
        let texts = payload.text_blocks();
        assert!(texts[0].contains("<@u1>"));
        assert_eq!(
            texts[1],
            "✅ Interested: Nobody yet\n❌ Not Interested: Nobody yet"
        );

        let buttons = payload.buttons();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].custom_id, "vote_yes_7");
        assert_eq!(buttons[1].custom_id, "vote_no_7");
        assert!(matches!(
            payload.components[1],
            Component::Gallery(ref gallery) if gallery.items[0].media.url.contains("header")
        ));
    }

    #[test]
    fn test_lfg_post_without_image_omits_gallery() {
        let mut view = view_with_empty_tally();
        view.image_url = None;
        let payload = lfg_post(&view);
        assert!(
            !payload
                .components
                .iter()
                .any(|component| matches!(component, Component::Gallery(_)))
        );
    }

    #[test]
    fn test_list_summary_empty_placeholder() {
        let payload = list_summary(&[]);
        assert_eq!(
            payload.content.as_deref(),
            Some("📭 No games have been suggested yet.")
        );
        assert!(payload.embeds.is_empty());
    }

    #[test]
    fn test_list_summary_fields_and_buttons() {
        let entries = vec![GameVoteCounts {
            game: game::Model {
                id: 3,
                title: "Factorio".to_string(),
                url: "https://f.example".to_string(),
                image_url: None,
                suggested_by: None,
                created_at: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
            },
            interested: 2,
            not_interested: 1,
        }];

        let payload = list_summary(&entries);
        let embed = &payload.embeds[0];
        assert_eq!(embed.fields[0].name, "1. Factorio");
        assert!(embed.fields[0].value.contains("✅ 2"));
        assert_eq!(payload.buttons()[0].custom_id, "details_3");
    }

    #[test]
    fn test_poll_post_lists_slots_with_tallies() {
        let start = Utc.with_ymd_and_hms(2026, 9, 4, 18, 30, 0).unwrap();
        let view = PollView {
            id: 5,
            game_title: "Factorio".to_string(),
            description: Some("Weekend run".to_string()),
            slots: vec![SlotView {
                id: 11,
                start_time: start,
                end_time: start + chrono::Duration::hours(2),
                tally: SlotTally {
                    timeslot_id: 11,
                    yes: vec!["u1".to_string()],
                    maybe: vec![],
                    no: vec![],
                },
            }],
        };

        let payload = poll_post(&view);
        let texts = payload.text_blocks();
        assert!(texts[0].contains("Factorio"));
        assert!(texts[0].contains("Weekend run"));
        assert!(texts[1].contains("Fri Sep 4 18h30"));
        assert!(texts[1].contains("<@u1>"));

        let buttons = payload.buttons();
        assert_eq!(buttons[0].custom_id, "add_time_5");
        assert_eq!(buttons[1].custom_id, "rsvp_5");
    }

    #[test]
    fn test_rsvp_panel_one_row_per_slot() {
        let start = Utc.with_ymd_and_hms(2026, 9, 4, 18, 30, 0).unwrap();
        let slots = (1..=3)
            .map(|id| SlotView {
                id,
                start_time: start,
                end_time: start,
                tally: SlotTally {
                    timeslot_id: id,
                    yes: vec![],
                    maybe: vec![],
                    no: vec![],
                },
            })
            .collect();
        let view = PollView {
            id: 5,
            game_title: "Factorio".to_string(),
            description: None,
            slots,
        };

        let payload = poll_rsvp_panel(&view);
        assert_eq!(payload.components.len(), 3);
        assert_eq!(payload.flags, Some(types::FLAG_EPHEMERAL));
        let buttons = payload.buttons();
        assert_eq!(buttons.len(), 9);
        assert_eq!(buttons[0].custom_id, "poll_vote_yes_1");
        assert_eq!(buttons[4].custom_id, "poll_vote_maybe_2");
    }

    #[test]
    fn test_time_slot_modal_fields() {
        let modal = time_slot_modal(5);
        assert_eq!(modal.custom_id, "time_modal_5");
        assert_eq!(modal.components.len(), 2);
    }
}
