//! Interaction router - turns parsed interactions into outcomes.
//!
//! Every handler returns an [`Outcome`]: either a complete response envelope,
//! or a deferred acknowledgment paired with the follow-up work to run after
//! the envelope is on the wire. Handlers never send anything themselves, so
//! the whole dispatch path is testable against in-memory doubles.

mod commands;
mod components;
mod modal;

use crate::aggregate::{self, PollVoteRecord, VoteRecord};
use crate::composer::{GameView, PollView, SlotView};
use crate::entities::{game, poll};
use crate::errors::{Error, Result};
use crate::resolver::IdentityResolver;
use crate::store::{self, post::PostType};
use crate::sync::sync_game_posts;
use crate::transport::{MessageTransport, SendTarget};
use crate::wire::interaction::{Interaction, InteractionKind, User};
use crate::wire::payload::{MessagePayload, ResponseEnvelope};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::info;

/// Shared dependencies of every handler.
#[derive(Clone)]
pub struct AppContext {
    /// Entity store connection
    pub db: DatabaseConnection,
    /// Outbound message transport
    pub transport: Arc<dyn MessageTransport>,
    /// Link identity resolver
    pub resolver: Arc<dyn IdentityResolver>,
}

impl AppContext {
    /// Bundles the shared dependencies.
    #[must_use]
    pub fn new(
        db: DatabaseConnection,
        transport: Arc<dyn MessageTransport>,
        resolver: Arc<dyn IdentityResolver>,
    ) -> Self {
        Self {
            db,
            transport,
            resolver,
        }
    }
}

/// Deferred work to run after the acknowledgment envelope is sent.
#[derive(Clone, Debug, PartialEq)]
pub enum FollowUp {
    /// Publish a new post through the interaction's webhook and record it
    PublishPost {
        /// Interaction token addressing the deferred original response
        token: String,
        /// Game the post renders
        game_id: i64,
        /// Ledger kind of the post
        post_type: PostType,
        /// The message body
        payload: MessagePayload,
    },
    /// Fan a rebuilt payload out to every recorded post
    SyncPosts {
        /// Game whose posts get updated
        game_id: i64,
        /// Ledger kind to fan out to
        post_type: PostType,
        /// The rebuilt message body
        payload: MessagePayload,
    },
}

/// What the endpoint should do with a handled interaction.
#[derive(Clone, Debug, PartialEq)]
#[must_use]
pub enum Outcome {
    /// Send this envelope; nothing else to do
    Respond(ResponseEnvelope),
    /// Send the acknowledgment, then run the follow-up off the request path
    Deferred {
        /// Envelope to return immediately
        ack: ResponseEnvelope,
        /// Work to run after responding
        followup: FollowUp,
    },
}

/// Dispatches one parsed interaction.
pub async fn route(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    match interaction.classify()? {
        InteractionKind::Ping => Ok(Outcome::Respond(ResponseEnvelope::pong())),
        InteractionKind::Command => commands::handle(ctx, interaction).await,
        InteractionKind::Component => components::handle(ctx, interaction).await,
        InteractionKind::ModalSubmit => modal::handle(ctx, interaction).await,
    }
}

/// Runs the deferred half of an outcome.
pub async fn run_followup(ctx: &AppContext, followup: FollowUp) -> Result<()> {
    match followup {
        FollowUp::PublishPost {
            token,
            game_id,
            post_type,
            payload,
        } => {
            let target = SendTarget::Followup { token };
            let published = ctx.transport.send(&target, &payload).await?;
            store::post::record(
                &ctx.db,
                game_id,
                &published.message_id,
                &published.channel_id,
                post_type,
            )
            .await?;
            info!(game_id, message_id = %published.message_id, "post published");
            Ok(())
        }
        FollowUp::SyncPosts {
            game_id,
            post_type,
            payload,
        } => {
            let outcomes =
                sync_game_posts(&ctx.db, ctx.transport.as_ref(), game_id, post_type, &payload)
                    .await?;
            info!(game_id, targets = outcomes.len(), "posts synchronized");
            Ok(())
        }
    }
}

/// The acting user, required by everything except pings.
fn actor(interaction: &Interaction) -> Result<&User> {
    interaction.actor().ok_or_else(|| Error::Validation {
        message: "❌ Could not identify the requesting user.".to_string(),
    })
}

/// Rebuilds a game's display state from the store.
async fn game_view(db: &DatabaseConnection, game: &game::Model) -> Result<GameView> {
    let rows = store::vote::votes_with_players(db, game.id).await?;
    let tally = aggregate::partition_votes(&VoteRecord::from_rows(&rows));
    Ok(GameView {
        id: game.id,
        title: game.title.clone(),
        url: game.url.clone(),
        image_url: game.image_url.clone(),
        suggested_by: game.suggested_by.clone(),
        tally,
    })
}

/// Rebuilds a poll's display state from the store.
async fn poll_view(db: &DatabaseConnection, poll: &poll::Model) -> Result<PollView> {
    let game = store::game::by_id(db, poll.game_id).await?;
    let slots = store::poll::timeslots(db, poll.id).await?;
    let slot_ids: Vec<i64> = slots.iter().map(|slot| slot.id).collect();

    let rows = store::poll::votes_with_players(db, poll.id).await?;
    let tallies = aggregate::partition_poll_votes(&slot_ids, &PollVoteRecord::from_rows(&rows));

    let slots = slots
        .into_iter()
        .zip(tallies)
        .map(|(slot, tally)| SlotView {
            id: slot.id,
            start_time: slot.start_time,
            end_time: slot.end_time,
            tally,
        })
        .collect();

    Ok(PollView {
        id: poll.id,
        game_title: game.title,
        description: poll.description.clone(),
        slots,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Timeslot, Vote};
    use crate::resolver::ResolvedMedia;
    use crate::test_utils::{MockTransport, StubResolver, setup_test_db};
    use crate::wire::interaction::{
        CommandOption, InteractionData, Member, MessageStub, ModalField, ModalRow,
    };
    use crate::wire::payload::{Component, ResponseData};
    use crate::wire::types;
    use sea_orm::EntityTrait;

    fn test_ctx(
        db: DatabaseConnection,
        media: ResolvedMedia,
    ) -> (AppContext, Arc<MockTransport>) {
        let transport = Arc::new(MockTransport::default());
        let ctx = AppContext::new(
            db,
            Arc::clone(&transport) as Arc<dyn MessageTransport>,
            Arc::new(StubResolver { media }),
        );
        (ctx, transport)
    }

    fn guild_actor(user_id: &str, name: &str) -> Member {
        Member {
            user: User {
                id: user_id.to_string(),
                global_name: Some(name.to_string()),
                username: None,
            },
        }
    }

    fn command(name: &str, options: Vec<(&str, &str)>, user_id: &str) -> Interaction {
        Interaction {
            id: "i1".to_string(),
            token: "tok".to_string(),
            kind: types::INTERACTION_COMMAND,
            data: Some(InteractionData {
                name: Some(name.to_string()),
                custom_id: None,
                options: options
                    .into_iter()
                    .map(|(name, value)| CommandOption {
                        name: name.to_string(),
                        value: serde_json::Value::String(value.to_string()),
                    })
                    .collect(),
                components: vec![],
            }),
            member: Some(guild_actor(user_id, "Alice")),
            user: None,
            context: Some(0),
            message: None,
        }
    }

    fn component_click(custom_id: &str, user_id: &str) -> Interaction {
        Interaction {
            id: "i2".to_string(),
            token: "tok".to_string(),
            kind: types::INTERACTION_COMPONENT,
            data: Some(InteractionData {
                custom_id: Some(custom_id.to_string()),
                ..InteractionData::default()
            }),
            member: Some(guild_actor(user_id, "Alice")),
            user: None,
            context: Some(0),
            message: Some(MessageStub {
                id: "m0".to_string(),
            }),
        }
    }

    fn modal_submit(custom_id: &str, fields: Vec<(&str, &str)>, user_id: &str) -> Interaction {
        Interaction {
            id: "i3".to_string(),
            token: "tok".to_string(),
            kind: types::INTERACTION_MODAL_SUBMIT,
            data: Some(InteractionData {
                custom_id: Some(custom_id.to_string()),
                components: fields
                    .into_iter()
                    .map(|(id, value)| ModalRow {
                        components: vec![ModalField {
                            custom_id: id.to_string(),
                            value: Some(value.to_string()),
                        }],
                    })
                    .collect(),
                ..InteractionData::default()
            }),
            member: Some(guild_actor(user_id, "Alice")),
            user: None,
            context: Some(0),
            message: None,
        }
    }

    fn steam_media() -> ResolvedMedia {
        ResolvedMedia {
            title: Some("Factorio".to_string()),
            image_url: Some("https://img.example/header.jpg".to_string()),
        }
    }

    #[tokio::test]
    async fn test_ping_pongs() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, ResolvedMedia::default());
        let ping = Interaction {
            id: "p".to_string(),
            token: String::new(),
            kind: types::INTERACTION_PING,
            data: None,
            member: None,
            user: None,
            context: None,
            message: None,
        };

        let outcome = route(&ctx, &ping).await?;
        assert_eq!(outcome, Outcome::Respond(ResponseEnvelope::pong()));
        Ok(())
    }

    #[tokio::test]
    async fn test_lfg_creates_game_and_publishes_post() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, transport) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";

        let outcome = route(&ctx, &command("lfg", vec![("game_url", url)], "u1")).await?;
        let Outcome::Deferred { ack, followup } = outcome else {
            panic!("expected deferred outcome");
        };
        assert_eq!(ack, ResponseEnvelope::deferred_channel_message());

        let game = store::game::by_title(&ctx.db, "Factorio").await?.unwrap();
        assert_eq!(game.url, url);
        assert_eq!(game.suggested_by.as_deref(), Some("u1"));

        let FollowUp::PublishPost {
            game_id, payload, ..
        } = &followup
        else {
            panic!("expected publish follow-up");
        };
        assert_eq!(*game_id, game.id);
        assert_eq!(
            payload.text_blocks()[1],
            "✅ Interested: Nobody yet\n❌ Not Interested: Nobody yet"
        );

        run_followup(&ctx, followup).await?;
        assert_eq!(transport.sent().len(), 1);
        let posts = store::post::for_game(&ctx.db, game.id, PostType::Lfg).await?;
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].message_id, "mock-1");
        Ok(())
    }

    #[tokio::test]
    async fn test_lfg_with_degraded_store_lookup_posts_without_gallery() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(
            db,
            ResolvedMedia {
                title: Some("Factorio".to_string()),
                image_url: None,
            },
        );
        let url = "https://store.steampowered.com/app/427520/Factorio/";

        let outcome = route(&ctx, &command("lfg", vec![("game_url", url)], "u1")).await?;
        let Outcome::Deferred { followup, .. } = outcome else {
            panic!("expected deferred outcome");
        };

        let game = store::game::by_title(&ctx.db, "Factorio").await?.unwrap();
        assert_eq!(game.image_url, None);

        let FollowUp::PublishPost { payload, .. } = &followup else {
            panic!("expected publish follow-up");
        };
        assert!(
            !payload
                .components
                .iter()
                .any(|component| matches!(component, Component::Gallery(_)))
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_lfg_without_title_is_rejected_before_any_write() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, ResolvedMedia::default());

        let err = route(
            &ctx,
            &command("lfg", vec![("game_url", "https://example.com/game")], "u1"),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(store::game::by_title(&ctx.db, "").await?.is_none());
        assert!(
            store::game::list_with_vote_counts(&ctx.db).await?.is_empty()
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_double_vote_collapses_to_one_row_and_one_mention() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";
        let suggested = route(&ctx, &command("lfg", vec![("game_url", url)], "u1")).await?;
        assert!(matches!(suggested, Outcome::Deferred { .. }));
        let game = store::game::by_title(&ctx.db, "Factorio").await?.unwrap();

        let click = component_click(&format!("vote_yes_{}", game.id), "u9");
        let first = route(&ctx, &click).await?;
        assert!(matches!(first, Outcome::Deferred { .. }));
        let outcome = route(&ctx, &click).await?;

        assert_eq!(Vote::find().all(&ctx.db).await?.len(), 1);
        let Outcome::Deferred { ack, followup } = outcome else {
            panic!("expected deferred outcome");
        };
        assert_eq!(ack, ResponseEnvelope::deferred_update());
        let FollowUp::SyncPosts { payload, .. } = &followup else {
            panic!("expected sync follow-up");
        };
        assert_eq!(
            payload.text_blocks()[1],
            "✅ Interested: <@u9>\n❌ Not Interested: Nobody yet"
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_details_click_is_ephemeral() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";
        let suggested = route(&ctx, &command("lfg", vec![("game_url", url)], "u1")).await?;
        assert!(matches!(suggested, Outcome::Deferred { .. }));
        let game = store::game::by_title(&ctx.db, "Factorio").await?.unwrap();

        let outcome = route(&ctx, &component_click(&format!("details_{}", game.id), "u2")).await?;
        let Outcome::Respond(envelope) = outcome else {
            panic!("expected immediate response");
        };
        let Some(ResponseData::Message(payload)) = envelope.data else {
            panic!("expected message data");
        };
        assert_eq!(payload.flags, Some(types::FLAG_EPHEMERAL));
        assert!(payload.content.unwrap().contains("Nobody yet"));
        Ok(())
    }

    #[tokio::test]
    async fn test_list_responds_immediately_without_recording() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, transport) = test_ctx(db, steam_media());

        let outcome = route(&ctx, &command("list", vec![], "u1")).await?;
        let Outcome::Respond(envelope) = outcome else {
            panic!("expected immediate response");
        };
        assert_eq!(envelope.kind, types::RESPONSE_CHANNEL_MESSAGE);
        assert!(transport.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_command_is_a_protocol_rejection() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, ResolvedMedia::default());

        let err = route(&ctx, &command("frobnicate", vec![], "u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownCommand { .. }));
        assert!(err.is_protocol_rejection());
        Ok(())
    }

    #[tokio::test]
    async fn test_poll_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, transport) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";

        // Open the poll and publish its post.
        let outcome = route(&ctx, &command("poll", vec![("game_url", url)], "u1")).await?;
        let Outcome::Deferred { followup, .. } = outcome else {
            panic!("expected deferred outcome");
        };
        run_followup(&ctx, followup).await?;
        let game = store::game::by_title(&ctx.db, "Factorio").await?.unwrap();
        let posts = store::post::for_game(&ctx.db, game.id, PostType::Poll).await?;
        assert_eq!(posts.len(), 1);

        // The add-time button opens the modal.
        let outcome = route(&ctx, &component_click("add_time_1", "u1")).await?;
        let Outcome::Respond(envelope) = outcome else {
            panic!("expected modal response");
        };
        assert_eq!(envelope.kind, types::RESPONSE_MODAL);

        // Submitting the modal appends a slot and syncs the poll post.
        let outcome = route(
            &ctx,
            &modal_submit(
                "time_modal_1",
                vec![
                    ("start_time", "2026-09-04 18:30"),
                    ("end_time", "2026-09-04 20:30"),
                ],
                "u1",
            ),
        )
        .await?;
        let Outcome::Deferred { followup, .. } = outcome else {
            panic!("expected deferred outcome");
        };
        run_followup(&ctx, followup).await?;
        let slots = store::poll::timeslots(&ctx.db, 1).await?;
        assert_eq!(slots.len(), 1);
        assert_eq!(transport.edited_ids(), vec!["mock-1"]);

        // An RSVP click lands in the slot's bucket and syncs again.
        let outcome = route(
            &ctx,
            &component_click(&format!("poll_vote_yes_{}", slots[0].id), "u2"),
        )
        .await?;
        let Outcome::Deferred { followup, .. } = outcome else {
            panic!("expected deferred outcome");
        };
        let FollowUp::SyncPosts { payload, .. } = &followup else {
            panic!("expected sync follow-up");
        };
        assert!(payload.text_blocks()[1].contains("<@u2>"));
        Ok(())
    }

    #[tokio::test]
    async fn test_unparsable_modal_time_creates_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";
        let opened = route(&ctx, &command("poll", vec![("game_url", url)], "u1")).await?;
        assert!(matches!(opened, Outcome::Deferred { .. }));

        let err = route(
            &ctx,
            &modal_submit(
                "time_modal_1",
                vec![("start_time", "next friday"), ("end_time", "later")],
                "u1",
            ),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(Timeslot::find().all(&ctx.db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_end_before_start_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, steam_media());
        let url = "https://store.steampowered.com/app/427520/Factorio/";
        let opened = route(&ctx, &command("poll", vec![("game_url", url)], "u1")).await?;
        assert!(matches!(opened, Outcome::Deferred { .. }));

        let err = route(
            &ctx,
            &modal_submit(
                "time_modal_1",
                vec![
                    ("start_time", "2026-09-04 20:30"),
                    ("end_time", "2026-09-04 18:30"),
                ],
                "u1",
            ),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(Timeslot::find().all(&ctx.db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_custom_id_is_rejected() -> Result<()> {
        let db = setup_test_db().await?;
        let (ctx, _) = test_ctx(db, ResolvedMedia::default());

        let err = route(&ctx, &component_click("mystery_button_9", "u1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::UnknownAction { .. }));
        Ok(())
    }
}
