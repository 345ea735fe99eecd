//! Slash command handlers.

use super::{AppContext, FollowUp, Outcome, actor, game_view, poll_view};
use crate::composer;
use crate::errors::{Error, Result};
use crate::store::{self, post::PostType};
use crate::wire::interaction::Interaction;
use crate::wire::payload::ResponseEnvelope;
use tracing::info;

pub async fn handle(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    let name = interaction
        .data
        .as_ref()
        .and_then(|data| data.name.as_deref())
        .unwrap_or_default();

    match name {
        "lfg" => lfg(ctx, interaction).await,
        "list" => list(ctx).await,
        "poll" => poll(ctx, interaction).await,
        other => Err(Error::UnknownCommand {
            name: other.to_string(),
        }),
    }
}

/// `/lfg`: suggest a game and publish its vote post.
async fn lfg(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    let user = actor(interaction)?;
    let url = require_option(interaction, "game_url")?;

    let resolved = ctx.resolver.resolve(url).await?;
    let (title, image) = composer::lfg_fields(
        Some(&resolved),
        interaction.option_str("game_name"),
        interaction.option_str("image_url"),
    )?;

    store::player::get_or_create(&ctx.db, &user.id, user.display_name()).await?;
    let game =
        store::game::get_or_create(&ctx.db, &title, url, image.as_deref(), Some(&user.id))
            .await?;
    info!(game_id = game.id, title = %game.title, "game suggested");

    let view = game_view(&ctx.db, &game).await?;
    Ok(Outcome::Deferred {
        ack: ResponseEnvelope::deferred_channel_message(),
        followup: FollowUp::PublishPost {
            token: interaction.token.clone(),
            game_id: game.id,
            post_type: PostType::Lfg,
            payload: composer::lfg_post(&view),
        },
    })
}

/// `/list`: the transient vote summary. Never recorded in the post ledger.
async fn list(ctx: &AppContext) -> Result<Outcome> {
    let entries = store::game::list_with_vote_counts(&ctx.db).await?;
    Ok(Outcome::Respond(ResponseEnvelope::channel_message(
        composer::list_summary(&entries),
    )))
}

/// `/poll`: open a scheduling poll for a game and publish its post.
async fn poll(ctx: &AppContext, interaction: &Interaction) -> Result<Outcome> {
    let user = actor(interaction)?;
    let url = require_option(interaction, "game_url")?;

    let resolved = ctx.resolver.resolve(url).await?;
    let title = resolved
        .title
        .as_deref()
        .or(interaction.option_str("game_name"))
        .ok_or_else(|| Error::Validation {
            message: "❌ If the game is not from steam you must provide a game name \
                      by adding the game_name argument in the command."
                .to_string(),
        })?;

    let creator = store::player::get_or_create(&ctx.db, &user.id, user.display_name()).await?;
    let game = store::game::get_or_create(
        &ctx.db,
        title,
        url,
        resolved.image_url.as_deref(),
        Some(&user.id),
    )
    .await?;

    let poll = store::poll::create(
        &ctx.db,
        game.id,
        creator.id,
        interaction.option_str("description"),
    )
    .await?;
    info!(poll_id = poll.id, game_id = game.id, "poll opened");

    let view = poll_view(&ctx.db, &poll).await?;
    Ok(Outcome::Deferred {
        ack: ResponseEnvelope::deferred_channel_message(),
        followup: FollowUp::PublishPost {
            token: interaction.token.clone(),
            game_id: game.id,
            post_type: PostType::Poll,
            payload: composer::poll_post(&view),
        },
    })
}

fn require_option<'a>(interaction: &'a Interaction, name: &str) -> Result<&'a str> {
    interaction
        .option_str(name)
        .ok_or_else(|| Error::Validation {
            message: format!("❌ The {name} argument is required."),
        })
}
