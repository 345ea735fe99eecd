//! The interactions endpoint.
//!
//! One route does everything: verify the request signature over the raw
//! body, parse the interaction, dispatch it, and reply with the outcome's
//! envelope. Deferred follow-up work is spawned off the request path so
//! the acknowledgment always goes out within the platform's deadline.

use crate::errors::Error;
use crate::router::{self, AppContext, Outcome};
use crate::verify;
use crate::wire::interaction::Interaction;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use ed25519_dalek::VerifyingKey;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

/// Everything the endpoint needs per request.
#[derive(Clone)]
pub struct ServerState {
    /// Handler dependencies
    pub ctx: AppContext,
    /// Application public key for signature checks
    pub public_key: VerifyingKey,
}

/// Builds the HTTP application.
pub fn app(state: ServerState) -> Router {
    Router::new()
        .route("/interactions", post(interactions))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn interactions(
    State(state): State<ServerState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let signature = header_str(&headers, "X-Signature-Ed25519");
    let timestamp = header_str(&headers, "X-Signature-Timestamp");
    let (Some(signature), Some(timestamp)) = (signature, timestamp) else {
        return StatusCode::UNAUTHORIZED.into_response();
    };
    if !verify::verify(&state.public_key, signature, timestamp, &body) {
        warn!("request signature did not verify");
        return StatusCode::UNAUTHORIZED.into_response();
    }

    let interaction: Interaction = match serde_json::from_slice(&body) {
        Ok(interaction) => interaction,
        Err(error) => {
            warn!(%error, "unparseable interaction body");
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "malformed interaction" })),
            )
                .into_response();
        }
    };

    match router::route(&state.ctx, &interaction).await {
        Ok(Outcome::Respond(envelope)) => Json(envelope).into_response(),
        Ok(Outcome::Deferred { ack, followup }) => {
            let ctx = state.ctx.clone();
            tokio::spawn(async move {
                if let Err(error) = router::run_followup(&ctx, followup).await {
                    error!(%error, "follow-up work failed");
                }
            });
            Json(ack).into_response()
        }
        Err(Error::Validation { message }) => {
            Json(crate::wire::payload::ResponseEnvelope::ephemeral_text(message)).into_response()
        }
        Err(error) if error.is_protocol_rejection() => {
            warn!(%error, "rejecting interaction");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response()
        }
        Err(error) => {
            error!(%error, "interaction handling failed");
            Json(crate::wire::payload::ResponseEnvelope::ephemeral_text(
                "❌ Something went wrong!",
            ))
            .into_response()
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|value| value.to_str().ok())
}
