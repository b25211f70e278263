//! Routes for answering pending destination prompts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use teleporter_core::error::DomainError;
use teleporter_core::interaction::PromptOutcome;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::RequestActor;
use crate::prompt_hub::PendingPromptView;
use crate::state::AppState;

/// Request body for POST /{prompt_id}/respond. Exactly one of `choice` or
/// `cancel` must be given.
#[derive(Debug, Deserialize)]
pub struct RespondRequest {
    /// The picked destination.
    #[serde(default)]
    pub choice: Option<Uuid>,
    /// Dismiss the prompt instead.
    #[serde(default)]
    pub cancel: bool,
}

impl RespondRequest {
    fn outcome(&self) -> Result<PromptOutcome, DomainError> {
        match (self.choice, self.cancel) {
            (Some(id), false) => Ok(PromptOutcome::Chosen(id)),
            (None, true) => Ok(PromptOutcome::Cancelled),
            _ => Err(DomainError::Validation(
                "give either a choice or cancel: true".into(),
            )),
        }
    }
}

/// GET /
///
/// Game masters see every pending prompt; everyone else sees their own.
#[instrument(skip(state, actor), fields(actor_id = %actor.0.id))]
async fn list_prompts(
    State(state): State<AppState>,
    actor: RequestActor,
) -> Result<Json<Vec<PendingPromptView>>, ApiError> {
    let filter = (!actor.0.elevated).then_some(actor.0.id);
    Ok(Json(state.prompts.pending(filter)?))
}

/// POST /{prompt_id}/respond
#[instrument(skip(state, actor, request), fields(actor_id = %actor.0.id))]
async fn respond(
    State(state): State<AppState>,
    actor: RequestActor,
    Path(prompt_id): Path<Uuid>,
    Json(request): Json<RespondRequest>,
) -> Result<StatusCode, ApiError> {
    let outcome = request.outcome()?;
    state.prompts.respond(prompt_id, &actor.0, outcome)?;

    info!(%prompt_id, ?outcome, "prompt answered");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /{prompt_id}
#[instrument(skip(state, actor), fields(actor_id = %actor.0.id))]
async fn dismiss(
    State(state): State<AppState>,
    actor: RequestActor,
    Path(prompt_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state
        .prompts
        .respond(prompt_id, &actor.0, PromptOutcome::Cancelled)?;

    info!(%prompt_id, "prompt dismissed");
    Ok(StatusCode::NO_CONTENT)
}

/// Returns the router for pending prompts.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_prompts))
        .route("/{prompt_id}", delete(dismiss))
        .route("/{prompt_id}/respond", post(respond))
}
