//! Handlers for a project's character stage.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use fabula_core::error::CoreError;
use fabula_core::types::{DbId, GenerationState};
use fabula_core::Character;

use crate::error::{AppError, AppResult};
use crate::handlers::story::GenerationAccepted;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateCharacterRequest {
    pub description: String,
}

/// POST /api/v1/projects/{id}/characters/generate
///
/// Produce the fixed character set. A re-run overwrites the previous
/// set wholesale, including edited descriptions.
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<GenerationAccepted>)> {
    state.engine.start_characters(id)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(GenerationAccepted {
            state: GenerationState::Generating,
        }),
    ))
}

/// PATCH /api/v1/projects/{id}/characters/{character_id}
///
/// Replace one character's description in place. All other characters
/// are untouched.
pub async fn update_description(
    State(state): State<AppState>,
    Path((id, character_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateCharacterRequest>,
) -> AppResult<Json<Character>> {
    let project = state
        .store
        .update_character_description(id, character_id, input.description)?;
    let character = project
        .character(character_id)
        .cloned()
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;
    Ok(Json(character))
}
