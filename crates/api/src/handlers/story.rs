//! Handlers for the story stage: draft enhancement and project-bound
//! re-enhancement.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fabula_core::generation;
use fabula_core::types::{DbId, GenerationState};

use crate::error::AppResult;
use crate::state::AppState;

/// Body of `POST /story/enhance`: the draft screen's working fields,
/// before any project exists.
#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    #[serde(default)]
    pub title: String,
    pub concept: String,
    pub scene_count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct EnhanceResponse {
    pub narrative: String,
}

/// Acknowledgement for an accepted asynchronous generation run.
#[derive(Debug, Serialize)]
pub struct GenerationAccepted {
    pub state: GenerationState,
}

/// POST /api/v1/story/enhance
///
/// Enhance a draft concept. The project does not exist yet, so the
/// result goes back to the caller instead of into the store; the
/// draft screen holds it until commit. An empty concept is rejected
/// and nothing is produced.
pub async fn enhance_draft(
    State(_state): State<AppState>,
    Json(input): Json<EnhanceRequest>,
) -> AppResult<Json<EnhanceResponse>> {
    let scene_count = input.scene_count.unwrap_or(generation::DEFAULT_SCENE_COUNT);
    generation::validate_wizard_scene_count(scene_count)?;
    let narrative = generation::enhance_narrative(&input.title, &input.concept, scene_count)?;
    Ok(Json(EnhanceResponse { narrative }))
}

/// GET /api/v1/story/templates
pub async fn templates() -> Json<Vec<&'static str>> {
    Json(generation::concept_templates().to_vec())
}

/// POST /api/v1/projects/{id}/enhance
///
/// Re-enhance a committed project's narrative from its stored fields.
/// Runs asynchronously; poll the generation status for completion.
pub async fn enhance_project(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<GenerationAccepted>)> {
    state.engine.start_narrative(id)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(GenerationAccepted {
            state: GenerationState::Generating,
        }),
    ))
}
