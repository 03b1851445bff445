//! Handlers for a project's scene stage and generation status polling.

use std::collections::BTreeMap;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fabula_core::error::CoreError;
use fabula_core::types::{DbId, GenerationState};
use fabula_core::Scene;

use crate::engine::GenerationTarget;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

#[derive(Debug, Deserialize, Default)]
pub struct GenerateScenesRequest {
    /// Optional override; workshop bounds (3-20) apply. Without it the
    /// project's own scene count is used, else 5.
    pub count: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct ScenesAccepted {
    pub state: GenerationState,
    /// Number of scenes the run will produce.
    pub count: u32,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSceneRequest {
    pub script: String,
}

/// Generation states for every target of one project.
#[derive(Debug, Serialize)]
pub struct GenerationStatus {
    pub narrative: GenerationState,
    pub characters: GenerationState,
    pub scenes: GenerationState,
    /// Per-scene transition image runs, keyed by scene id.
    pub scene_images: BTreeMap<DbId, GenerationState>,
}

/// POST /api/v1/projects/{id}/scenes/generate
pub async fn generate(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<GenerateScenesRequest>,
) -> AppResult<(StatusCode, Json<ScenesAccepted>)> {
    let count = state.engine.start_scenes(id, input.count)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(ScenesAccepted {
            state: GenerationState::Generating,
            count,
        }),
    ))
}

/// POST /api/v1/projects/{id}/scenes/{scene_id}/images/generate
///
/// Per-scene run; other scenes' runs are unaffected and may be in
/// flight concurrently.
pub async fn generate_images(
    State(state): State<AppState>,
    Path((id, scene_id)): Path<(DbId, DbId)>,
) -> AppResult<(StatusCode, Json<crate::handlers::story::GenerationAccepted>)> {
    state.engine.start_scene_images(id, scene_id)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(crate::handlers::story::GenerationAccepted {
            state: GenerationState::Generating,
        }),
    ))
}

/// PATCH /api/v1/projects/{id}/scenes/{scene_id}
///
/// Replace one scene's script in place.
pub async fn update_script(
    State(state): State<AppState>,
    Path((id, scene_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateSceneRequest>,
) -> AppResult<Json<Scene>> {
    let project = state.store.update_scene_script(id, scene_id, input.script)?;
    scene_from(&project, scene_id)
}

/// POST /api/v1/projects/{id}/scenes/{scene_id}/expand
///
/// Flip the scene's view-only expansion toggle.
pub async fn toggle_expanded(
    State(state): State<AppState>,
    Path((id, scene_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Scene>> {
    let project = state.store.toggle_scene_expanded(id, scene_id)?;
    scene_from(&project, scene_id)
}

/// GET /api/v1/projects/{id}/generation
///
/// Poll every generation target of a project.
pub async fn generation_status(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<GenerationStatus>> {
    let project = state
        .store
        .get(id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project", id }))?;

    let scene_images = project
        .scenes
        .iter()
        .map(|scene| {
            (
                scene.id,
                state.engine.state(GenerationTarget::SceneImages { project: id, scene: scene.id }),
            )
        })
        .collect();

    Ok(Json(GenerationStatus {
        narrative: state.engine.state(GenerationTarget::Narrative { project: id }),
        characters: state.engine.state(GenerationTarget::Characters { project: id }),
        scenes: state.engine.state(GenerationTarget::Scenes { project: id }),
        scene_images,
    }))
}

fn scene_from(project: &fabula_core::Project, scene_id: DbId) -> AppResult<Json<Scene>> {
    project
        .scene(scene_id)
        .cloned()
        .map(Json)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id: scene_id }))
}
