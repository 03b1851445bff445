//! Handlers for the story review screen: the aggregate view model,
//! lightbox navigation, and the log-only voice trigger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use fabula_core::error::CoreError;
use fabula_core::lightbox::Lightbox;
use fabula_core::project::{find_speaker, Character, TransitionImage};
use fabula_core::types::{DbId, ProjectStatus};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// View models
// ---------------------------------------------------------------------------

/// Everything the review screen shows for one project.
#[derive(Debug, Serialize)]
pub struct ReviewView {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub genre: Option<String>,
    pub scene_count: u32,
    pub status: ProjectStatus,
    pub enhanced_narrative: Option<String>,
    pub characters: Vec<Character>,
    pub scenes: Vec<SceneReview>,
}

/// One scene card on the review screen.
#[derive(Debug, Serialize)]
pub struct SceneReview {
    pub id: DbId,
    pub title: String,
    /// The scene script, exposed as the copyable generation prompt.
    pub prompt: String,
    pub images: Vec<TransitionImage>,
    pub dialogs: Vec<DialogReview>,
}

/// One dialog line, annotated with whether its speaker resolves to a
/// character in the project.
#[derive(Debug, Serialize)]
pub struct DialogReview {
    pub id: DbId,
    pub speaker: String,
    pub speaker_known: bool,
    /// `narration` or `dialog`. Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub audio_generated: bool,
}

/// Lightbox position response: the image at `index` plus its circular
/// neighbors.
#[derive(Debug, Serialize)]
pub struct LightboxView {
    pub image: TransitionImage,
    pub index: usize,
    pub len: usize,
    pub next: usize,
    pub prev: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/projects/{id}/review
pub async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<ReviewView>> {
    let project = state
        .store
        .get(id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project", id }))?;

    let scenes = project
        .scenes
        .iter()
        .map(|scene| SceneReview {
            id: scene.id,
            title: scene.title.clone(),
            prompt: scene.script.clone(),
            images: scene.transition_images.clone(),
            dialogs: scene
                .dialogs
                .iter()
                .map(|dialog| DialogReview {
                    id: dialog.id,
                    speaker: dialog.speaker.clone(),
                    speaker_known: find_speaker(&project.characters, &dialog.speaker).is_some(),
                    kind: dialog.kind.clone(),
                    text: dialog.text.clone(),
                    audio_generated: dialog.audio_generated,
                })
                .collect(),
        })
        .collect();

    Ok(Json(ReviewView {
        id: project.id,
        title: project.title.clone(),
        description: project.concept.clone(),
        genre: project.genre.clone(),
        scene_count: project.scene_count,
        status: project.status,
        enhanced_narrative: project.enhanced_narrative.clone(),
        characters: project.characters.clone(),
        scenes,
    }))
}

/// GET /api/v1/projects/{id}/scenes/{scene_id}/images/{index}
///
/// Resolve a lightbox position. `next`/`prev` wrap circularly around
/// the scene's image sequence.
pub async fn lightbox_position(
    State(state): State<AppState>,
    Path((id, scene_id, index)): Path<(DbId, DbId, usize)>,
) -> AppResult<Json<LightboxView>> {
    let project = state
        .store
        .get(id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project", id }))?;
    let scene = project
        .scene(scene_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id: scene_id }))?;

    let lightbox = Lightbox::open(scene.transition_images.len(), index).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "image index {index} is out of range for a sequence of {}",
            scene.transition_images.len()
        )))
    })?;

    let mut next = lightbox;
    next.next();
    let mut prev = lightbox;
    prev.prev();

    Ok(Json(LightboxView {
        image: scene.transition_images[lightbox.index].clone(),
        index: lightbox.index,
        len: lightbox.len,
        next: next.index,
        prev: prev.index,
    }))
}

/// POST /api/v1/projects/{id}/scenes/{scene_id}/dialogs/{dialog_id}/voice
///
/// Trigger voice generation for one dialog line. Only logs the action;
/// no audio is produced or stored.
pub async fn generate_voice(
    State(state): State<AppState>,
    Path((id, scene_id, dialog_id)): Path<(DbId, DbId, DbId)>,
) -> AppResult<StatusCode> {
    let project = state
        .store
        .get(id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project", id }))?;
    let scene = project
        .scene(scene_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id: scene_id }))?;
    let dialog = scene
        .dialogs
        .iter()
        .find(|d| d.id == dialog_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Dialog", id: dialog_id }))?;

    tracing::info!(
        project_id = id,
        scene_id,
        dialog_id,
        speaker = %dialog.speaker,
        "Voice generation requested"
    );

    Ok(StatusCode::ACCEPTED)
}
