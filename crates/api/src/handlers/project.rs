//! Handlers for the `/projects` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fabula_core::error::CoreError;
use fabula_core::generation;
use fabula_core::navigation::Screen;
use fabula_core::project::NewProject;
use fabula_core::store::ProjectPatch;
use fabula_core::types::{DbId, ProjectStatus};
use fabula_core::Project;
use fabula_events::{self as events, StudioEvent};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Body of `POST /projects`: the story stage's committed field values.
#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub concept: String,
    pub genre: Option<String>,
    /// Defaults to 5 when omitted; wizard bounds (3-12) apply.
    pub scene_count: Option<u32>,
    /// Output of the enhance step. Committing without one is rejected.
    pub enhanced_narrative: String,
}

/// Compact listing form of a project.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: DbId,
    pub title: String,
    pub concept: String,
    pub genre: Option<String>,
    pub scene_count: u32,
    pub status: ProjectStatus,
}

impl From<&Project> for ProjectSummary {
    fn from(project: &Project) -> Self {
        Self {
            id: project.id,
            title: project.title.clone(),
            concept: project.concept.clone(),
            genre: project.genre.clone(),
            scene_count: project.scene_count,
            status: project.status,
        }
    }
}

/// POST /api/v1/projects
///
/// Commit the story stage: build the project, open it as current, and
/// advance the wizard to the character stage.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateProjectRequest>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let scene_count = input.scene_count.unwrap_or(generation::DEFAULT_SCENE_COUNT);
    generation::validate_wizard_scene_count(scene_count)?;

    if input.enhanced_narrative.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "An enhanced narrative is required before the project can be committed".to_string(),
        )));
    }

    let project = state.store.create(NewProject {
        title: input.title,
        concept: input.concept,
        genre: input.genre,
        scene_count,
        enhanced_narrative: Some(input.enhanced_narrative),
    });

    {
        let mut nav = state.navigator.write().expect("navigator lock poisoned");
        nav.set_current_project(Some(project.id));
        nav.set_story_step(2);
        nav.navigate(Screen::CharacterGeneration);
    }

    state
        .event_bus
        .publish(StudioEvent::new(events::PROJECT_CREATED).with_source("project", project.id));
    tracing::info!(project_id = project.id, title = %project.title, "Project committed");

    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> Json<Vec<ProjectSummary>> {
    let summaries = state.store.list().iter().map(ProjectSummary::from).collect();
    Json(summaries)
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = state
        .store
        .get(id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Project", id }))?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
///
/// Field-level patch. The only way a project's status ever changes.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<ProjectPatch>,
) -> AppResult<Json<Project>> {
    let project = state.store.apply_patch(id, patch)?;
    Ok(Json(project))
}

/// GET /api/v1/project-names
///
/// The one read issued against the optional database backend. Returns
/// 503 in a degraded deployment with no database.
pub async fn list_names(State(state): State<AppState>) -> AppResult<Json<Vec<String>>> {
    let pool = state
        .pool
        .as_ref()
        .ok_or_else(|| AppError::Unavailable("No database configured".to_string()))?;
    let titles = fabula_db::repositories::ProjectRepo::list_titles(pool).await?;
    Ok(Json(titles))
}
