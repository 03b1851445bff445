//! Top-level page routes.
//!
//! ```text
//! GET /          dashboard view model
//! GET /settings  settings view model
//! GET /editor    editor view model
//! ```
//!
//! Each page renders the JSON view model its screen consumes.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use fabula_core::navigation::{MenuItem, Navigator, SIDEBAR_MENU};
use fabula_core::settings::SettingsSummary;

use crate::handlers::editor::{editor_view, EditorView};
use crate::handlers::project::ProjectSummary;
use crate::state::AppState;

/// One step of the dashboard's quick-start strip.
#[derive(Debug, Serialize)]
pub struct QuickStartStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// The dashboard page's view model.
#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub menu: Vec<MenuItem>,
    pub quick_start: Vec<QuickStartStep>,
    pub recent_projects: Vec<ProjectSummary>,
    pub navigation: Navigator,
}

async fn dashboard(State(state): State<AppState>) -> Json<DashboardView> {
    let recent_projects = state.store.list().iter().map(ProjectSummary::from).collect();
    let navigation = state
        .navigator
        .read()
        .expect("navigator lock poisoned")
        .clone();

    Json(DashboardView {
        menu: SIDEBAR_MENU.to_vec(),
        quick_start: vec![
            QuickStartStep {
                title: "1. Create Story",
                description: "Start with your story concept",
            },
            QuickStartStep {
                title: "2. Generate Characters",
                description: "AI creates your characters",
            },
            QuickStartStep {
                title: "3. Create Scenes",
                description: "Generate video scenes",
            },
        ],
        recent_projects,
        navigation,
    })
}

async fn settings_page(State(state): State<AppState>) -> Json<SettingsSummary> {
    let settings = state.settings.read().expect("settings lock poisoned");
    Json(settings.summary())
}

async fn editor_page(State(state): State<AppState>) -> Json<EditorView> {
    Json(editor_view(&state))
}

/// Mount page routes at the router root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/settings", get(settings_page))
        .route("/editor", get(editor_page))
}
