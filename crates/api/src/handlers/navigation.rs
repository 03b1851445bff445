//! Handlers for the navigation state: active screen, current project,
//! wizard step.

use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use fabula_core::navigation::{MenuItem, Navigator, Screen, SIDEBAR_MENU};
use fabula_core::types::DbId;

use crate::error::AppResult;
use crate::state::AppState;

/// Body of `PUT /navigation`. `None` fields are left unchanged.
///
/// Deliberately unguarded: any screen may be activated at any time,
/// with or without a current project, and nothing validates that the
/// project id exists.
#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub screen: Option<Screen>,
    pub current_project: Option<DbId>,
    /// Set to clear the current project selection.
    #[serde(default)]
    pub clear_project: bool,
    pub story_step: Option<u8>,
}

/// GET /api/v1/navigation
pub async fn get_navigation(State(state): State<AppState>) -> Json<Navigator> {
    let nav = state.navigator.read().expect("navigator lock poisoned");
    Json(nav.clone())
}

/// GET /api/v1/navigation/menu
pub async fn get_menu() -> Json<Vec<MenuItem>> {
    Json(SIDEBAR_MENU.to_vec())
}

/// PUT /api/v1/navigation
pub async fn update_navigation(
    State(state): State<AppState>,
    Json(input): Json<NavigationRequest>,
) -> AppResult<Json<Navigator>> {
    let mut nav = state.navigator.write().expect("navigator lock poisoned");
    if let Some(screen) = input.screen {
        nav.navigate(screen);
    }
    if input.clear_project {
        nav.set_current_project(None);
    } else if let Some(project) = input.current_project {
        nav.set_current_project(Some(project));
    }
    if let Some(step) = input.story_step {
        nav.set_story_step(step);
    }
    Ok(Json(nav.clone()))
}
