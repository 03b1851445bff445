pub mod health;
pub mod pages;

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /story/enhance                                    enhance a draft concept (POST)
/// /story/templates                                  concept seed templates (GET)
///
/// /projects                                         list (GET), commit (POST)
/// /projects/{id}                                    get (GET), patch fields (PUT)
/// /projects/{id}/enhance                            re-enhance narrative (POST)
/// /projects/{id}/generation                         poll generation states (GET)
/// /projects/{id}/review                             review view model (GET)
///
/// /projects/{id}/characters/generate                generate character set (POST)
/// /projects/{id}/characters/{character_id}          update description (PATCH)
///
/// /projects/{id}/scenes/generate                    generate scenes (POST)
/// /projects/{id}/scenes/{scene_id}                  update script (PATCH)
/// /projects/{id}/scenes/{scene_id}/expand           toggle expansion (POST)
/// /projects/{id}/scenes/{scene_id}/images/generate  generate images (POST)
/// /projects/{id}/scenes/{scene_id}/images/{index}   lightbox position (GET)
/// /projects/{id}/scenes/{scene_id}/dialogs/{dialog_id}/voice   voice trigger (POST)
///
/// /editor                                           editor view model (GET)
/// /editor/transport                                 update transport (PUT)
///
/// /settings                                         key summary (GET), save keys (PUT)
///
/// /navigation                                       navigator state (GET, PUT)
/// /navigation/menu                                  sidebar entries (GET)
///
/// /portrait                                         workshop view model (GET)
/// /portrait/prompt                                  generate prompt (POST)
/// /portrait/image                                   generate image (POST)
///
/// /project-names                                    titles from the optional DB (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Story stage.
        .route("/story/enhance", post(handlers::story::enhance_draft))
        .route("/story/templates", get(handlers::story::templates))
        // Projects.
        .route(
            "/projects",
            get(handlers::project::list).post(handlers::project::create),
        )
        .route(
            "/projects/{id}",
            get(handlers::project::get_by_id).put(handlers::project::update),
        )
        .route("/projects/{id}/enhance", post(handlers::story::enhance_project))
        .route("/projects/{id}/generation", get(handlers::scene::generation_status))
        .route("/projects/{id}/review", get(handlers::review::get_review))
        // Character stage.
        .route(
            "/projects/{id}/characters/generate",
            post(handlers::character::generate),
        )
        .route(
            "/projects/{id}/characters/{character_id}",
            patch(handlers::character::update_description),
        )
        // Scene stage.
        .route("/projects/{id}/scenes/generate", post(handlers::scene::generate))
        .route(
            "/projects/{id}/scenes/{scene_id}",
            patch(handlers::scene::update_script),
        )
        .route(
            "/projects/{id}/scenes/{scene_id}/expand",
            post(handlers::scene::toggle_expanded),
        )
        .route(
            "/projects/{id}/scenes/{scene_id}/images/generate",
            post(handlers::scene::generate_images),
        )
        .route(
            "/projects/{id}/scenes/{scene_id}/images/{index}",
            get(handlers::review::lightbox_position),
        )
        .route(
            "/projects/{id}/scenes/{scene_id}/dialogs/{dialog_id}/voice",
            post(handlers::review::generate_voice),
        )
        // Editor.
        .route("/editor", get(handlers::editor::get_editor))
        .route("/editor/transport", put(handlers::editor::update_transport))
        // Settings.
        .route(
            "/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        // Navigation.
        .route(
            "/navigation",
            get(handlers::navigation::get_navigation).put(handlers::navigation::update_navigation),
        )
        .route("/navigation/menu", get(handlers::navigation::get_menu))
        // Portrait workshop.
        .route("/portrait", get(handlers::portrait::get_workshop))
        .route("/portrait/prompt", post(handlers::portrait::generate_prompt))
        .route("/portrait/image", post(handlers::portrait::generate_image))
        // Optional persistence backend.
        .route("/project-names", get(handlers::project::list_names))
}
