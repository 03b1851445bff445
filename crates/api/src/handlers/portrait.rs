//! Handlers for the single-character portrait workshop.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use fabula_core::generation;
use fabula_core::types::GenerationState;

use crate::engine::GenerationTarget;
use crate::error::AppResult;
use crate::handlers::story::GenerationAccepted;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PortraitPromptRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub details: String,
}

/// The workshop screen's view model: predefined prompts plus the
/// current outputs and run states.
#[derive(Debug, Serialize)]
pub struct PortraitView {
    pub presets: Vec<&'static str>,
    pub prompt: Option<String>,
    pub image: Option<String>,
    pub prompt_state: GenerationState,
    pub image_state: GenerationState,
}

/// GET /api/v1/portrait
pub async fn get_workshop(State(state): State<AppState>) -> Json<PortraitView> {
    let workshop = state.engine.workshop();
    Json(PortraitView {
        presets: generation::portrait_prompt_presets().to_vec(),
        prompt: workshop.prompt,
        image: workshop.image,
        prompt_state: state.engine.state(GenerationTarget::PortraitPrompt),
        image_state: state.engine.state(GenerationTarget::PortraitImage),
    })
}

/// POST /api/v1/portrait/prompt
pub async fn generate_prompt(
    State(state): State<AppState>,
    Json(input): Json<PortraitPromptRequest>,
) -> AppResult<(StatusCode, Json<GenerationAccepted>)> {
    state.engine.start_portrait_prompt(&input.name, &input.details)?;
    Ok((
        StatusCode::ACCEPTED,
        Json(GenerationAccepted {
            state: GenerationState::Generating,
        }),
    ))
}

/// POST /api/v1/portrait/image
pub async fn generate_image(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<GenerationAccepted>)> {
    state.engine.start_portrait_image()?;
    Ok((
        StatusCode::ACCEPTED,
        Json(GenerationAccepted {
            state: GenerationState::Generating,
        }),
    ))
}
