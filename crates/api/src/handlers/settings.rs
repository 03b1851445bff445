//! Handlers for the settings screen's provider API keys.

use axum::extract::State;
use axum::Json;

use fabula_core::settings::{ProviderSettings, SettingsSummary};

use crate::error::AppResult;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// Which provider keys are configured; key material is never echoed.
pub async fn get_settings(State(state): State<AppState>) -> Json<SettingsSummary> {
    let settings = state.settings.read().expect("settings lock poisoned");
    Json(settings.summary())
}

/// PUT /api/v1/settings
///
/// Store the submitted keys in memory. Saving is logged and nothing
/// else happens with the keys.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(input): Json<ProviderSettings>,
) -> AppResult<Json<SettingsSummary>> {
    let mut settings = state.settings.write().expect("settings lock poisoned");
    *settings = input;
    let summary = settings.summary();
    tracing::info!(
        gemini = summary.gemini_key_set,
        imagen3 = summary.imagen3_key_set,
        veo = summary.veo_key_set,
        youtube = summary.youtube_key_set,
        "Provider settings saved"
    );
    Ok(Json(summary))
}
