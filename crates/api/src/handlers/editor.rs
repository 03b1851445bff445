//! Handlers for the video editor screen.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use fabula_core::timeline::{mock_clips, ClipKind, Track, Transport, TRACK_LENGTH};
use fabula_core::types::DbId;

use crate::error::AppResult;
use crate::state::AppState;

/// One clip with its resolved track and proportional placement.
#[derive(Debug, Serialize)]
pub struct ClipView {
    pub id: DbId,
    pub kind: ClipKind,
    pub name: String,
    pub start: f64,
    pub duration: f64,
    pub track: Track,
    /// Percent offset from the left edge of the track.
    pub offset_percent: f64,
    /// Percent width across the track.
    pub width_percent: f64,
}

/// The editor screen's view model.
#[derive(Debug, Serialize)]
pub struct EditorView {
    pub track_length: f64,
    pub clips: Vec<ClipView>,
    pub transport: Transport,
}

/// Body of `PUT /editor/transport`. `None` fields are left unchanged.
#[derive(Debug, Deserialize)]
pub struct TransportRequest {
    pub playing: Option<bool>,
    pub position: Option<f64>,
    pub volume: Option<f64>,
}

/// Build the editor view model from the fixed mock clips and the
/// current transport state.
pub fn editor_view(state: &AppState) -> EditorView {
    let transport = *state.transport.read().expect("transport lock poisoned");
    let clips = mock_clips()
        .into_iter()
        .map(|clip| {
            let (offset_percent, width_percent) = clip.span_percent();
            ClipView {
                track: clip.track(),
                id: clip.id,
                kind: clip.kind,
                name: clip.name,
                start: clip.start,
                duration: clip.duration,
                offset_percent,
                width_percent,
            }
        })
        .collect();

    EditorView {
        track_length: TRACK_LENGTH,
        clips,
        transport,
    }
}

/// GET /api/v1/editor
pub async fn get_editor(State(state): State<AppState>) -> Json<EditorView> {
    Json(editor_view(&state))
}

/// PUT /api/v1/editor/transport
///
/// Update play/pause, scrub position, and volume. Numeric state only;
/// nothing is rendered or played.
pub async fn update_transport(
    State(state): State<AppState>,
    Json(input): Json<TransportRequest>,
) -> AppResult<Json<Transport>> {
    let mut transport = state.transport.write().expect("transport lock poisoned");
    if let Some(playing) = input.playing {
        transport.playing = playing;
    }
    if let Some(position) = input.position {
        transport.seek(position);
    }
    if let Some(volume) = input.volume {
        transport.set_volume(volume);
    }
    Ok(Json(*transport))
}
