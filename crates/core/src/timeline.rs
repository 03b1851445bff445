//! Timeline model for the video editor screen.
//!
//! Purely presentational: fixed mock clips placed at `start`/`duration`
//! offsets across a fixed-length track, and a transport whose controls
//! update local numeric state without driving any media element.

use serde::Serialize;

use crate::types::DbId;

/// Total track length in timeline units. Clip spans are rendered
/// proportionally against this width.
pub const TRACK_LENGTH: f64 = 15.0;

/// Kind of material a clip carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipKind {
    Video,
    Audio,
}

/// Track a clip renders on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Track {
    Video1,
    Video2,
    Audio,
}

/// One clip on the editor timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineClip {
    pub id: DbId,
    pub kind: ClipKind,
    pub name: String,
    pub start: f64,
    pub duration: f64,
}

impl TimelineClip {
    /// Track assignment: the first two video clips fill video track 1,
    /// later video clips spill to track 2, audio has its own track.
    pub fn track(&self) -> Track {
        match self.kind {
            ClipKind::Audio => Track::Audio,
            ClipKind::Video if self.id <= 2 => Track::Video1,
            ClipKind::Video => Track::Video2,
        }
    }

    /// Proportional (offset, width) of this clip across the track, as
    /// percentages of [`TRACK_LENGTH`].
    pub fn span_percent(&self) -> (f64, f64) {
        (
            self.start / TRACK_LENGTH * 100.0,
            self.duration / TRACK_LENGTH * 100.0,
        )
    }
}

/// The fixed mock clip arrangement shown by the editor.
pub fn mock_clips() -> Vec<TimelineClip> {
    vec![
        TimelineClip {
            id: 1,
            kind: ClipKind::Video,
            name: "Scene 1".to_string(),
            start: 0.0,
            duration: 5.0,
        },
        TimelineClip {
            id: 2,
            kind: ClipKind::Video,
            name: "Scene 2".to_string(),
            start: 5.0,
            duration: 4.0,
        },
        TimelineClip {
            id: 3,
            kind: ClipKind::Video,
            name: "Scene 3".to_string(),
            start: 9.0,
            duration: 6.0,
        },
        TimelineClip {
            id: 4,
            kind: ClipKind::Audio,
            name: "Background Music".to_string(),
            start: 0.0,
            duration: 15.0,
        },
    ]
}

// ---------------------------------------------------------------------------
// Transport
// ---------------------------------------------------------------------------

/// Playback state: a play/pause flag, a scrub position, and a volume
/// level. Local numeric state only.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Transport {
    pub playing: bool,
    pub position: f64,
    /// 0-100.
    pub volume: f64,
}

impl Transport {
    pub fn new() -> Self {
        Self {
            playing: false,
            position: 0.0,
            volume: 50.0,
        }
    }

    pub fn toggle_playing(&mut self) {
        self.playing = !self.playing;
    }

    /// Scrub to a position, clamped to the track.
    pub fn seek(&mut self, position: f64) {
        self.position = position.clamp(0.0, TRACK_LENGTH);
    }

    pub fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 100.0);
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
