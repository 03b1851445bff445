//! Shared type aliases and status enums.

use serde::{Deserialize, Serialize};

/// Entity identifier. Project ids are seeded from the epoch-millis clock
/// at store construction so ids order by creation time; child entities
/// (characters, scenes, images) use small per-collection ordinals.
pub type DbId = i64;

/// UTC timestamp used on all entities.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

// ---------------------------------------------------------------------------
// ProjectStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a project.
///
/// A project is created as [`ProjectStatus::InProgress`] when the story
/// stage commits it. Nothing advances it to `Complete` automatically;
/// status changes only through an explicit update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    Draft,
    InProgress,
    Complete,
}

impl ProjectStatus {
    /// Wire representation, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Draft => "draft",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Complete => "complete",
        }
    }
}

// ---------------------------------------------------------------------------
// GenerationState
// ---------------------------------------------------------------------------

/// Status of one asynchronous generation target.
///
/// A single tagged enum keyed by target replaces per-id boolean flag
/// maps, so a target cannot be simultaneously "generating" and "ready".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationState {
    /// No run has been started for this target.
    #[default]
    Idle,
    /// A run is in flight; starting another is a conflict.
    Generating,
    /// The last run completed and its output was applied.
    Ready,
    /// The last run failed; the target may be re-triggered.
    Failed,
}

impl GenerationState {
    /// Whether a new run may be started for this target.
    pub fn can_start(&self) -> bool {
        !matches!(self, GenerationState::Generating)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_kebab_case() {
        let json = serde_json::to_string(&ProjectStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");
        let back: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ProjectStatus::InProgress);
    }

    #[test]
    fn generation_state_defaults_to_idle() {
        assert_eq!(GenerationState::default(), GenerationState::Idle);
    }

    #[test]
    fn only_generating_blocks_a_new_start() {
        assert!(GenerationState::Idle.can_start());
        assert!(GenerationState::Ready.can_start());
        assert!(GenerationState::Failed.can_start());
        assert!(!GenerationState::Generating.can_start());
    }
}
