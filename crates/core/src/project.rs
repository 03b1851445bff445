//! Project, character, and scene entity types.
//!
//! A [`Project`] accumulates data as it moves through the authoring
//! stages: the story stage fills `title`/`concept`/`enhanced_narrative`,
//! the character stage fills `characters`, the scene stage fills
//! `scenes`. Collections are only ever replaced wholesale by their
//! generation actions, never partially appended.

use serde::{Deserialize, Serialize};

use crate::types::{DbId, ProjectStatus, Timestamp};

// ---------------------------------------------------------------------------
// Project
// ---------------------------------------------------------------------------

/// One story authoring unit.
#[derive(Debug, Clone, Serialize)]
pub struct Project {
    /// Immutable once assigned by the store.
    pub id: DbId,
    pub title: String,
    /// User-supplied seed description.
    pub concept: String,
    pub genre: Option<String>,
    /// Intended number of generated scenes. Bounds the generator's
    /// default but `scenes.len()` is not forced to match it.
    pub scene_count: u32,
    /// `None` until the enhance stage completes.
    pub enhanced_narrative: Option<String>,
    pub status: ProjectStatus,
    pub characters: Vec<Character>,
    pub scenes: Vec<Scene>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Build a freshly committed project. Characters and scenes start
    /// empty; status starts as `in-progress`.
    pub fn new(id: DbId, input: NewProject) -> Self {
        let now = chrono::Utc::now();
        Self {
            id,
            title: input.title,
            concept: input.concept,
            genre: input.genre,
            scene_count: input.scene_count,
            enhanced_narrative: input.enhanced_narrative,
            status: ProjectStatus::InProgress,
            characters: Vec::new(),
            scenes: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Look up a character by id.
    pub fn character(&self, id: DbId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Look up a scene by id.
    pub fn scene(&self, id: DbId) -> Option<&Scene> {
        self.scenes.iter().find(|s| s.id == id)
    }
}

/// Field values for committing a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct NewProject {
    pub title: String,
    pub concept: String,
    pub genre: Option<String>,
    pub scene_count: u32,
    pub enhanced_narrative: Option<String>,
}

// ---------------------------------------------------------------------------
// Character
// ---------------------------------------------------------------------------

/// A generated character. `description` is the only field edited after
/// generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub id: DbId,
    pub name: String,
    pub description: String,
    /// `Protagonist`, `Mentor`, `Antagonist`, or free text.
    pub role: String,
    pub voice_generated: bool,
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// A generated scene with its script, transition images, and dialog
/// lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scene {
    pub id: DbId,
    pub title: String,
    pub script: String,
    /// Empty until per-scene image generation completes, then exactly
    /// four placeholders.
    pub transition_images: Vec<TransitionImage>,
    pub dialogs: Vec<DialogLine>,
    /// View-only expansion toggle; not part of the persisted shape.
    #[serde(skip)]
    pub is_expanded: bool,
}

/// One placeholder transition image within a scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionImage {
    pub id: DbId,
    /// Position within the scene: `opening`, `mid`, `climax`, or
    /// `transition`. Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
}

/// One narration or dialog line within a scene.
///
/// `speaker` is matched against [`Character::name`] by string; no
/// referential integrity is enforced, and a line may name a speaker
/// that does not exist in the project's character list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogLine {
    pub id: DbId,
    pub speaker: String,
    /// `narration` or `dialog`. Serialized as `type`.
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
    pub audio_generated: bool,
}

/// Resolve a dialog speaker to a character by exact name match.
///
/// Returns `None` when no character carries the name (e.g. the
/// narrator, or a line written for a character that was regenerated
/// away).
pub fn find_speaker<'a>(characters: &'a [Character], name: &str) -> Option<&'a Character> {
    characters.iter().find(|c| c.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn character(id: DbId, name: &str) -> Character {
        Character {
            id,
            name: name.to_string(),
            description: String::new(),
            role: "Protagonist".to_string(),
            voice_generated: false,
        }
    }

    #[test]
    fn new_project_starts_with_empty_collections() {
        let project = Project::new(
            1,
            NewProject {
                title: "The Last Explorer".to_string(),
                concept: "a space explorer".to_string(),
                genre: None,
                scene_count: 5,
                enhanced_narrative: Some("narrative".to_string()),
            },
        );
        assert!(project.characters.is_empty());
        assert!(project.scenes.is_empty());
        assert_eq!(project.status, crate::types::ProjectStatus::InProgress);
    }

    #[test]
    fn find_speaker_matches_by_exact_name() {
        let characters = vec![character(1, "Alex Chen"), character(2, "Commander Zor")];
        assert_eq!(find_speaker(&characters, "Commander Zor").map(|c| c.id), Some(2));
    }

    #[test]
    fn find_speaker_returns_none_for_unknown_name() {
        let characters = vec![character(1, "Alex Chen")];
        assert!(find_speaker(&characters, "Narrator").is_none());
    }

    #[test]
    fn scene_expansion_flag_is_not_serialized() {
        let scene = Scene {
            id: 1,
            title: "Scene 1".to_string(),
            script: "script".to_string(),
            transition_images: Vec::new(),
            dialogs: Vec::new(),
            is_expanded: true,
        };
        let json = serde_json::to_value(&scene).unwrap();
        assert!(json.get("is_expanded").is_none());
    }
}
