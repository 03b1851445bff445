//! In-memory project store.
//!
//! The single owning home for project state, replacing a shared mutable
//! reference graph: every consumer goes through `get`/`list`/`update`
//! on this store rather than holding its own copy. Contents live for
//! the lifetime of the process only; the optional database backend is
//! never on this path.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::RwLock;

use serde::Deserialize;

use crate::error::CoreError;
use crate::project::{Character, NewProject, Project, Scene, TransitionImage};
use crate::types::{DbId, ProjectStatus};

/// Partial update applied to a project's own fields. `None` leaves the
/// field unchanged. Status changes only happen here; nothing advances
/// a project's status automatically.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub concept: Option<String>,
    pub genre: Option<String>,
    pub status: Option<ProjectStatus>,
}

struct Inner {
    projects: HashMap<DbId, Project>,
    /// Insertion order, oldest first.
    order: Vec<DbId>,
}

/// Thread-safe in-memory store keyed by project id.
///
/// Ids are allocated from a monotonic counter seeded with the
/// epoch-millis clock at construction, so they order by creation time
/// across the store's lifetime.
pub struct ProjectStore {
    inner: RwLock<Inner>,
    next_id: AtomicI64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                projects: HashMap::new(),
                order: Vec::new(),
            }),
            next_id: AtomicI64::new(chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Create a project from committed stage values. Assigns the id and
    /// starts the project as `in-progress` with empty collections.
    pub fn create(&self, input: NewProject) -> Project {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let project = Project::new(id, input);
        self.put(project.clone());
        project
    }

    /// Insert a fully formed project, e.g. sample data at startup.
    /// Replaces any existing project with the same id.
    pub fn put(&self, project: Project) {
        let mut inner = self.inner.write().expect("project store lock poisoned");
        let id = project.id;
        if inner.projects.insert(id, project).is_none() {
            inner.order.push(id);
        }
    }

    pub fn get(&self, id: DbId) -> Option<Project> {
        let inner = self.inner.read().expect("project store lock poisoned");
        inner.projects.get(&id).cloned()
    }

    /// All projects, most recently created first.
    pub fn list(&self) -> Vec<Project> {
        let inner = self.inner.read().expect("project store lock poisoned");
        inner
            .order
            .iter()
            .rev()
            .filter_map(|id| inner.projects.get(id).cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().expect("project store lock poisoned").order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a closure to one project under the write lock, bumping
    /// `updated_at`. Returns the updated copy.
    pub fn update<F>(&self, id: DbId, mutate: F) -> Result<Project, CoreError>
    where
        F: FnOnce(&mut Project) -> Result<(), CoreError>,
    {
        let mut inner = self.inner.write().expect("project store lock poisoned");
        let project = inner
            .projects
            .get_mut(&id)
            .ok_or(CoreError::NotFound { entity: "Project", id })?;
        mutate(project)?;
        project.updated_at = chrono::Utc::now();
        Ok(project.clone())
    }

    /// Apply a field-level patch (title/concept/genre/status).
    pub fn apply_patch(&self, id: DbId, patch: ProjectPatch) -> Result<Project, CoreError> {
        self.update(id, |project| {
            if let Some(title) = patch.title {
                project.title = title;
            }
            if let Some(concept) = patch.concept {
                project.concept = concept;
            }
            if let Some(genre) = patch.genre {
                project.genre = Some(genre);
            }
            if let Some(status) = patch.status {
                project.status = status;
            }
            Ok(())
        })
    }

    // -- Stage results -----------------------------------------------------

    /// Record the enhanced narrative produced by the story stage.
    pub fn set_narrative(&self, id: DbId, narrative: String) -> Result<Project, CoreError> {
        self.update(id, |project| {
            project.enhanced_narrative = Some(narrative);
            Ok(())
        })
    }

    /// Overwrite the character list wholesale. A re-generation replaces
    /// any previous set, including edited descriptions; there is no
    /// merge.
    pub fn replace_characters(
        &self,
        id: DbId,
        characters: Vec<Character>,
    ) -> Result<Project, CoreError> {
        self.update(id, |project| {
            project.characters = characters;
            Ok(())
        })
    }

    /// Overwrite the scene list wholesale.
    pub fn replace_scenes(&self, id: DbId, scenes: Vec<Scene>) -> Result<Project, CoreError> {
        self.update(id, |project| {
            project.scenes = scenes;
            Ok(())
        })
    }

    // -- Single-entity mutations -------------------------------------------

    /// Replace one character's description in place. Identity and order
    /// are preserved; every other character is untouched.
    pub fn update_character_description(
        &self,
        id: DbId,
        character_id: DbId,
        description: String,
    ) -> Result<Project, CoreError> {
        self.update(id, |project| {
            let character = project
                .characters
                .iter_mut()
                .find(|c| c.id == character_id)
                .ok_or(CoreError::NotFound { entity: "Character", id: character_id })?;
            character.description = description;
            Ok(())
        })
    }

    /// Replace one scene's script in place.
    pub fn update_scene_script(
        &self,
        id: DbId,
        scene_id: DbId,
        script: String,
    ) -> Result<Project, CoreError> {
        self.update(id, |project| {
            let scene = scene_mut(project, scene_id)?;
            scene.script = script;
            Ok(())
        })
    }

    /// Attach generated transition images to one scene.
    pub fn set_scene_images(
        &self,
        id: DbId,
        scene_id: DbId,
        images: Vec<TransitionImage>,
    ) -> Result<Project, CoreError> {
        self.update(id, |project| {
            let scene = scene_mut(project, scene_id)?;
            scene.transition_images = images;
            Ok(())
        })
    }

    /// Flip one scene's view-only expansion toggle.
    pub fn toggle_scene_expanded(&self, id: DbId, scene_id: DbId) -> Result<Project, CoreError> {
        self.update(id, |project| {
            let scene = scene_mut(project, scene_id)?;
            scene.is_expanded = !scene.is_expanded;
            Ok(())
        })
    }
}

impl Default for ProjectStore {
    fn default() -> Self {
        Self::new()
    }
}

fn scene_mut(project: &mut Project, scene_id: DbId) -> Result<&mut Scene, CoreError> {
    project
        .scenes
        .iter_mut()
        .find(|s| s.id == scene_id)
        .ok_or(CoreError::NotFound { entity: "Scene", id: scene_id })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
