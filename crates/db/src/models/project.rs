//! Project row model and DTOs for the optional mirror table.

use fabula_core::types::Timestamp;
use fabula_core::Project;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A project row from the `projects` table.
///
/// The database allocates its own ids; they are unrelated to the
/// in-memory store's epoch-seeded ids.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectRecord {
    pub id: i64,
    pub title: String,
    pub concept: String,
    pub genre: Option<String>,
    pub scene_count: i32,
    pub enhanced_narrative: Option<String>,
    /// Wire form of the status enum (`draft` / `in-progress` / `complete`).
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a project mirror row.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRecord {
    pub title: String,
    pub concept: String,
    pub genre: Option<String>,
    pub scene_count: i32,
    pub enhanced_narrative: Option<String>,
    pub status: String,
}

impl From<&Project> for CreateProjectRecord {
    fn from(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            concept: project.concept.clone(),
            genre: project.genre.clone(),
            scene_count: project.scene_count as i32,
            enhanced_narrative: project.enhanced_narrative.clone(),
            status: project.status.as_str().to_string(),
        }
    }
}
