//! Repository for the `projects` mirror table.

use sqlx::PgPool;

use crate::models::project::{CreateProjectRecord, ProjectRecord};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, concept, genre, scene_count, enhanced_narrative, status, \
                       created_at, updated_at";

/// CRUD operations for project mirror rows.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new row, returning the created record.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProjectRecord,
    ) -> Result<ProjectRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO projects (title, concept, genre, scene_count, enhanced_narrative, status)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(&input.title)
            .bind(&input.concept)
            .bind(&input.genre)
            .bind(input.scene_count)
            .bind(&input.enhanced_narrative)
            .bind(&input.status)
            .fetch_one(pool)
            .await
    }

    /// Find a row by id.
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ProjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, ProjectRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all rows, most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<ProjectRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC");
        sqlx::query_as::<_, ProjectRecord>(&query).fetch_all(pool).await
    }

    /// List project titles only, most recently created first. The one
    /// read the running server issues against the backend.
    pub async fn list_titles(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>("SELECT title FROM projects ORDER BY created_at DESC")
            .fetch_all(pool)
            .await
    }
}
