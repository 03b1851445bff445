//! Sample projects shown on a fresh dashboard.

use crate::project::NewProject;
use crate::store::{ProjectPatch, ProjectStore};
use crate::types::ProjectStatus;

/// Populate the store with the three sample stories a fresh install
/// shows under "Recent Stories".
pub fn sample_projects(store: &ProjectStore) {
    let samples = [
        (
            "The Last Explorer",
            "A space explorer discovers an ancient alien civilization",
            "Sci-Fi",
            8,
            ProjectStatus::Complete,
        ),
        (
            "Cyber Revolution",
            "A detective uncovers a conspiracy in a cyberpunk city",
            "Cyberpunk",
            6,
            ProjectStatus::InProgress,
        ),
        (
            "Ocean Mysteries",
            "An underwater kingdom facing an environmental crisis",
            "Fantasy",
            4,
            ProjectStatus::Draft,
        ),
    ];

    for (title, concept, genre, scene_count, status) in samples {
        let project = store.create(NewProject {
            title: title.to_string(),
            concept: concept.to_string(),
            genre: Some(genre.to_string()),
            scene_count,
            enhanced_narrative: None,
        });
        store
            .apply_patch(
                project.id,
                ProjectPatch {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .expect("seeded project exists");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeding_creates_three_samples_with_expected_statuses() {
        let store = ProjectStore::new();
        sample_projects(&store);

        let projects = store.list();
        assert_eq!(projects.len(), 3);
        // Most recent first.
        assert_eq!(projects[0].title, "Ocean Mysteries");
        assert_eq!(projects[0].status, ProjectStatus::Draft);
        assert_eq!(projects[2].title, "The Last Explorer");
        assert_eq!(projects[2].status, ProjectStatus::Complete);
    }
}
