//! In-memory project store
//!
//! Holds every project for the lifetime of the process. Records live in a
//! map keyed by identifier, with a separate `Vec` of identifiers keeping
//! insertion order for listing. All access goes through one lock, so each
//! lookup-then-mutate sequence is atomic with respect to other requests.

use parking_lot::RwLock;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use crate::id;
use crate::project::{Project, ProjectInput};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("project {0} not found")]
    NotFound(Uuid),
}

#[derive(Default)]
struct Inner {
    projects: HashMap<Uuid, Project>,
    order: Vec<Uuid>,
}

#[derive(Default)]
pub struct ProjectStore {
    inner: RwLock<Inner>,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// List projects in insertion order, optionally keeping only those whose
    /// title contains `title_filter`
    pub fn list(&self, title_filter: Option<&str>) -> Vec<Project> {
        let inner = self.inner.read();

        inner
            .order
            .iter()
            .filter_map(|id| inner.projects.get(id))
            .filter(|project| title_filter.map_or(true, |needle| project.title_contains(needle)))
            .cloned()
            .collect()
    }

    /// Create a project with a fresh identifier and append it to the store
    pub fn create(&self, input: ProjectInput) -> Project {
        let project = Project::from_input(id::generate(), input);

        let mut inner = self.inner.write();
        inner.order.push(project.id);
        inner.projects.insert(project.id, project.clone());

        info!(
            project_id = %project.id,
            total = inner.order.len(),
            "✨ Project created"
        );

        project
    }

    /// Replace the title and owner of an existing project. Fields absent from
    /// `input` become absent on the record.
    pub fn update(&self, id: Uuid, input: ProjectInput) -> Result<Project, StoreError> {
        let mut inner = self.inner.write();

        let slot = inner.projects.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        *slot = Project::from_input(id, input);

        debug!(project_id = %id, "✏️  Project updated");

        Ok(slot.clone())
    }

    /// Remove a project, keeping the relative order of the rest
    pub fn delete(&self, id: Uuid) -> Result<Project, StoreError> {
        let mut inner = self.inner.write();

        let project = inner.projects.remove(&id).ok_or(StoreError::NotFound(id))?;
        if let Some(position) = inner.order.iter().position(|entry| *entry == id) {
            inner.order.remove(position);
        }

        info!(
            project_id = %id,
            remaining = inner.order.len(),
            "🗑️  Project deleted"
        );

        Ok(project)
    }

    pub fn get(&self, id: Uuid) -> Option<Project> {
        self.inner.read().projects.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn titles(projects: &[Project]) -> Vec<&str> {
        projects
            .iter()
            .map(|p| p.title.as_deref().unwrap_or_default())
            .collect()
    }

    #[test]
    fn test_create_and_list() {
        let store = ProjectStore::new();
        let project = store.create(ProjectInput::new("Site", "Murillo"));

        assert!(id::is_valid(&project.id.to_string()));
        assert_eq!(store.list(None), vec![project]);
    }

    #[test]
    fn test_list_keeps_insertion_order() {
        let store = ProjectStore::new();
        for title in ["c", "a", "b"] {
            store.create(ProjectInput::new(title, "owner"));
        }

        assert_eq!(titles(&store.list(None)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_filter_by_title() {
        let store = ProjectStore::new();
        store.create(ProjectInput::new("Website", "a"));
        store.create(ProjectInput::new("Mobile app", "b"));
        store.create(ProjectInput::new("Blog site", "c"));
        store.create(ProjectInput::default());

        assert_eq!(titles(&store.list(Some("site"))), vec!["Website", "Blog site"]);
        assert!(store.list(Some("SITE")).is_empty());
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let store = ProjectStore::new();
        let project = store.create(ProjectInput::new("Site", "Murillo"));

        let input = ProjectInput {
            title: Some("Blog".to_string()),
            owner: None,
        };
        let updated = store.update(project.id, input).unwrap();

        assert_eq!(updated.id, project.id);
        assert_eq!(updated.title.as_deref(), Some("Blog"));
        assert_eq!(updated.owner, None);
        assert_eq!(store.get(project.id), Some(updated));
    }

    #[test]
    fn test_update_keeps_position() {
        let store = ProjectStore::new();
        let first = store.create(ProjectInput::new("a", "x"));
        store.create(ProjectInput::new("b", "x"));

        store.update(first.id, ProjectInput::new("z", "x")).unwrap();

        assert_eq!(titles(&store.list(None)), vec!["z", "b"]);
    }

    #[test]
    fn test_update_with_same_values_is_unchanged() {
        let store = ProjectStore::new();
        store.create(ProjectInput::new("a", "x"));
        let project = store.create(ProjectInput::new("b", "y"));
        let before = store.list(None);

        store.update(project.id, ProjectInput::new("b", "y")).unwrap();

        assert_eq!(store.list(None), before);
    }

    #[test]
    fn test_update_missing() {
        let store = ProjectStore::new();
        let missing = id::generate();
        assert_eq!(
            store.update(missing, ProjectInput::default()),
            Err(StoreError::NotFound(missing))
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_delete_closes_gap() {
        let store = ProjectStore::new();
        store.create(ProjectInput::new("a", "x"));
        let middle = store.create(ProjectInput::new("b", "x"));
        store.create(ProjectInput::new("c", "x"));

        store.delete(middle.id).unwrap();

        assert_eq!(titles(&store.list(None)), vec!["a", "c"]);
        assert_eq!(store.get(middle.id), None);
    }

    #[test]
    fn test_delete_missing_leaves_store_unchanged() {
        let store = ProjectStore::new();
        store.create(ProjectInput::new("a", "x"));
        let before = store.list(None);

        let missing = id::generate();
        assert_eq!(store.delete(missing), Err(StoreError::NotFound(missing)));
        assert_eq!(store.list(None), before);
    }

    proptest! {
        #[test]
        fn prop_filter_matches_substring(
            titles in proptest::collection::vec("[a-c]{0,4}", 0..12),
            needle in "[a-c]{1,2}",
        ) {
            let store = ProjectStore::new();
            for title in &titles {
                store.create(ProjectInput::new(title.as_str(), "owner"));
            }

            let expected: Vec<&String> = titles.iter().filter(|t| t.contains(&needle)).collect();
            let listed = store.list(Some(&needle));

            prop_assert_eq!(listed.len(), expected.len());
            for (project, title) in listed.iter().zip(expected) {
                prop_assert_eq!(project.title.as_ref(), Some(title));
            }
        }

        #[test]
        fn prop_size_is_creates_minus_deletes(
            creates in 0usize..20,
            delete_mask in proptest::collection::vec(any::<bool>(), 20),
        ) {
            let store = ProjectStore::new();
            let ids: Vec<Uuid> = (0..creates)
                .map(|i| store.create(ProjectInput::new(format!("p{i}"), "owner")).id)
                .collect();

            let mut deleted = 0;
            for (id, remove) in ids.iter().zip(&delete_mask) {
                if *remove {
                    store.delete(*id).unwrap();
                    deleted += 1;
                }
            }

            prop_assert_eq!(store.len(), creates - deleted);
            for (id, remove) in ids.iter().zip(&delete_mask) {
                prop_assert_eq!(store.get(*id).is_some(), !*remove);
            }
        }
    }
}
