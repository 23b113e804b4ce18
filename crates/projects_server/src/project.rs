use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored project record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
}

/// Request body for create and update. Both fields are optional; an absent
/// field is stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
}

impl ProjectInput {
    pub fn new(title: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            owner: Some(owner.into()),
        }
    }
}

impl Project {
    pub fn from_input(id: Uuid, input: ProjectInput) -> Self {
        Self {
            id,
            title: input.title,
            owner: input.owner,
        }
    }

    /// Case-sensitive substring match on the title. Untitled projects never match.
    pub fn title_contains(&self, needle: &str) -> bool {
        self.title
            .as_deref()
            .is_some_and(|title| title.contains(needle))
    }
}
