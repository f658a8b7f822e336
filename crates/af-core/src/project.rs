//! Tracked project catalog.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::ProjectId;

/// A catalog entry for a tracked project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    /// Whether the project gets its own highlight section.
    #[serde(default)]
    pub featured: bool,
    /// Other catalog fields (name, description, ...), kept as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn new(id: ProjectId, featured: bool) -> Self {
        Self {
            id,
            featured,
            extra: Map::new(),
        }
    }
}

/// The project configuration file: `{ "projects": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectCatalog {
    pub projects: Vec<Project>,
}

impl ProjectCatalog {
    /// Featured projects in catalog order.
    pub fn featured(&self) -> impl Iterator<Item = &Project> {
        self.projects.iter().filter(|p| p.featured)
    }
}
