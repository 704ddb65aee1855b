use serde::{Deserialize, Serialize};

use crate::source::{null_as_empty, SourceSet};

pub type ProjectId = String;

/// Entry of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummary {
    #[serde(rename = "_id")]
    pub id: ProjectId,
    pub name: String,
}

impl ProjectSummary {
    /// Case-insensitive substring match on the display name.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim();
        needle.is_empty() || self.name.to_lowercase().contains(&needle.to_lowercase())
    }
}

/// A saved project: identity, display name and a snapshot of its sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    #[serde(rename = "_id", default)]
    pub id: ProjectId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(flatten)]
    pub sources: SourceSet,
}

impl Project {
    pub fn summary(&self) -> ProjectSummary {
        ProjectSummary {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}
