//! Page Layout
//! Declarative tree handed to the page writer: banner, tabs, tiles, sections.

use crate::charts::RenderedArtifact;

#[derive(Debug, Clone)]
pub struct Page {
    pub banner: Banner,
    pub tabs: Vec<Tab>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub title: String,
    pub subtitle: String,
    pub last_updated: String,
}

#[derive(Debug, Clone)]
pub struct Tab {
    pub id: String,
    pub label: String,
    pub tiles: Vec<SummaryTile>,
    pub sections: Vec<Section>,
}

/// One headline number ("1,234 / Total Cases").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryTile {
    pub id: String,
    pub value: String,
    pub caption: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    Full,
    Half,
}

#[derive(Debug, Clone)]
pub enum Section {
    Artifact {
        id: String,
        width: Width,
        artifact: RenderedArtifact,
    },
    Row(Vec<Section>),
}

impl Section {
    pub fn full(id: &str, artifact: impl Into<RenderedArtifact>) -> Self {
        Section::Artifact {
            id: id.to_string(),
            width: Width::Full,
            artifact: artifact.into(),
        }
    }

    pub fn half(id: &str, artifact: impl Into<RenderedArtifact>) -> Self {
        Section::Artifact {
            id: id.to_string(),
            width: Width::Half,
            artifact: artifact.into(),
        }
    }

    /// Artifact ids in document order.
    pub fn artifact_ids(&self) -> Vec<&str> {
        match self {
            Section::Artifact { id, .. } => vec![id.as_str()],
            Section::Row(children) => children.iter().flat_map(|c| c.artifact_ids()).collect(),
        }
    }
}

impl Tab {
    pub fn artifact_ids(&self) -> Vec<&str> {
        self.sections.iter().flat_map(|s| s.artifact_ids()).collect()
    }
}

impl Page {
    pub fn tab(&self, id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == id)
    }
}
