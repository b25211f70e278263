//! Document identifiers as resolved by the host.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of document an identifier points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    /// A scene.
    Scene,
    /// A region embedded in a scene.
    Region,
    /// An entity (token) embedded in a scene.
    Entity,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Scene => "scene",
            Self::Region => "region",
            Self::Entity => "entity",
        };
        f.write_str(name)
    }
}

/// The result of resolving an identifier without fetching the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDocument {
    /// What the identifier refers to.
    pub kind: DocumentKind,
    /// The scene that owns the document. For scenes, the scene itself.
    pub scene_id: Uuid,
    /// The document's own identifier.
    pub local_id: Uuid,
}
