//! Name normalization and entity resolution
//!
//! Logical part names in presets ("Left Lung") rarely match scene node names
//! ("left_lung_mesh.003") exactly. Both sides are normalized and compared by
//! substring over the renderer's ancestor chain.
//!
//! A renderer can legitimately belong to more than one entity: a mesh under
//! `Heart` under `Body` resolves for both `heart` and `body`. Results are not
//! deduplicated across keys.

use std::fmt;

use crate::gfx::scene::{NodeId, Scene};

/// Normalized logical part name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EntityKey(String);

impl EntityKey {
    pub fn new(name: &str) -> Self {
        normalize(name)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityKey {
    fn from(name: &str) -> Self {
        normalize(name)
    }
}

/// Lowercases and strips spaces, underscores and hyphens
pub fn normalize(name: &str) -> EntityKey {
    EntityKey(
        name.chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect(),
    )
}

/// True if the normalized `object_name` contains `key`
pub fn matches(object_name: &str, key: &EntityKey) -> bool {
    normalize(object_name).0.contains(key.as_str())
}

/// Renderers under `root` with any ancestor (itself included, `root` included)
/// whose name matches `key`
///
/// An empty key resolves to nothing.
pub fn resolve_entities(scene: &Scene, root: NodeId, key: &EntityKey) -> Vec<NodeId> {
    if key.is_empty() {
        return Vec::new();
    }

    scene
        .renderables_under(root)
        .into_iter()
        .filter(|&renderable| chain_matches(scene, root, renderable, key))
        .collect()
}

/// True if `node` or any ancestor up to and including `root` matches `key`
///
/// Stops at the first matching ancestor.
pub fn chain_matches(scene: &Scene, root: NodeId, node: NodeId, key: &EntityKey) -> bool {
    let stop = scene.parent(root);
    scene
        .ancestors(node)
        .take_while(|&ancestor| Some(ancestor) != stop)
        .any(|ancestor| scene.name(ancestor).is_some_and(|name| matches(name, key)))
}
