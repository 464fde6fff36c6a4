//! Scene nodes and their renderers

use crate::gfx::resources::MaterialHandle;

/// Index of a node in its [`Scene`](super::Scene)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Drawable part of a node
///
/// One material slot per submesh is the usual layout, but the two counts are
/// allowed to differ. Empty slots (`None`) model a missing material.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRenderer {
    pub enabled: bool,
    pub materials: Vec<Option<MaterialHandle>>,
    pub submesh_count: usize,
}

impl MeshRenderer {
    /// Enabled renderer with one submesh per material slot
    pub fn new(materials: Vec<MaterialHandle>) -> Self {
        let submesh_count = materials.len();
        Self {
            enabled: true,
            materials: materials.into_iter().map(Some).collect(),
            submesh_count,
        }
    }

    /// Enabled renderer with explicit slots and submesh count
    pub fn with_slots(materials: Vec<Option<MaterialHandle>>, submesh_count: usize) -> Self {
        Self {
            enabled: true,
            materials,
            submesh_count,
        }
    }

    /// Material used to draw `submesh`
    ///
    /// Submeshes past the last slot share the last slot, as most backends do.
    pub fn material_for_submesh(&self, submesh: usize) -> Option<MaterialHandle> {
        self.materials
            .get(submesh)
            .or_else(|| self.materials.last())
            .copied()
            .flatten()
    }
}

/// Named node of the scene hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub renderer: Option<MeshRenderer>,
}

impl SceneNode {
    pub(crate) fn new(name: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            parent,
            children: Vec::new(),
            renderer: None,
        }
    }

    pub fn is_renderable(&self) -> bool {
        self.renderer.is_some()
    }
}
