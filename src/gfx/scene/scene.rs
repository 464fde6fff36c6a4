use log::trace;

use crate::error::SceneError;
use crate::gfx::{
    rendering::DrawOverrides,
    resources::{Material, MaterialHandle, MaterialManager},
};

use super::node::{MeshRenderer, NodeId, SceneNode};

/// Main scene containing the node hierarchy, materials and per-draw overrides
///
/// Nodes live in an arena and are addressed by [`NodeId`]. Import code builds
/// the hierarchy through [`Scene::add_root`], [`Scene::add_child`] and
/// [`Scene::attach_renderer`].
#[derive(Debug, Default)]
pub struct Scene {
    nodes: Vec<SceneNode>,
    pub material_manager: MaterialManager,
    pub overrides: DrawOverrides,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parentless node
    pub fn add_root(&mut self, name: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode::new(name, None));
        id
    }

    /// Adds a node under `parent`
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, SceneError> {
        let id = NodeId(self.nodes.len());
        self.node_mut(parent)?.children.push(id);
        self.nodes.push(SceneNode::new(name, Some(parent)));
        Ok(id)
    }

    /// Makes `node` drawable
    pub fn attach_renderer(
        &mut self,
        node: NodeId,
        renderer: MeshRenderer,
    ) -> Result<(), SceneError> {
        self.node_mut(node)?.renderer = Some(renderer);
        Ok(())
    }

    /// Stores a material in the scene's material manager
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        self.material_manager.add_material(material)
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode, SceneError> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id.0))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode, SceneError> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id.0))
    }

    pub fn name(&self, id: NodeId) -> Option<&str> {
        self.nodes.get(id.0).map(|n| n.name.as_str())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.0).and_then(|n| n.parent)
    }

    /// `id` followed by each of its ancestors up to the top of the hierarchy
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            scene: self,
            next: self.nodes.get(id.0).map(|_| id),
        }
    }

    /// Every renderable node in the subtree of `root`, pre-order
    ///
    /// Disabled renderers are included.
    pub fn renderables_under(&self, root: NodeId) -> Vec<NodeId> {
        let mut found = Vec::new();
        if self.nodes.get(root.0).is_none() {
            return found;
        }

        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let node = &self.nodes[id.0];
            if node.is_renderable() {
                found.push(id);
            }
            stack.extend(node.children.iter().rev().copied());
        }
        found
    }

    pub fn renderer(&self, id: NodeId) -> Option<&MeshRenderer> {
        self.nodes.get(id.0).and_then(|n| n.renderer.as_ref())
    }

    pub fn renderer_mut(&mut self, id: NodeId) -> Option<&mut MeshRenderer> {
        self.nodes.get_mut(id.0).and_then(|n| n.renderer.as_mut())
    }

    /// Toggles a renderer; returns false if `id` has none
    pub fn set_enabled(&mut self, id: NodeId, enabled: bool) -> bool {
        match self.renderer_mut(id) {
            Some(renderer) => {
                if renderer.enabled != enabled {
                    trace!("Renderer {:?} enabled = {}", id, enabled);
                }
                renderer.enabled = enabled;
                true
            }
            None => false,
        }
    }

    /// Replaces a renderer's material slots; returns false if `id` has none
    pub fn set_materials(&mut self, id: NodeId, materials: Vec<Option<MaterialHandle>>) -> bool {
        match self.renderer_mut(id) {
            Some(renderer) => {
                renderer.materials = materials;
                true
            }
            None => false,
        }
    }

    /// First node with exactly this name
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let renderers = self.nodes.iter().filter_map(|n| n.renderer.as_ref());
        let (renderable_count, enabled_count, submesh_count) =
            renderers.fold((0, 0, 0), |(r, e, s), renderer| {
                (r + 1, e + renderer.enabled as usize, s + renderer.submesh_count)
            });

        SceneStatistics {
            node_count: self.nodes.len(),
            renderable_count,
            enabled_count,
            submesh_count,
            material_count: self.material_manager.len(),
            override_count: self.overrides.len(),
        }
    }
}

/// Iterator returned by [`Scene::ancestors`]
pub struct Ancestors<'a> {
    scene: &'a Scene,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.scene.parent(current);
        Some(current)
    }
}

/// Scene statistics for debugging and UI display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneStatistics {
    pub node_count: usize,
    pub renderable_count: usize,
    pub enabled_count: usize,
    pub submesh_count: usize,
    pub material_count: usize,
    pub override_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_scene() -> (Scene, NodeId, NodeId, NodeId) {
        let mut scene = Scene::new();
        let skin = scene.add_material(Material::default());
        let root = scene.add_root("Model");
        let torso = scene.add_child(root, "Torso").unwrap();
        let lung = scene.add_child(torso, "Left_Lung").unwrap();
        scene
            .attach_renderer(lung, MeshRenderer::new(vec![skin]))
            .unwrap();
        let arm = scene.add_child(root, "Arm").unwrap();
        scene.attach_renderer(arm, MeshRenderer::new(vec![skin])).unwrap();
        (scene, root, lung, arm)
    }

    #[test]
    fn test_ancestors_walk_upwards() {
        let (scene, root, lung, _) = body_scene();
        let names: Vec<_> = scene
            .ancestors(lung)
            .map(|id| scene.name(id).unwrap())
            .collect();
        assert_eq!(names, vec!["Left_Lung", "Torso", "Model"]);
        assert_eq!(scene.ancestors(root).count(), 1);
    }

    #[test]
    fn test_renderables_include_disabled() {
        let (mut scene, root, lung, arm) = body_scene();
        assert!(scene.set_enabled(arm, false));
        assert_eq!(scene.renderables_under(root), vec![lung, arm]);
        assert!(!scene.set_enabled(root, false));

        let stats = scene.get_statistics();
        assert_eq!(stats.renderable_count, 2);
        assert_eq!(stats.enabled_count, 1);
    }

    #[test]
    fn test_unknown_node_is_an_error() {
        let mut scene = Scene::new();
        let err = scene.add_child(NodeId(42), "orphan").unwrap_err();
        assert!(matches!(err, SceneError::UnknownNode(42)));
        assert!(scene.renderables_under(NodeId(42)).is_empty());
        assert_eq!(scene.ancestors(NodeId(42)).count(), 0);
    }
}
