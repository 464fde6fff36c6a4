//! Renderable bindings and original-material snapshots
//!
//! The first time any controller touches a renderer its current material slots
//! are recorded. That snapshot is the only restoration point and is never
//! overwritten, so one shared registry gives every controller the same, true
//! original no matter which of them touched the renderer first.

use std::collections::HashMap;

use log::{debug, trace};

use crate::gfx::{
    resources::{CullMode, MaterialHandle},
    scene::{NodeId, Scene},
};

use super::names::{resolve_entities, EntityKey};

/// A renderer and the material state it had when first touched
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableBinding {
    pub renderable: NodeId,
    pub submesh_count: usize,
    pub original_materials: Vec<Option<MaterialHandle>>,
    pub original_enabled: bool,
}

/// Table of bindings, one per renderer
#[derive(Debug, Default)]
pub struct RenderableRegistry {
    bindings: HashMap<NodeId, RenderableBinding>,
}

impl RenderableRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves `key` under `root` and binds every match
    pub fn collect(
        &mut self,
        scene: &Scene,
        root: NodeId,
        key: &EntityKey,
    ) -> Vec<RenderableBinding> {
        resolve_entities(scene, root, key)
            .into_iter()
            .filter_map(|node| self.bind(scene, node).cloned())
            .collect()
    }

    /// Binding for `node`, snapshotting it if this is the first touch
    ///
    /// Returns `None` if `node` has no renderer.
    pub fn bind(&mut self, scene: &Scene, node: NodeId) -> Option<&RenderableBinding> {
        let renderer = scene.renderer(node)?;
        let binding = self.bindings.entry(node).or_insert_with(|| {
            debug!(
                "Binding renderer '{}' ({} slots)",
                scene.name(node).unwrap_or_default(),
                renderer.materials.len()
            );
            RenderableBinding {
                renderable: node,
                submesh_count: renderer.submesh_count,
                original_materials: renderer.materials.clone(),
                original_enabled: renderer.enabled,
            }
        });
        Some(binding)
    }

    pub fn get(&self, node: NodeId) -> Option<&RenderableBinding> {
        self.bindings.get(&node)
    }

    /// Puts the snapshot materials back; no-op for unbound renderers
    pub fn restore(&self, scene: &mut Scene, node: NodeId) {
        let Some(binding) = self.bindings.get(&node) else {
            return;
        };
        if let Some(renderer) = scene.renderer_mut(node) {
            if renderer.materials != binding.original_materials {
                trace!("Restoring original materials on {:?}", node);
                renderer.materials = binding.original_materials.clone();
            }
        }
    }

    /// Restores materials and enabled flag of every bound renderer
    pub fn restore_all(&self, scene: &mut Scene) {
        for (&node, binding) in &self.bindings {
            self.restore(scene, node);
            scene.set_enabled(node, binding.original_enabled);
        }
    }

    /// Sets the cull mode of every material currently on `node`
    ///
    /// This edits shared materials in place. Empty slots and materials without
    /// a culling parameter are skipped.
    pub fn force_culling(&self, scene: &mut Scene, node: NodeId, mode: CullMode) {
        let Some(renderer) = scene.renderer(node) else {
            return;
        };
        let handles: Vec<MaterialHandle> = renderer.materials.iter().flatten().copied().collect();

        for handle in handles {
            if let Some(material) = scene.material_manager.get_mut(handle) {
                match material.cull {
                    Some(current) if current != mode => material.cull = Some(mode),
                    _ => {}
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
