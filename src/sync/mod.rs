//! # Material/alpha synchronization
//!
//! Everything that decides which material a renderer draws with and what
//! color its submeshes show.
//!
//! - [`names`] - Key normalization and ancestor-chain resolution
//! - [`registry`] - First-touch snapshots of renderer materials
//! - [`alpha`] - Opaque/transparent switching and per-draw overrides
//!
//! All of it runs against one [`SyncContext`]. The preset engine and every
//! slider borrow the same context, so there is exactly one binding, one
//! original snapshot and one transparent variant per source, whichever
//! controller got there first.

pub mod alpha;
pub mod names;
pub mod registry;

pub use alpha::ColorMode;
pub use names::{normalize, EntityKey};
pub use registry::{RenderableBinding, RenderableRegistry};

use log::info;

use crate::config::EngineConfig;
use crate::events::NotificationBus;
use crate::gfx::{
    color::Rgba,
    resources::VariantCache,
    scene::{NodeId, Scene},
};

/// Shared mutable state of one scene's controllers
#[derive(Debug)]
pub struct SyncContext {
    pub registry: RenderableRegistry,
    pub variants: VariantCache,
    pub bus: NotificationBus,
    pub config: EngineConfig,
}

impl SyncContext {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: RenderableRegistry::new(),
            variants: VariantCache::with_render_queue(config.transparent_queue),
            bus: NotificationBus::new(),
            config,
        }
    }

    /// Binds every renderer matching `key` under `root`
    pub fn collect(&mut self, scene: &Scene, root: NodeId, key: &EntityKey) -> Vec<RenderableBinding> {
        self.registry.collect(scene, root, key)
    }

    /// See [`alpha::apply_color`]
    pub fn apply_color(
        &mut self,
        scene: &mut Scene,
        node: NodeId,
        submesh: usize,
        color: Rgba,
        mode: ColorMode,
    ) -> Option<Rgba> {
        alpha::apply_color(
            scene,
            &mut self.registry,
            &mut self.variants,
            &self.config,
            node,
            submesh,
            color,
            mode,
        )
    }

    /// See [`alpha::apply_to_renderable`]
    pub fn apply_to_renderable(
        &mut self,
        scene: &mut Scene,
        node: NodeId,
        color: Rgba,
        mode: ColorMode,
    ) -> Option<usize> {
        alpha::apply_to_renderable(
            scene,
            &mut self.registry,
            &mut self.variants,
            &self.config,
            node,
            color,
            mode,
        )
    }

    /// Returns every bound renderer to its first-touch state
    ///
    /// Materials and enabled flags are restored and all overrides dropped.
    /// Variants stay cached for reuse.
    pub fn reset(&mut self, scene: &mut Scene) {
        info!("Resetting {} bound renderers", self.registry.len());
        self.registry.restore_all(scene);
        scene.overrides.clear();
    }
}

impl Default for SyncContext {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{resources::Material, scene::MeshRenderer};

    #[test]
    fn test_reset_returns_to_first_touch_state() {
        let mut scene = Scene::new();
        let tissue = scene.add_material(Material::default());
        let root = scene.add_root("Model");
        let kidney = scene.add_child(root, "Kidney_L").unwrap();
        scene
            .attach_renderer(kidney, MeshRenderer::new(vec![tissue]))
            .unwrap();

        let mut ctx = SyncContext::default();
        ctx.apply_to_renderable(&mut scene, kidney, Rgba::new(1.0, 0.0, 0.0, 0.3), ColorMode::Full);
        scene.set_enabled(kidney, false);
        assert_ne!(scene.renderer(kidney).unwrap().materials, vec![Some(tissue)]);

        ctx.reset(&mut scene);

        let renderer = scene.renderer(kidney).unwrap();
        assert_eq!(renderer.materials, vec![Some(tissue)]);
        assert!(renderer.enabled);
        assert!(scene.overrides.is_empty());
        assert_eq!(ctx.variants.len(), 1);
    }

    #[test]
    fn test_transparent_queue_comes_from_config() {
        let config = EngineConfig {
            transparent_queue: 3500,
            ..Default::default()
        };
        let mut scene = Scene::new();
        let tissue = scene.add_material(Material::default());
        let root = scene.add_root("Spleen");
        scene
            .attach_renderer(root, MeshRenderer::new(vec![tissue]))
            .unwrap();

        let mut ctx = SyncContext::new(config);
        ctx.apply_color(&mut scene, root, 0, Rgba::new(1.0, 1.0, 1.0, 0.5), ColorMode::Full);

        let variant = scene.renderer(root).unwrap().materials[0].unwrap();
        assert_eq!(scene.material_manager.get(variant).unwrap().render_queue, 3500);
    }
}
