//! Per-draw color overrides
//!
//! An override is keyed by `(renderer node, submesh index)` and replaces the
//! base color of whatever material that submesh draws with, without touching
//! or duplicating the material itself. This is what lets two renderers share a
//! material while showing different tints.

use std::collections::HashMap;

use crate::gfx::{color::Rgba, scene::NodeId, scene::Scene};

/// Uniform data uploaded per draw call
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct OverrideUniform {
    pub base_color: [f32; 4],
}

/// Store of per-draw color overrides
#[derive(Debug, Default)]
pub struct DrawOverrides {
    colors: HashMap<(NodeId, usize), Rgba>,
}

impl DrawOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, node: NodeId, submesh: usize) -> Option<Rgba> {
        self.colors.get(&(node, submesh)).copied()
    }

    pub fn set(&mut self, node: NodeId, submesh: usize, color: Rgba) {
        self.colors.insert((node, submesh), color);
    }

    /// Drops every override of one renderer
    pub fn clear_node(&mut self, node: NodeId) {
        self.colors.retain(|(n, _), _| *n != node);
    }

    pub fn clear(&mut self) {
        self.colors.clear();
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Color a submesh is drawn with: override, else material base color, else white
pub fn effective_color(scene: &Scene, node: NodeId, submesh: usize) -> Rgba {
    if let Some(color) = scene.overrides.get(node, submesh) {
        return color;
    }

    scene
        .renderer(node)
        .and_then(|r| r.material_for_submesh(submesh))
        .and_then(|handle| scene.material_manager.get(handle))
        .map(|material| Rgba::from_array(material.base_color))
        .unwrap_or(Rgba::WHITE)
}

/// Uniform for the draw of `(node, submesh)`
pub fn uniform_for(scene: &Scene, node: NodeId, submesh: usize) -> OverrideUniform {
    OverrideUniform {
        base_color: effective_color(scene, node, submesh).to_array(),
    }
}
