//! Color and alpha application
//!
//! Decides per renderer between its original materials and their cached
//! transparent variants, normalizes culling, and writes the per-draw override.
//! Visibility is not handled here; callers toggle the renderer themselves.

use crate::config::EngineConfig;
use crate::gfx::{
    color::Rgba,
    rendering::effective_color,
    resources::VariantCache,
    scene::{NodeId, Scene},
};

use super::registry::RenderableRegistry;

/// Which channels of the requested color replace the current override
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// RGB and alpha
    Full,
    /// Alpha only, RGB is kept
    AlphaOnly,
}

/// Applies `color` to one submesh of `node`
///
/// Returns the override written, or `None` if `node` has no renderer.
#[allow(clippy::too_many_arguments)]
pub fn apply_color(
    scene: &mut Scene,
    registry: &mut RenderableRegistry,
    variants: &mut VariantCache,
    config: &EngineConfig,
    node: NodeId,
    submesh: usize,
    color: Rgba,
    mode: ColorMode,
) -> Option<Rgba> {
    prepare_materials(scene, registry, variants, config, node, color)?;
    Some(write_override(scene, node, submesh, color, mode))
}

/// Applies `color` to every submesh of `node`
///
/// Returns the number of submeshes written, or `None` if `node` has no renderer.
pub fn apply_to_renderable(
    scene: &mut Scene,
    registry: &mut RenderableRegistry,
    variants: &mut VariantCache,
    config: &EngineConfig,
    node: NodeId,
    color: Rgba,
    mode: ColorMode,
) -> Option<usize> {
    let submesh_count = prepare_materials(scene, registry, variants, config, node, color)?;
    for submesh in 0..submesh_count {
        write_override(scene, node, submesh, color, mode);
    }
    Some(submesh_count)
}

/// Steps shared by both entry points: bind, swap or restore, cull
fn prepare_materials(
    scene: &mut Scene,
    registry: &mut RenderableRegistry,
    variants: &mut VariantCache,
    config: &EngineConfig,
    node: NodeId,
    color: Rgba,
) -> Option<usize> {
    let submesh_count = registry.bind(scene, node)?.submesh_count;

    if config.needs_transparency(color.a) {
        use_transparent_variants(scene, variants, node);
    } else {
        registry.restore(scene, node);
    }
    registry.force_culling(scene, node, config.forced_cull);

    Some(submesh_count)
}

fn use_transparent_variants(scene: &mut Scene, variants: &mut VariantCache, node: NodeId) {
    let Some(renderer) = scene.renderer(node) else {
        return;
    };
    let current = renderer.materials.clone();

    let swapped: Vec<_> = current
        .iter()
        .map(|slot| {
            slot.map(|handle| {
                variants
                    .get_or_create_transparent(&mut scene.material_manager, handle)
                    .unwrap_or(handle)
            })
        })
        .collect();

    if swapped != current {
        scene.set_materials(node, swapped);
    }
}

fn write_override(
    scene: &mut Scene,
    node: NodeId,
    submesh: usize,
    color: Rgba,
    mode: ColorMode,
) -> Rgba {
    let result = match mode {
        ColorMode::Full => color,
        ColorMode::AlphaOnly => effective_color(scene, node, submesh).with_alpha(color.a),
    };
    scene.overrides.set(node, submesh, result);
    result
}
