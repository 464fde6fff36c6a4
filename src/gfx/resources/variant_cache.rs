//! Transparent material variants
//!
//! Every opaque material that ever needs to fade gets exactly one transparent
//! twin, created on first request and reused for every later request from any
//! renderer, submesh or controller. Materials that already read as transparent
//! are handed back untouched and never become cache keys.

use std::collections::HashMap;

use log::debug;

use super::material::{
    straight_alpha_blend, CullMode, DepthWrite, Material, MaterialHandle, MaterialManager,
    SurfaceMode, RENDER_QUEUE_TRANSPARENT,
};

/// True if any of the material's transparency signals is set
///
/// Surface mode, the indicator flag and the render-type tag are checked
/// independently; one is enough.
pub fn is_transparent(material: &Material) -> bool {
    material.surface == SurfaceMode::Transparent
        || material.transparent_keyword
        || material.render_type.eq_ignore_ascii_case("Transparent")
}

/// Memoizes opaque source material -> transparent derivative
#[derive(Debug)]
pub struct VariantCache {
    variants: HashMap<MaterialHandle, MaterialHandle>,
    sources: HashMap<MaterialHandle, MaterialHandle>,
    transparent_queue: u32,
}

impl VariantCache {
    pub fn new() -> Self {
        Self::with_render_queue(RENDER_QUEUE_TRANSPARENT)
    }

    /// Cache whose derivatives are placed in the given draw-order bucket
    pub fn with_render_queue(transparent_queue: u32) -> Self {
        Self {
            variants: HashMap::new(),
            sources: HashMap::new(),
            transparent_queue,
        }
    }

    /// Returns the transparent variant of `source`, deriving it on first use
    ///
    /// Already transparent sources come back unchanged. Returns `None` only
    /// when `source` does not exist in `materials`.
    pub fn get_or_create_transparent(
        &mut self,
        materials: &mut MaterialManager,
        source: MaterialHandle,
    ) -> Option<MaterialHandle> {
        let material = materials.get(source)?;
        if is_transparent(material) {
            return Some(source);
        }
        if let Some(&variant) = self.variants.get(&source) {
            return Some(variant);
        }

        let derived = self.derive(material);
        debug!(
            "Derived transparent variant '{}' from material {:?}",
            derived.name, source
        );
        let variant = materials.add_material(derived);
        self.variants.insert(source, variant);
        self.sources.insert(variant, source);
        Some(variant)
    }

    fn derive(&self, source: &Material) -> Material {
        Material {
            name: format!("{} (Transparent)", source.name),
            surface: SurfaceMode::Transparent,
            blend: Some(straight_alpha_blend()),
            depth_write: DepthWrite::Auto,
            alpha_clip: false,
            cull: Some(CullMode::Back),
            render_queue: self.transparent_queue,
            ..source.clone()
        }
    }

    /// Cached variant for `source`, without creating one
    pub fn variant_of(&self, source: MaterialHandle) -> Option<MaterialHandle> {
        self.variants.get(&source).copied()
    }

    /// Opaque source a derivative was created from
    pub fn source_of(&self, derivative: MaterialHandle) -> Option<MaterialHandle> {
        self.sources.get(&derivative).copied()
    }

    pub fn is_derivative(&self, handle: MaterialHandle) -> bool {
        self.sources.contains_key(&handle)
    }

    /// Number of cached variants
    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

impl Default for VariantCache {
    fn default() -> Self {
        Self::new()
    }
}
