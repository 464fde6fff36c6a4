//! Material system for anatomical rendering
//!
//! Provides material definitions and centralized storage. Materials are stored
//! in [`MaterialManager`] and renderers reference them by [`MaterialHandle`].
//! A handle is the material's identity: two handles compare equal only when they
//! point at the same stored material, never because two materials hold equal values.

use serde::Deserialize;
use wgpu::{
    BlendComponent, BlendFactor, BlendOperation, BlendState, ColorTargetState, ColorWrites, Face,
    FrontFace, PolygonMode, PrimitiveState, PrimitiveTopology, TextureFormat,
};

/// Draw-order bucket for opaque geometry
pub const RENDER_QUEUE_GEOMETRY: u32 = 2000;

/// Draw-order bucket for alpha-blended geometry, drawn after all opaque geometry
pub const RENDER_QUEUE_TRANSPARENT: u32 = 3000;

/// Identity of a material stored in a [`MaterialManager`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(usize);

impl MaterialHandle {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Surface type of a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SurfaceMode {
    #[default]
    Opaque,
    Transparent,
}

/// Depth-write control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DepthWrite {
    /// Writes depth when opaque, skips depth writes when transparent
    #[default]
    Auto,
    On,
    Off,
}

/// Face culling parameter exposed by a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CullMode {
    Off,
    Front,
    #[default]
    Back,
}

impl CullMode {
    /// The equivalent wgpu primitive cull mode
    pub fn to_wgpu(self) -> Option<Face> {
        match self {
            CullMode::Off => None,
            CullMode::Front => Some(Face::Front),
            CullMode::Back => Some(Face::Back),
        }
    }
}

/// GPU uniform data for materials
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub alpha_clip: f32,
    _padding: f32,
}

/// Straight (non-premultiplied) alpha blending
pub fn straight_alpha_blend() -> BlendState {
    let component = BlendComponent {
        src_factor: BlendFactor::SrcAlpha,
        dst_factor: BlendFactor::OneMinusSrcAlpha,
        operation: BlendOperation::Add,
    };
    BlendState {
        color: component,
        alpha: component,
    }
}

/// Rendering configuration of a surface
///
/// Besides the PBR properties this carries the render-state parameters a
/// backend needs to pick a pipeline: surface mode, blending, depth writes,
/// alpha clipping, culling and the draw-order bucket. The three transparency
/// signals (`surface`, `transparent_keyword`, `render_type`) are tracked
/// separately because different producers only ever set some of them.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub surface: SurfaceMode,
    pub blend: Option<BlendState>,
    pub depth_write: DepthWrite,
    pub alpha_clip: bool,
    /// `None` when the configuration has no culling parameter at all
    pub cull: Option<CullMode>,
    pub render_queue: u32,
    pub render_type: String,
    pub transparent_keyword: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            base_color: [0.8, 0.8, 0.8, 1.0],
            metallic: 0.0,
            roughness: 0.5,
            surface: SurfaceMode::Opaque,
            blend: None,
            depth_write: DepthWrite::Auto,
            alpha_clip: false,
            cull: Some(CullMode::Back),
            render_queue: RENDER_QUEUE_GEOMETRY,
            render_type: "Opaque".to_string(),
            transparent_keyword: false,
        }
    }
}

impl Material {
    /// Creates a new opaque material with basic PBR properties
    ///
    /// # Arguments
    /// * `name` - Display name; not required to be unique
    /// * `base_color` - RGBA base color
    /// * `metallic` - Metallic factor (0.0 = dielectric, 1.0 = metallic)
    /// * `roughness` - Surface roughness (0.0 = mirror, 1.0 = rough)
    pub fn new(name: &str, base_color: [f32; 4], metallic: f32, roughness: f32) -> Self {
        Self {
            name: name.to_string(),
            base_color,
            metallic: metallic.clamp(0.0, 1.0),
            roughness: roughness.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    /// Builder pattern: Set base color from RGB values
    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.base_color = [r, g, b, self.base_color[3]];
        self
    }

    /// Builder pattern: Set alpha
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.base_color[3] = alpha.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set metallic factor
    pub fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set roughness factor
    pub fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness.clamp(0.0, 1.0);
        self
    }

    /// Builder pattern: Set the culling parameter (`None` removes it)
    pub fn with_cull(mut self, cull: Option<CullMode>) -> Self {
        self.cull = cull;
        self
    }

    /// Builder pattern: Set the render-type classification tag
    pub fn with_render_type(mut self, render_type: &str) -> Self {
        self.render_type = render_type.to_string();
        self
    }

    /// Builder pattern: Set the transparency indicator flag
    pub fn with_transparent_keyword(mut self, enabled: bool) -> Self {
        self.transparent_keyword = enabled;
        self
    }

    /// Builder pattern: Set the surface mode without touching any other state
    pub fn with_surface(mut self, surface: SurfaceMode) -> Self {
        self.surface = surface;
        self
    }

    /// Resolved depth-write flag for pipeline creation
    pub fn writes_depth(&self) -> bool {
        match self.depth_write {
            DepthWrite::On => true,
            DepthWrite::Off => false,
            DepthWrite::Auto => self.surface == SurfaceMode::Opaque,
        }
    }

    /// Uniform data for upload
    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            base_color: self.base_color,
            metallic: self.metallic,
            roughness: self.roughness,
            alpha_clip: if self.alpha_clip { 1.0 } else { 0.0 },
            _padding: 0.0,
        }
    }

    /// Primitive state for a pipeline drawing this material
    pub fn primitive_state(&self) -> PrimitiveState {
        PrimitiveState {
            topology: PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: FrontFace::Ccw,
            cull_mode: self.cull.and_then(CullMode::to_wgpu),
            polygon_mode: PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        }
    }

    /// Color target for a pipeline drawing this material
    pub fn color_target(&self, format: TextureFormat) -> ColorTargetState {
        ColorTargetState {
            format,
            blend: Some(self.blend.unwrap_or(BlendState::REPLACE)),
            write_mask: ColorWrites::ALL,
        }
    }
}

/// Manages all materials in a scene
///
/// Centralized storage for all materials. Renderers reference materials by
/// handle rather than storing material data directly, so one material can be
/// shared by any number of renderers and submeshes.
#[derive(Debug)]
pub struct MaterialManager {
    materials: Vec<Material>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: Vec::new(),
        }
    }

    /// Stores a material and returns its handle
    pub fn add_material(&mut self, material: Material) -> MaterialHandle {
        let handle = MaterialHandle(self.materials.len());
        self.materials.push(material);
        handle
    }

    pub fn get(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0)
    }

    pub fn get_mut(&mut self, handle: MaterialHandle) -> Option<&mut Material> {
        self.materials.get_mut(handle.0)
    }

    /// First material with the given name
    pub fn find_by_name(&self, name: &str) -> Option<MaterialHandle> {
        self.materials
            .iter()
            .position(|m| m.name == name)
            .map(MaterialHandle)
    }

    /// Number of stored materials
    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Handles of every stored material, in insertion order
    pub fn handles(&self) -> impl Iterator<Item = MaterialHandle> {
        (0..self.materials.len()).map(MaterialHandle)
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_are_identities() {
        let mut manager = MaterialManager::new();
        let a = manager.add_material(Material::new("skin", [1.0; 4], 0.0, 0.5));
        let b = manager.add_material(Material::new("skin", [1.0; 4], 0.0, 0.5));

        assert_ne!(a, b);
        assert_eq!(manager.get(a), manager.get(b));
        assert_eq!(manager.find_by_name("skin"), Some(a));
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn test_builder_clamps() {
        let material = Material::new("m", [0.5, 0.5, 0.5, 1.0], 3.0, -1.0).with_alpha(2.0);
        assert_eq!(material.metallic, 1.0);
        assert_eq!(material.roughness, 0.0);
        assert_eq!(material.base_color[3], 1.0);
    }

    #[test]
    fn test_pipeline_views() {
        let material = Material::default().with_cull(Some(CullMode::Front));
        assert_eq!(material.primitive_state().cull_mode, Some(Face::Front));
        assert!(material.writes_depth());

        let target = material.color_target(TextureFormat::Bgra8Unorm);
        assert_eq!(target.blend, Some(BlendState::REPLACE));

        let uncullable = Material::default().with_cull(None);
        assert_eq!(uncullable.primitive_state().cull_mode, None);
    }

    #[test]
    fn test_uniform_layout() {
        let uniform = Material::default().uniform();
        assert_eq!(bytemuck::bytes_of(&uniform).len(), 32);
        assert_eq!(uniform.base_color, [0.8, 0.8, 0.8, 1.0]);
    }
}
