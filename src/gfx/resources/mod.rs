//! Rendering configuration resources
//!
//! Materials, their shared storage, and the cache of transparent variants.

pub mod material;
pub mod variant_cache;

// Re-export main types
pub use material::{CullMode, DepthWrite, Material, MaterialHandle, MaterialManager, SurfaceMode};
pub use variant_cache::{is_transparent, VariantCache};
