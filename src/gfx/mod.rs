//! # Graphics Module
//!
//! Scene and resource types the synchronization engine mutates.
//!
//! ## Architecture Overview
//!
//! - **Scene Management** ([`scene`]) - Node hierarchy and mesh renderers
//! - **Resource Management** ([`resources`]) - Materials and transparent variants
//! - **Rendering** ([`rendering`]) - Per-draw color overrides
//! - **Color** ([`color`]) - RGBA conversion and clamping
//!
//! The render state on [`resources::Material`] is expressed with wgpu types so a
//! backend can build pipelines straight from it.

pub mod color;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use color::Rgba;
pub use scene::Scene;
