//! # Scene Management Module
//!
//! This module provides the node hierarchy the synchronization engine works
//! against. Asset import lives outside this crate; importers populate a
//! [`Scene`] through its builder calls.
//!
//! ## Key Components
//!
//! - [`Scene`] - Node arena, material storage and per-draw overrides
//! - [`SceneNode`] - Named node with parent/children links
//! - [`MeshRenderer`] - Drawable part of a node: enable flag and material slots
//!
//! ## Usage
//!
//! ```
//! use anatomy_tint::gfx::resources::Material;
//! use anatomy_tint::gfx::scene::{MeshRenderer, Scene};
//!
//! let mut scene = Scene::new();
//! let tissue = scene.add_material(Material::default());
//! let root = scene.add_root("Model");
//! let heart = scene.add_child(root, "Heart_01").unwrap();
//! scene.attach_renderer(heart, MeshRenderer::new(vec![tissue])).unwrap();
//! assert_eq!(scene.renderables_under(root), vec![heart]);
//! ```

pub mod node;
pub mod scene;

// Re-export main types
pub use node::{MeshRenderer, NodeId, SceneNode};
pub use scene::{Ancestors, Scene, SceneStatistics};
