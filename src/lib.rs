// src/lib.rs
//! Anatomy Tint
//!
//! Keeps the visibility, color and transparency of a hierarchical anatomical
//! model consistent while presets and interactive sliders both act on it.
//!
//! - [`gfx`] - Scene nodes, materials, transparent variants, per-draw overrides
//! - [`sync`] - Name resolution, original-material bindings, alpha application
//! - [`preset`] - Preset data and the engine that applies it
//! - [`events`] - Applied-alpha notifications
//! - [`controls`] - Transparency sliders
//!
//! ```
//! use anatomy_tint::prelude::*;
//!
//! let mut scene = Scene::new();
//! let tissue = scene.add_material(Material::default());
//! let root = scene.add_root("Model");
//! let heart = scene.add_child(root, "Heart_01").unwrap();
//! scene.attach_renderer(heart, MeshRenderer::new(vec![tissue])).unwrap();
//!
//! let mut ctx = SyncContext::default();
//! let mut engine = PresetEngine::new(root);
//! let report = engine
//!     .apply_json(
//!         &mut scene,
//!         &mut ctx,
//!         r#"{ "name": "demo", "presets": [
//!             { "name": "heart", "display": 1, "colorLut": { "R": 200, "G": 30, "B": 30, "A": 128 } }
//!         ] }"#,
//!     )
//!     .unwrap();
//! assert_eq!(report.applied, 1);
//! ```

pub mod config;
pub mod controls;
pub mod error;
pub mod events;
pub mod gfx;
pub mod prelude;
pub mod preset;
pub mod sync;

// Re-export main types for convenience
pub use config::{EngineConfig, OPAQUE_ALPHA_THRESHOLD};
pub use error::{ConfigError, PresetError, SceneError};
pub use preset::PresetEngine;
pub use sync::SyncContext;
