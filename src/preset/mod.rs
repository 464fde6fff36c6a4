//! # Presets
//!
//! Named record sets assigning visibility and color to logical parts, and the
//! engine that applies them through the shared [`SyncContext`](crate::sync::SyncContext).

pub mod data;
pub mod engine;

pub use data::{Preset, PresetRecord};
pub use engine::{EntityState, PresetEngine, PresetReport};
