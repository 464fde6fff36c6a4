//! Rendering backend surface: per-draw overrides and their uniform layout.

pub mod overrides;

pub use overrides::{effective_color, uniform_for, DrawOverrides, OverrideUniform};
