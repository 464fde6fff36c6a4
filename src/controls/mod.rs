//! # Slider Controls
//!
//! Transparency sliders that drive parts of the model directly and follow
//! preset changes passively through the notification bus.
//!
//! ## Key Components
//!
//! - [`SliderController`] - Base trait for all sliders
//! - [`OrganSlider`] - One logical part
//! - [`GroupSlider`] - Everything except excluded parts, with an averaged display
//! - [`SliderPanel`] - Owns sliders and their subscriptions
//!
//! ## Usage
//!
//! ```
//! use anatomy_tint::controls::{OrganSlider, SliderController, SliderPanel};
//! use anatomy_tint::gfx::Scene;
//! use anatomy_tint::sync::SyncContext;
//!
//! let mut scene = Scene::new();
//! let root = scene.add_root("Model");
//! let mut ctx = SyncContext::default();
//!
//! let mut panel = SliderPanel::new();
//! panel.add_slider(Box::new(OrganSlider::new("Heart", root)), &mut ctx);
//! panel.drag("Heart", &mut scene, &mut ctx, 128);
//! assert_eq!(panel.value("Heart"), Some(128));
//! ```

pub mod group_slider;
pub mod organ_slider;
pub mod panel;
pub mod traits;

// Re-export main types
pub use group_slider::GroupSlider;
pub use organ_slider::OrganSlider;
pub use panel::SliderPanel;
pub use traits::SliderController;
