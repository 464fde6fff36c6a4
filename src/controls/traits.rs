//! # Slider Traits
//!
//! Interface shared by every transparency slider.

use crate::events::NotificationBus;
use crate::gfx::scene::Scene;
use crate::sync::SyncContext;

/// Core trait for transparency sliders.
///
/// ## Lifecycle
///
/// 1. **Attach** - Subscribe to the bus so preset changes show up in [`value`](Self::value)
/// 2. **Drag** - User input, applied directly through the alpha applier
/// 3. **Detach** - Unsubscribe before the slider is dropped
///
/// Subscriptions only ever write display state. A preset moving a slider
/// never causes the slider to re-apply anything.
pub trait SliderController {
    /// Label shown next to the slider
    fn name(&self) -> &str;

    /// Displayed alpha on the `[0, 255]` scale
    fn value(&self) -> u8;

    fn is_attached(&self) -> bool;

    /// Subscribes to applied-alpha notifications; calling twice is a no-op
    fn attach(&mut self, bus: &mut NotificationBus);

    /// Drops the subscription, if any
    fn detach(&mut self, bus: &mut NotificationBus);

    /// Applies a user-chosen alpha (clamped to `[0, 255]`)
    ///
    /// Returns the number of renderers touched.
    fn drag(&mut self, scene: &mut Scene, ctx: &mut SyncContext, alpha: i64) -> usize;
}
