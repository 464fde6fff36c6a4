//! # Slider Panel
//!
//! Owns the sliders of one scene and keeps their subscriptions in step with
//! their lifetime.

use std::collections::HashMap;

use crate::gfx::scene::Scene;
use crate::sync::SyncContext;

use super::traits::SliderController;

/// Manager for a set of named sliders
#[derive(Default)]
pub struct SliderPanel {
    sliders: HashMap<String, Box<dyn SliderController>>,
    order: Vec<String>,
}

impl SliderPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a slider and subscribes it
    ///
    /// A slider with the same name is detached and replaced.
    pub fn add_slider(&mut self, mut slider: Box<dyn SliderController>, ctx: &mut SyncContext) {
        let name = slider.name().to_string();
        slider.attach(&mut ctx.bus);
        if let Some(mut previous) = self.sliders.insert(name.clone(), slider) {
            previous.detach(&mut ctx.bus);
        } else {
            self.order.push(name);
        }
    }

    /// Removes a slider and unsubscribes it
    pub fn remove_slider(&mut self, name: &str, ctx: &mut SyncContext) -> bool {
        match self.sliders.remove(name) {
            Some(mut slider) => {
                slider.detach(&mut ctx.bus);
                self.order.retain(|n| n != name);
                true
            }
            None => false,
        }
    }

    pub fn has_slider(&self, name: &str) -> bool {
        self.sliders.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<u8> {
        self.sliders.get(name).map(|s| s.value())
    }

    /// Forwards a drag to the named slider
    pub fn drag(
        &mut self,
        name: &str,
        scene: &mut Scene,
        ctx: &mut SyncContext,
        alpha: i64,
    ) -> Option<usize> {
        self.sliders
            .get_mut(name)
            .map(|slider| slider.drag(scene, ctx, alpha))
    }

    /// `(name, value)` of every slider in insertion order
    pub fn values(&self) -> Vec<(&str, u8)> {
        self.order
            .iter()
            .filter_map(|name| self.sliders.get(name).map(|s| (name.as_str(), s.value())))
            .collect()
    }

    pub fn slider_count(&self) -> usize {
        self.sliders.len()
    }

    /// Detaches and drops every slider
    pub fn clear(&mut self, ctx: &mut SyncContext) {
        for (_, mut slider) in self.sliders.drain() {
            slider.detach(&mut ctx.bus);
        }
        self.order.clear();
    }
}
