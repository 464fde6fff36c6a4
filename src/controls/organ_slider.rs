//! Single-part transparency slider

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::events::{NotificationBus, SubscriptionId};
use crate::gfx::{
    color::{channel_to_unit, clamp_channel, Rgba},
    scene::{NodeId, Scene},
};
use crate::sync::{ColorMode, EntityKey, SyncContext};

use super::traits::SliderController;

/// Transparency slider for a single logical part
///
/// Dragging writes alpha straight through the alpha applier. Presets for the
/// same key move the displayed value through the bus without re-applying.
#[derive(Debug)]
pub struct OrganSlider {
    label: String,
    key: EntityKey,
    root: NodeId,
    value: Rc<Cell<u8>>,
    subscription: Option<SubscriptionId>,
}

impl OrganSlider {
    pub fn new(label: &str, root: NodeId) -> Self {
        Self {
            label: label.to_string(),
            key: EntityKey::new(label),
            root,
            value: Rc::new(Cell::new(255)),
            subscription: None,
        }
    }

    pub fn key(&self) -> &EntityKey {
        &self.key
    }
}

impl SliderController for OrganSlider {
    fn name(&self) -> &str {
        &self.label
    }

    fn value(&self) -> u8 {
        self.value.get()
    }

    fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    fn attach(&mut self, bus: &mut NotificationBus) {
        if self.subscription.is_some() {
            return;
        }
        let key = self.key.clone();
        let value = Rc::clone(&self.value);
        self.subscription = Some(bus.subscribe(move |event| {
            if event.entity_key == key.as_str() {
                value.set(event.alpha);
            }
        }));
    }

    fn detach(&mut self, bus: &mut NotificationBus) {
        if let Some(id) = self.subscription.take() {
            bus.unsubscribe(id);
        }
    }

    fn drag(&mut self, scene: &mut Scene, ctx: &mut SyncContext, alpha: i64) -> usize {
        let alpha = clamp_channel(alpha);
        self.value.set(alpha);

        let color = Rgba::WHITE.with_alpha(channel_to_unit(alpha.into()));
        let bindings = ctx.collect(scene, self.root, &self.key);
        for binding in &bindings {
            ctx.apply_to_renderable(scene, binding.renderable, color, ColorMode::AlphaOnly);
        }

        debug!(
            "Slider '{}' set alpha {} on {} renderers",
            self.label,
            alpha,
            bindings.len()
        );
        bindings.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AlphaApplied;
    use crate::gfx::{resources::Material, scene::MeshRenderer};

    fn scene() -> (Scene, NodeId, NodeId) {
        let mut scene = Scene::new();
        let tissue = scene.add_material(Material::new("t", [0.6, 0.2, 0.2, 1.0], 0.0, 0.5));
        let root = scene.add_root("Model");
        let lung = scene.add_child(root, "Left-Lung").unwrap();
        scene.attach_renderer(lung, MeshRenderer::new(vec![tissue])).unwrap();
        (scene, root, lung)
    }

    #[test]
    fn test_drag_changes_alpha_only() {
        let (mut scene, root, lung) = scene();
        let mut ctx = SyncContext::default();
        let mut slider = OrganSlider::new("left lung", root);

        assert_eq!(slider.drag(&mut scene, &mut ctx, 51), 1);
        assert_eq!(slider.value(), 51);

        let color = scene.overrides.get(lung, 0).unwrap();
        assert!(color.approx_eq(Rgba::new(0.6, 0.2, 0.2, 0.2), 0.001));
        assert_eq!(ctx.variants.len(), 1);
    }

    #[test]
    fn test_follows_bus_for_own_key_only() {
        let (_, root, _) = scene();
        let mut ctx = SyncContext::default();
        let mut slider = OrganSlider::new("Left_Lung", root);
        slider.attach(&mut ctx.bus);
        slider.attach(&mut ctx.bus);
        assert_eq!(ctx.bus.subscriber_count(), 1);

        ctx.bus.publish(&AlphaApplied {
            entity_key: "heart".to_string(),
            alpha: 12,
        });
        assert_eq!(slider.value(), 255);

        ctx.bus.publish(&AlphaApplied {
            entity_key: "leftlung".to_string(),
            alpha: 77,
        });
        assert_eq!(slider.value(), 77);

        slider.detach(&mut ctx.bus);
        assert!(!slider.is_attached());
        ctx.bus.publish(&AlphaApplied {
            entity_key: "leftlung".to_string(),
            alpha: 5,
        });
        assert_eq!(slider.value(), 77);
    }

    #[test]
    fn test_drag_clamps() {
        let (mut scene, root, lung) = scene();
        let mut ctx = SyncContext::default();
        let original = scene.renderer(lung).unwrap().materials.clone();
        let mut slider = OrganSlider::new("lung", root);

        slider.drag(&mut scene, &mut ctx, 1000);
        assert_eq!(slider.value(), 255);
        assert_eq!(scene.renderer(lung).unwrap().materials, original);
    }
}
