//! Group transparency slider
//!
//! One slider for many parts, with an averaged display.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use log::debug;

use crate::events::{NotificationBus, SubscriptionId};
use crate::gfx::{
    color::{channel_to_unit, clamp_channel, Rgba},
    scene::{NodeId, Scene},
};
use crate::sync::{
    names::{chain_matches, resolve_entities},
    ColorMode, EntityKey, SyncContext,
};

use super::traits::SliderController;

/// Transparency slider for "everything else"
///
/// Drives every renderer under its root except those whose ancestor chain
/// matches one of the exclusion keys (parts that have their own sliders).
/// With explicit members it drives just those members, minus exclusions.
///
/// It tracks the last alpha of every key it drives and displays their
/// average. Keys outside the group are ignored.
#[derive(Debug)]
pub struct GroupSlider {
    label: String,
    root: NodeId,
    members: Vec<EntityKey>,
    exclusions: Vec<EntityKey>,
    tracked: Rc<RefCell<BTreeMap<EntityKey, u8>>>,
    subscription: Option<SubscriptionId>,
}

impl GroupSlider {
    pub fn new(label: &str, root: NodeId, exclusions: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            root,
            members: Vec::new(),
            exclusions: exclusions
                .iter()
                .map(|name| EntityKey::new(name))
                .filter(|key| !key.is_empty())
                .collect(),
            tracked: Rc::new(RefCell::new(BTreeMap::new())),
            subscription: None,
        }
    }

    /// Limits the group to `members`, each starting fully opaque
    pub fn with_members(mut self, members: &[&str]) -> Self {
        self.members = members
            .iter()
            .map(|name| EntityKey::new(name))
            .filter(|key| !key.is_empty())
            .collect();
        let mut tracked = self.tracked.borrow_mut();
        for key in &self.members {
            if drives_key(&self.members, &self.exclusions, key) {
                tracked.entry(key.clone()).or_insert(255);
            }
        }
        drop(tracked);
        self
    }

    pub fn is_excluded(&self, key: &EntityKey) -> bool {
        contains_any(&self.exclusions, key)
    }

    /// True if presets and drags for `key` belong to this group
    pub fn drives(&self, key: &EntityKey) -> bool {
        drives_key(&self.members, &self.exclusions, key)
    }

    /// Last alpha tracked for `key`
    pub fn tracked_value(&self, key: &EntityKey) -> Option<u8> {
        self.tracked.borrow().get(key).copied()
    }

    /// Renderers a drag would touch
    pub fn targets(&self, scene: &Scene) -> Vec<NodeId> {
        let candidates = if self.members.is_empty() {
            scene.renderables_under(self.root)
        } else {
            let mut seen = HashSet::new();
            self.members
                .iter()
                .flat_map(|key| resolve_entities(scene, self.root, key))
                .filter(|node| seen.insert(*node))
                .collect()
        };

        candidates
            .into_iter()
            .filter(|&node| {
                !self
                    .exclusions
                    .iter()
                    .any(|key| chain_matches(scene, self.root, node, key))
            })
            .collect()
    }
}

fn contains_any(keys: &[EntityKey], key: &EntityKey) -> bool {
    keys.iter().any(|k| key.as_str().contains(k.as_str()))
}

/// No members means every key that is not excluded
fn drives_key(members: &[EntityKey], exclusions: &[EntityKey], key: &EntityKey) -> bool {
    !key.is_empty()
        && !contains_any(exclusions, key)
        && (members.is_empty() || contains_any(members, key))
}

fn average(values: &BTreeMap<EntityKey, u8>) -> u8 {
    if values.is_empty() {
        return 255;
    }
    let sum: u32 = values.values().map(|&v| u32::from(v)).sum();
    ((sum as f32) / (values.len() as f32)).round() as u8
}

impl SliderController for GroupSlider {
    fn name(&self) -> &str {
        &self.label
    }

    fn value(&self) -> u8 {
        average(&self.tracked.borrow())
    }

    fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    fn attach(&mut self, bus: &mut NotificationBus) {
        if self.subscription.is_some() {
            return;
        }
        let members = self.members.clone();
        let exclusions = self.exclusions.clone();
        let tracked = Rc::clone(&self.tracked);
        self.subscription = Some(bus.subscribe(move |event| {
            let key = EntityKey::new(&event.entity_key);
            if drives_key(&members, &exclusions, &key) {
                tracked.borrow_mut().insert(key, event.alpha);
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
        for (key, value) in self.tracked.borrow_mut().iter_mut() {
            if drives_key(&self.members, &self.exclusions, key) {
                *value = alpha;
            }
        }

        let color = Rgba::WHITE.with_alpha(channel_to_unit(alpha.into()));
        let targets = self.targets(scene);
        for &node in &targets {
            ctx.apply_to_renderable(scene, node, color, ColorMode::AlphaOnly);
        }

        debug!(
            "Group slider '{}' set alpha {} on {} renderers",
            self.label,
            alpha,
            targets.len()
        );
        targets.len()
    }
}
