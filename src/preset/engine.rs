//! Preset application
//!
//! Moves each matched renderer between hidden, opaque and transparent.

use std::collections::HashMap;
use std::path::Path;

use log::{debug, info, warn};

use crate::config::EngineConfig;
use crate::error::PresetError;
use crate::events::AlphaApplied;
use crate::gfx::{
    color::channel_to_unit,
    scene::{NodeId, Scene},
};
use crate::sync::{ColorMode, EntityKey, SyncContext};

use super::data::{Preset, PresetRecord};

/// Display state a record puts each matched renderer in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityState {
    Hidden,
    Opaque,
    Transparent,
}

impl EntityState {
    pub fn for_record(record: &PresetRecord, config: &EngineConfig) -> Self {
        if !record.visible {
            EntityState::Hidden
        } else if config.needs_transparency(channel_to_unit(record.alpha.into())) {
            EntityState::Transparent
        } else {
            EntityState::Opaque
        }
    }
}

/// Counters of one preset application
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PresetReport {
    /// Renderers shown and colored
    pub applied: usize,
    /// Renderers hidden
    pub hidden: usize,
    /// Records that matched no renderer
    pub missing: usize,
}

/// Applies presets to the subtree under one root node
///
/// Records are processed in order. For each, matching renderers are shown
/// or hidden and colored, then one [`AlphaApplied`] is published on the
/// context's bus, whether the record matched anything or not.
#[derive(Debug)]
pub struct PresetEngine {
    root: NodeId,
    states: HashMap<(EntityKey, NodeId), EntityState>,
}

impl PresetEngine {
    pub fn new(root: NodeId) -> Self {
        Self {
            root,
            states: HashMap::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Last state a record for `key` put `node` in
    ///
    /// This is the last applied state. [`SyncContext::reset`] does not clear
    /// it; call [`PresetEngine::clear_states`] alongside.
    pub fn state_of(&self, key: &EntityKey, node: NodeId) -> Option<EntityState> {
        self.states.get(&(key.clone(), node)).copied()
    }

    /// Forgets every recorded state
    pub fn clear_states(&mut self) {
        self.states.clear();
    }

    /// Resets the context and forgets recorded states
    pub fn reset(&mut self, scene: &mut Scene, ctx: &mut SyncContext) {
        ctx.reset(scene);
        self.clear_states();
    }

    /// Parses `content` and applies it; nothing is touched if parsing fails
    pub fn apply_json(
        &mut self,
        scene: &mut Scene,
        ctx: &mut SyncContext,
        content: &str,
    ) -> Result<PresetReport, PresetError> {
        let preset = Preset::from_json_str(content)?;
        Ok(self.apply(scene, ctx, &preset))
    }

    /// Loads a preset file and applies it; nothing is touched if loading fails
    pub fn apply_file(
        &mut self,
        scene: &mut Scene,
        ctx: &mut SyncContext,
        path: &Path,
    ) -> Result<PresetReport, PresetError> {
        let preset = Preset::load(path)?;
        Ok(self.apply(scene, ctx, &preset))
    }

    pub fn apply(&mut self, scene: &mut Scene, ctx: &mut SyncContext, preset: &Preset) -> PresetReport {
        let mut report = PresetReport::default();

        for record in &preset.records {
            self.apply_record(scene, ctx, record, &mut report);
            ctx.bus.publish(&AlphaApplied {
                entity_key: record.key.to_string(),
                alpha: record.alpha,
            });
        }

        info!(
            "Preset '{}' (v{}): applied={} hidden={} missing={}",
            preset.name, preset.version, report.applied, report.hidden, report.missing
        );
        report
    }

    fn apply_record(
        &mut self,
        scene: &mut Scene,
        ctx: &mut SyncContext,
        record: &PresetRecord,
        report: &mut PresetReport,
    ) {
        let bindings = ctx.collect(scene, self.root, &record.key);
        if bindings.is_empty() {
            warn!("Preset record '{}' matched no renderer", record.name);
            report.missing += 1;
            return;
        }

        let state = EntityState::for_record(record, &ctx.config);
        debug!(
            "Record '{}' -> {:?} on {} renderers",
            record.name,
            state,
            bindings.len()
        );

        for binding in bindings {
            let node = binding.renderable;
            match state {
                EntityState::Hidden => {
                    scene.set_enabled(node, false);
                    report.hidden += 1;
                }
                EntityState::Opaque | EntityState::Transparent => {
                    scene.set_enabled(node, true);
                    ctx.apply_to_renderable(scene, node, record.rgba(), ColorMode::Full);
                    report.applied += 1;
                }
            }
            self.states.insert((record.key.clone(), node), state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::{
        color::Rgba,
        resources::{Material, MaterialHandle},
        scene::MeshRenderer,
    };
    use std::cell::RefCell;
    use std::rc::Rc;

    fn organ_scene() -> (Scene, NodeId, Vec<NodeId>, MaterialHandle) {
        let mut scene = Scene::new();
        let tissue = scene.add_material(Material::default());
        let root = scene.add_root("Model");
        let mut parts = Vec::new();
        for name in ["Heart_01", "Liver", "Stomach"] {
            let group = scene.add_child(root, name).unwrap();
            let mesh = scene.add_child(group, "mesh").unwrap();
            scene.attach_renderer(mesh, MeshRenderer::new(vec![tissue])).unwrap();
            parts.push(mesh);
        }
        (scene, root, parts, tissue)
    }

    fn record(name: &str, display: i64, alpha: i64) -> String {
        format!(
            r#"{{ "name": "{name}", "display": {display}, "colorLut": {{ "R": 100, "G": 100, "B": 100, "A": {alpha} }} }}"#
        )
    }

    fn preset_json(records: &[String]) -> String {
        format!(
            r#"{{ "version": "1", "name": "test", "presets": [{}] }}"#,
            records.join(",")
        )
    }

    #[test]
    fn test_partial_application_counts_missing() {
        let (mut scene, root, parts, _) = organ_scene();
        let mut ctx = SyncContext::default();
        let mut engine = PresetEngine::new(root);

        let json = preset_json(&[
            record("heart", 1, 255),
            record("pancreas", 1, 255),
            record("liver", 0, 255),
            record("appendix", 1, 10),
            record("stomach", 1, 60),
        ]);
        let report = engine.apply_json(&mut scene, &mut ctx, &json).unwrap();

        assert_eq!(
            report,
            PresetReport {
                applied: 2,
                hidden: 1,
                missing: 2
            }
        );
        assert!(!scene.renderer(parts[1]).unwrap().enabled);
        assert_eq!(
            engine.state_of(&"stomach".into(), parts[2]),
            Some(EntityState::Transparent)
        );
        assert_eq!(engine.state_of(&"heart".into(), parts[0]), Some(EntityState::Opaque));
        assert_eq!(engine.state_of(&"liver".into(), parts[1]), Some(EntityState::Hidden));
    }

    #[test]
    fn test_hidden_record_does_not_touch_materials() {
        let (mut scene, root, parts, tissue) = organ_scene();
        let mut ctx = SyncContext::default();
        let mut engine = PresetEngine::new(root);

        let json = preset_json(&[record("liver", 0, 10)]);
        engine.apply_json(&mut scene, &mut ctx, &json).unwrap();

        assert_eq!(scene.renderer(parts[1]).unwrap().materials, vec![Some(tissue)]);
        assert!(scene.overrides.is_empty());
        assert!(ctx.variants.is_empty());
    }

    #[test]
    fn test_one_event_per_record() {
        let (mut scene, root, _, _) = organ_scene();
        let mut ctx = SyncContext::default();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        ctx.bus
            .subscribe(move |e: &AlphaApplied| sink.borrow_mut().push((e.entity_key.clone(), e.alpha)));

        let mut engine = PresetEngine::new(root);
        let json = preset_json(&[
            record("Heart", 1, 90),
            record("missing part", 1, 300),
            record("liver", 0, -5),
        ]);
        engine.apply_json(&mut scene, &mut ctx, &json).unwrap();

        assert_eq!(
            *events.borrow(),
            vec![
                ("heart".to_string(), 90),
                ("missingpart".to_string(), 255),
                ("liver".to_string(), 0)
            ]
        );
    }

    #[test]
    fn test_unparsable_preset_changes_nothing() {
        let (mut scene, root, parts, tissue) = organ_scene();
        let mut ctx = SyncContext::default();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        ctx.bus.subscribe(move |_| *sink.borrow_mut() += 1);

        let mut engine = PresetEngine::new(root);
        let broken = format!("{} trailing", preset_json(&[record("heart", 0, 0)]));
        assert!(engine.apply_json(&mut scene, &mut ctx, &broken).is_err());

        assert!(scene.renderer(parts[0]).unwrap().enabled);
        assert_eq!(scene.renderer(parts[0]).unwrap().materials, vec![Some(tissue)]);
        assert!(ctx.registry.is_empty());
        assert_eq!(*count.borrow(), 0);
    }

    #[test]
    fn test_state_transitions_are_reversible() {
        let (mut scene, root, parts, tissue) = organ_scene();
        let mut ctx = SyncContext::default();
        let mut engine = PresetEngine::new(root);
        let heart = parts[0];

        engine
            .apply_json(&mut scene, &mut ctx, &preset_json(&[record("heart", 0, 255)]))
            .unwrap();
        assert!(!scene.renderer(heart).unwrap().enabled);

        engine
            .apply_json(&mut scene, &mut ctx, &preset_json(&[record("heart", 1, 128)]))
            .unwrap();
        assert!(scene.renderer(heart).unwrap().enabled);
        assert_ne!(scene.renderer(heart).unwrap().materials, vec![Some(tissue)]);

        engine
            .apply_json(&mut scene, &mut ctx, &preset_json(&[record("heart", 1, 255)]))
            .unwrap();
        assert_eq!(scene.renderer(heart).unwrap().materials, vec![Some(tissue)]);
        assert_eq!(
            scene.overrides.get(heart, 0),
            Some(Rgba::from_channels(100, 100, 100, 255))
        );
    }

    #[test]
    fn test_reset_forgets_states() {
        let (mut scene, root, parts, tissue) = organ_scene();
        let mut ctx = SyncContext::default();
        let mut engine = PresetEngine::new(root);
        let heart = parts[0];
        let key = EntityKey::new("heart");

        engine
            .apply_json(&mut scene, &mut ctx, &preset_json(&[record("heart", 1, 40)]))
            .unwrap();
        assert_eq!(engine.state_of(&key, heart), Some(EntityState::Transparent));

        engine.reset(&mut scene, &mut ctx);
        assert_eq!(engine.state_of(&key, heart), None);
        assert_eq!(scene.renderer(heart).unwrap().materials, vec![Some(tissue)]);
        assert!(scene.overrides.is_empty());
    }
}
