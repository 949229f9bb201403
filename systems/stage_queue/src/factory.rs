use std::collections::BTreeMap;

use combat_queue_core::{PanelId, StageId, Transform};
use glam::Vec3;
use tracing::warn;

use crate::CombatStage;

/// Creates and releases the visual resources behind combat stages.
pub trait StageFactory {
    /// Creates a stage parented to `parent` and presented at `position`.
    fn instantiate(&mut self, parent: PanelId, position: Vec3) -> CombatStage;

    /// Releases every resource held for `stage`.
    fn release(&mut self, stage: StageId);
}

/// Factory that hands out sequential identifiers and tracks live stages per panel.
#[derive(Debug)]
pub struct PanelFactory {
    next_id: u32,
    prefab_scale: Vec3,
    live: BTreeMap<StageId, PanelId>,
}

impl PanelFactory {
    /// Creates a factory whose stages spawn at unit scale.
    #[must_use]
    pub fn new() -> Self {
        Self::with_prefab_scale(Vec3::ONE)
    }

    /// Creates a factory whose stages spawn at `prefab_scale`.
    #[must_use]
    pub fn with_prefab_scale(prefab_scale: Vec3) -> Self {
        Self {
            next_id: 0,
            prefab_scale,
            live: BTreeMap::new(),
        }
    }

    /// Number of stages instantiated and not yet released.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    /// Panel that parents `stage`, if the stage is live.
    #[must_use]
    pub fn parent_of(&self, stage: StageId) -> Option<PanelId> {
        self.live.get(&stage).copied()
    }
}

impl Default for PanelFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl StageFactory for PanelFactory {
    fn instantiate(&mut self, parent: PanelId, position: Vec3) -> CombatStage {
        let id = StageId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.live.insert(id, parent);
        CombatStage::new(id, Transform::new(position, self.prefab_scale))
    }

    fn release(&mut self, stage: StageId) {
        if self.live.remove(&stage).is_none() {
            warn!(stage = stage.get(), "released a stage that was not live");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_live_stages_until_released() {
        let mut factory = PanelFactory::new();
        let panel = PanelId::new(4);

        let first = factory.instantiate(panel, Vec3::new(0.0, 300.0, 0.0));
        let second = factory.instantiate(panel, Vec3::new(0.0, 500.0, 0.0));

        assert_ne!(first.id(), second.id());
        assert_eq!(factory.live_count(), 2);
        assert_eq!(factory.parent_of(first.id()), Some(panel));

        factory.release(first.id());
        assert_eq!(factory.live_count(), 1);
        assert_eq!(factory.parent_of(first.id()), None);
    }

    #[test]
    fn spawned_stage_records_spawn_transform_as_last() {
        let mut factory = PanelFactory::with_prefab_scale(Vec3::splat(2.0));
        let stage = factory.instantiate(PanelId::default(), Vec3::new(0.0, 700.0, 0.0));

        assert_eq!(stage.position(), stage.last_position());
        assert_eq!(stage.scale(), Vec3::splat(2.0));
        assert_eq!(stage.last_scale(), Vec3::splat(2.0));
        assert_eq!(stage.visibility(), None);
    }
}
