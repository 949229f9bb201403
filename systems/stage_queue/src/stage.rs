use combat_queue_content::EnemyData;
use combat_queue_core::{Color, StageId, Transform};
use combat_queue_system_animation::Animated;
use glam::Vec3;

/// One enemy-encounter slot displayed in the queue.
#[derive(Clone, Debug, PartialEq)]
pub struct CombatStage {
    id: StageId,
    current: Transform,
    last: Transform,
    visibility: Option<Color>,
    enemies: Vec<EnemyData>,
}

impl CombatStage {
    /// Creates a stage presented at `transform`, which also becomes its last
    /// recorded transform.
    #[must_use]
    pub fn new(id: StageId, transform: Transform) -> Self {
        Self {
            id,
            current: transform,
            last: transform,
            visibility: None,
            enemies: Vec::new(),
        }
    }

    /// Identifier assigned by the factory.
    #[must_use]
    pub const fn id(&self) -> StageId {
        self.id
    }

    /// Presented position.
    #[must_use]
    pub const fn position(&self) -> Vec3 {
        self.current.position
    }

    /// Presented scale.
    #[must_use]
    pub const fn scale(&self) -> Vec3 {
        self.current.scale
    }

    /// Position recorded when the last animation pass finished.
    #[must_use]
    pub const fn last_position(&self) -> Vec3 {
        self.last.position
    }

    /// Scale recorded when the last animation pass finished.
    #[must_use]
    pub const fn last_scale(&self) -> Vec3 {
        self.last.scale
    }

    /// Visibility mask assigned by the most recent completed pass.
    #[must_use]
    pub const fn visibility(&self) -> Option<Color> {
        self.visibility
    }

    /// Enemy encounters attached to the stage.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyData] {
        &self.enemies
    }

    pub(crate) fn initialize_slots(&mut self, enemies: Vec<EnemyData>) {
        self.enemies = enemies;
    }

    pub(crate) fn set_visibility(&mut self, mask: Color) {
        self.visibility = Some(mask);
    }
}

impl Animated for CombatStage {
    fn origin(&self) -> Transform {
        self.last
    }

    fn current(&self) -> Transform {
        self.current
    }

    fn set_current(&mut self, transform: Transform) {
        self.current = transform;
    }

    fn commit(&mut self) {
        self.last = self.current;
    }
}
