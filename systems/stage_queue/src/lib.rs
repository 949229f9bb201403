#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stage queue controller that spawns combat stages and animates them forward.
//!
//! The controller keeps an ordered front-to-back queue of [`CombatStage`]
//! values. Inbound signals arrive through [`StageQueue::on_stage_started`] and
//! [`StageQueue::on_stage_cleared`]; the host loop drives motion through
//! [`StageQueue::advance`]. When a pass completes the front stage is announced
//! both as an [`Event::StageSelected`] and to every subscribed
//! [`StageObserver`].

mod factory;
mod stage;

use std::{fmt, time::Duration};

use combat_queue_content::{Database, EligiblePool};
use combat_queue_core::{ConfigError, Event, LevelProvider, QueueConfig, QueueError, StageId};
use combat_queue_system_animation::{Animated, AnimationPass, AnimationStatus};
use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

pub use factory::{PanelFactory, StageFactory};
pub use stage::CombatStage;

/// Receives the front stage whenever an animation pass completes.
pub trait StageObserver {
    /// Called once per completed pass with the stage in the front slot.
    fn stage_selected(&mut self, stage: &CombatStage);
}

impl<F> StageObserver for F
where
    F: FnMut(&CombatStage),
{
    fn stage_selected(&mut self, stage: &CombatStage) {
        self(stage);
    }
}

/// Controller owning the active combat stages.
pub struct StageQueue<F, R> {
    config: QueueConfig,
    factory: F,
    rng: R,
    stages: Vec<CombatStage>,
    pool: Option<EligiblePool>,
    animation: Option<AnimationPass>,
    observers: Vec<Box<dyn StageObserver>>,
}

impl<F, R> StageQueue<F, R>
where
    F: StageFactory,
    R: Rng,
{
    /// Creates an empty controller after validating `config`.
    pub fn new(config: QueueConfig, factory: F, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            factory,
            rng,
            stages: Vec::new(),
            pool: None,
            animation: None,
            observers: Vec::new(),
        })
    }

    /// Registers an observer notified on every completed pass.
    pub fn subscribe(&mut self, observer: impl StageObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Rebuilds the eligible pool and fills the queue for a new run.
    ///
    /// Stages left over from a previous run are released first. A run that
    /// cannot be presented fails before any stage is released or spawned.
    pub fn on_stage_started(
        &mut self,
        database: &Database,
        player: &impl LevelProvider,
        out: &mut Vec<Event>,
    ) -> Result<(), QueueError> {
        let level = player.current_level();
        let pool = database.eligible_pool(level);
        if pool.is_empty() {
            return Err(QueueError::NoEligibleContent { level });
        }
        self.ensure_visibility_masks(self.config.min_stage_size)?;

        out.push(Event::EligiblePoolRebuilt {
            level,
            eligible: pool.len(),
        });
        debug!(level, eligible = pool.len(), "eligible pool rebuilt");
        self.pool = Some(pool);

        self.animation = None;
        for stage in self.stages.drain(..) {
            self.factory.release(stage.id());
            out.push(Event::StageReleased { stage: stage.id() });
        }

        let layout = self.config.layout;
        while self.stages.len() < self.config.min_stage_size {
            let y = layout.start_y + self.stages.len() as f32 * layout.spacing;
            self.spawn(Vec3::new(0.0, y, 0.0), out)?;
        }

        self.begin_animation(out);
        Ok(())
    }

    /// Replaces a cleared stage with a new one behind the back of the queue.
    pub fn on_stage_cleared(
        &mut self,
        stage: StageId,
        out: &mut Vec<Event>,
    ) -> Result<(), QueueError> {
        if self.pool.is_none() {
            return Err(QueueError::NotInitialized);
        }

        let index = self
            .stages
            .iter()
            .position(|candidate| candidate.id() == stage)
            .ok_or(QueueError::UnknownStage { stage })?;
        let removed = self.stages.remove(index);
        self.factory.release(removed.id());
        out.push(Event::StageReleased { stage });
        debug!(stage = stage.get(), "stage cleared");

        let Some(back) = self.stages.last() else {
            self.animation = None;
            return Err(QueueError::QueueUnderflow);
        };
        let y = back.position().y + self.config.layout.spacing;
        self.spawn(Vec3::new(0.0, y, 0.0), out)?;

        self.begin_animation(out);
        Ok(())
    }

    /// Advances the in-flight animation pass by `dt`.
    ///
    /// On completion the presented transforms become the origin of the next
    /// pass, stage `i` receives visibility mask `i`, and the front stage is
    /// announced.
    pub fn advance(
        &mut self,
        dt: Duration,
        out: &mut Vec<Event>,
    ) -> Result<AnimationStatus, QueueError> {
        let Some(pass) = self.animation.as_mut() else {
            return Ok(AnimationStatus::Idle);
        };

        let status = pass.advance(dt, &self.config.layout, &mut self.stages);
        if status != AnimationStatus::Completed {
            return Ok(status);
        }
        self.animation = None;

        self.ensure_visibility_masks(self.stages.len())?;
        for (stage, mask) in self.stages.iter_mut().zip(&self.config.visibility_masks) {
            stage.commit();
            stage.set_visibility(*mask);
        }

        if let Some(front) = self.stages.first() {
            out.push(Event::StageSelected { stage: front.id() });
            info!(
                stage = front.id().get(),
                enemies = front.enemies().len(),
                "stage selected"
            );
            for observer in &mut self.observers {
                observer.stage_selected(front);
            }
        }

        Ok(AnimationStatus::Completed)
    }

    /// Stages in front-to-back order.
    #[must_use]
    pub fn stages(&self) -> &[CombatStage] {
        &self.stages
    }

    /// Stage occupying the front slot.
    #[must_use]
    pub fn front(&self) -> Option<&CombatStage> {
        self.stages.first()
    }

    /// Pool built by the most recent stage-started signal.
    #[must_use]
    pub fn eligible_pool(&self) -> Option<&EligiblePool> {
        self.pool.as_ref()
    }

    /// Reports whether an animation pass is in flight.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Tuning the controller was built with.
    #[must_use]
    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Factory backing stage creation.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    fn spawn(&mut self, position: Vec3, out: &mut Vec<Event>) -> Result<(), QueueError> {
        let pool = self.pool.as_ref().ok_or(QueueError::NotInitialized)?;
        let count = self
            .rng
            .gen_range(self.config.enemy_count.min..=self.config.enemy_count.max);

        let mut enemies = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let template = pool
                .pick(&mut self.rng)
                .ok_or(QueueError::NoEligibleContent { level: pool.level() })?;
            enemies.push(template.spawn_instance(&mut self.rng));
        }

        let mut stage = self.factory.instantiate(self.config.panel, position);
        stage.initialize_slots(enemies);
        out.push(Event::StageSpawned {
            stage: stage.id(),
            position,
            enemies: stage.enemies().len(),
        });
        debug!(
            stage = stage.id().get(),
            y = position.y,
            enemies = stage.enemies().len(),
            "stage spawned"
        );
        self.stages.push(stage);
        Ok(())
    }

    fn begin_animation(&mut self, out: &mut Vec<Event>) {
        if self.animation.take().is_some() {
            for stage in &mut self.stages {
                stage.commit();
            }
            out.push(Event::AnimationSuperseded);
            debug!("in-flight animation pass superseded");
        }

        self.animation = Some(AnimationPass::new(self.config.moving_time));
        out.push(Event::AnimationStarted {
            stages: self.stages.len(),
        });
    }

    fn ensure_visibility_masks(&self, len: usize) -> Result<(), QueueError> {
        let available = self.config.visibility_masks.len();
        if available < len {
            return Err(QueueError::VisibilityLookupExhausted {
                index: available,
                available,
            });
        }
        Ok(())
    }
}

impl<F, R> fmt::Debug for StageQueue<F, R>
where
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageQueue")
            .field("config", &self.config)
            .field("factory", &self.factory)
            .field("stages", &self.stages)
            .field("pool", &self.pool)
            .field("animation", &self.animation)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
