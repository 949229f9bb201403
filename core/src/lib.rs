#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the combat stage queue.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and the queue systems. Adapters submit [`Command`]
//! values describing inbound signals, the world routes those commands to the
//! stage queue controller via its `apply` entry point, and then broadcasts
//! [`Event`] values describing what changed. Every fallible path reports a
//! [`QueueError`] instead of indexing into an empty queue or dividing by zero.

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest animation duration accepted by [`QueueConfig::validate`].
pub const MIN_MOVING_TIME: Duration = Duration::from_millis(100);
/// Longest animation duration accepted by [`QueueConfig::validate`].
pub const MAX_MOVING_TIME: Duration = Duration::from_secs(1);

/// Commands that express every inbound signal the world accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// A new combat stage run begins; rebuilds the eligible pool and fills the queue.
    StartStage,
    /// The provided stage was cleared by the player and must be replaced.
    ClearStage {
        /// Identifier of the stage that was cleared.
        stage: StageId,
    },
    /// Advances the host clock by the provided delta time.
    Tick {
        /// Duration of time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Updates the level reported by the player level provider.
    SetPlayerLevel {
        /// Level the player reached.
        level: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Indicates that the host clock advanced.
    TimeAdvanced {
        /// Duration of time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the player level changed.
    PlayerLevelChanged {
        /// Level that became active.
        level: u32,
    },
    /// Reports that the eligible enemy pool was rebuilt for a new run.
    EligiblePoolRebuilt {
        /// Player level used to filter the content database.
        level: u32,
        /// Number of enemy definitions that passed the level filter.
        eligible: usize,
    },
    /// Confirms that a stage was created and appended to the back of the queue.
    StageSpawned {
        /// Identifier assigned to the stage by the factory.
        stage: StageId,
        /// Position the stage was spawned at.
        position: Vec3,
        /// Number of enemy encounters attached to the stage.
        enemies: usize,
    },
    /// Confirms that a stage was removed from the queue and released.
    StageReleased {
        /// Identifier of the released stage.
        stage: StageId,
    },
    /// Announces that an animation pass started moving the queue.
    AnimationStarted {
        /// Number of stages animated by the pass.
        stages: usize,
    },
    /// Reports that an in-flight animation pass was cancelled by a newer one.
    AnimationSuperseded,
    /// The front stage finished moving and is ready for interaction.
    StageSelected {
        /// Identifier of the stage occupying the front slot.
        stage: StageId,
    },
}

/// Unique identifier assigned to a combat stage by its factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StageId(u32);

impl StageId {
    /// Creates a new stage identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of the container that parents spawned stages.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(u32);

impl PanelId {
    /// Creates a new panel identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Position and scale of a stage expressed in panel units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Location of the stage relative to its panel.
    pub position: Vec3,
    /// Per-axis scale applied to the stage.
    pub scale: Vec3,
}

impl Transform {
    /// Creates a transform from explicit position and scale.
    #[must_use]
    pub const fn new(position: Vec3, scale: Vec3) -> Self {
        Self { position, scale }
    }

    /// Transform located at `position` with unit scale.
    #[must_use]
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            scale: Vec3::ONE,
        }
    }

    /// Linearly interpolates towards `target`.
    ///
    /// `t` is clamped to `0.0..=1.0`, so `t == 0.0` yields `self` and any
    /// `t >= 1.0` yields `target` exactly.
    #[must_use]
    pub fn lerp(self, target: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t >= 1.0 {
            return target;
        }
        Self {
            position: self.position.lerp(target.position, t),
            scale: self.scale.lerp(target.scale, t),
        }
    }
}

/// RGBA colour used as a stage visibility mask.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new colour from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// White with the provided opacity.
    #[must_use]
    pub const fn white(alpha: f32) -> Self {
        Self::new(1.0, 1.0, 1.0, alpha)
    }
}

/// Vertical slot layout shared by stage creation and the animation pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StageLayout {
    /// Vertical offset of the front slot.
    pub front_y: f32,
    /// Vertical offset of the first stage created by a fresh run.
    pub start_y: f32,
    /// Vertical distance between consecutive slots.
    pub spacing: f32,
}

impl Default for StageLayout {
    fn default() -> Self {
        Self {
            front_y: -100.0,
            start_y: 300.0,
            spacing: 200.0,
        }
    }
}

/// Inclusive bounds on the number of enemies attached to a new stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnemyCountRange {
    /// Fewest enemies a stage may hold.
    pub min: u32,
    /// Most enemies a stage may hold.
    pub max: u32,
}

impl Default for EnemyCountRange {
    fn default() -> Self {
        Self { min: 1, max: 3 }
    }
}

/// Tuning surface for the stage queue controller.
#[derive(Clone, Debug, PartialEq)]
pub struct QueueConfig {
    /// Slot layout used when spawning and animating stages.
    pub layout: StageLayout,
    /// Number of stages the queue is refilled to.
    pub min_stage_size: usize,
    /// Duration of a single animation pass.
    pub moving_time: Duration,
    /// Bounds on enemies drawn per stage.
    pub enemy_count: EnemyCountRange,
    /// Visibility mask assigned to each queue index after a pass completes.
    pub visibility_masks: Vec<Color>,
    /// Container that parents spawned stages.
    pub panel: PanelId,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            layout: StageLayout::default(),
            min_stage_size: 3,
            moving_time: Duration::from_secs(1),
            enemy_count: EnemyCountRange::default(),
            visibility_masks: vec![Color::white(1.0), Color::white(0.6), Color::white(0.25)],
            panel: PanelId::default(),
        }
    }
}

impl QueueConfig {
    /// Checks that every tuning value lies in its supported range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_stage_size == 0 {
            return Err(ConfigError::EmptyQueue);
        }
        if self.moving_time < MIN_MOVING_TIME || self.moving_time > MAX_MOVING_TIME {
            return Err(ConfigError::MovingTimeOutOfRange {
                moving_time: self.moving_time,
            });
        }
        if self.enemy_count.min == 0 || self.enemy_count.min > self.enemy_count.max {
            return Err(ConfigError::InvalidEnemyCount {
                min: self.enemy_count.min,
                max: self.enemy_count.max,
            });
        }
        if !(self.layout.spacing.is_finite() && self.layout.spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing {
                spacing: self.layout.spacing,
            });
        }
        Ok(())
    }
}

/// Read-only source of the player's current level.
pub trait LevelProvider {
    /// Level currently reached by the player.
    fn current_level(&self) -> u32;
}

/// Plain level value usable wherever a [`LevelProvider`] is expected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct PlayerLevel(u32);

impl PlayerLevel {
    /// Wraps the provided level.
    #[must_use]
    pub const fn new(level: u32) -> Self {
        Self(level)
    }

    /// Retrieves the wrapped level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl LevelProvider for PlayerLevel {
    fn current_level(&self) -> u32 {
        self.0
    }
}

/// Failures surfaced by the stage queue controller.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue emptied before a replacement stage could be positioned behind it.
    #[error("stage queue underflow: no stage left to position a replacement behind")]
    QueueUnderflow,
    /// The cleared stage is not part of the queue.
    #[error("stage {} is not in the queue", .stage.get())]
    UnknownStage {
        /// Identifier supplied with the clear signal.
        stage: StageId,
    },
    /// No enemy definition is unlocked at the current level.
    #[error("no eligible content for player level {level}")]
    NoEligibleContent {
        /// Level used to filter the content database.
        level: u32,
    },
    /// The visibility lookup has no entry for a queue index.
    #[error("no visibility mask for queue index {index} ({available} masks configured)")]
    VisibilityLookupExhausted {
        /// First queue index without a mask.
        index: usize,
        /// Number of masks available.
        available: usize,
    },
    /// A stage signal arrived before the first stage-started signal.
    #[error("stage queue has not been initialized")]
    NotInitialized,
}

/// Reasons a [`QueueConfig`] may be rejected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The queue must hold at least one stage.
    #[error("minimum stage size must be positive")]
    EmptyQueue,
    /// The animation duration lies outside the supported range.
    #[error("moving time {moving_time:?} outside the supported 100ms..=1s range")]
    MovingTimeOutOfRange {
        /// Rejected duration.
        moving_time: Duration,
    },
    /// Enemy count bounds are empty or inverted.
    #[error("enemy count range {min}..={max} is invalid")]
    InvalidEnemyCount {
        /// Configured lower bound.
        min: u32,
        /// Configured upper bound.
        max: u32,
    },
    /// Slot spacing must be a positive finite distance.
    #[error("stage spacing must be positive (received {spacing})")]
    InvalidSpacing {
        /// Rejected spacing.
        spacing: f32,
    },
}
