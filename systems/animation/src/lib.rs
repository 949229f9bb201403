#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Tick-driven animation pass that moves queued stages toward their slots.
//!
//! The host loop owns time: it calls [`AnimationPass::advance`] once per
//! frame with the elapsed delta and inspects the returned
//! [`AnimationStatus`] to learn when the pass completed.

use std::time::Duration;

use combat_queue_core::{StageLayout, Transform};
use glam::Vec3;
use tracing::trace;

/// Progress reported after advancing a pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AnimationStatus {
    /// No pass is in flight.
    Idle,
    /// The pass is still interpolating.
    Running {
        /// Normalized elapsed time in `0.0..1.0`.
        progress: f32,
    },
    /// The pass reached its duration; every item sits on its target.
    Completed,
}

/// Items whose transform can be driven by an [`AnimationPass`].
pub trait Animated {
    /// Transform recorded when the previous pass completed.
    fn origin(&self) -> Transform;

    /// Transform currently presented.
    fn current(&self) -> Transform;

    /// Overwrites the presented transform.
    fn set_current(&mut self, transform: Transform);

    /// Records the presented transform as the origin of the next pass.
    fn commit(&mut self);
}

/// Target transform for queue index `index` in a queue of `len` stages.
#[must_use]
pub fn slot_target(layout: &StageLayout, index: usize, len: usize) -> Transform {
    let position = Vec3::new(0.0, layout.front_y + index as f32 * layout.spacing, 0.0);
    let scale = slot_scale(index, len);
    Transform::new(position, Vec3::new(scale, scale, 1.0))
}

/// Uniform scale of queue index `index`: the front stage is full size and the
/// back stage shrinks to zero. A lone stage keeps full size.
#[must_use]
pub fn slot_scale(index: usize, len: usize) -> f32 {
    if len <= 1 {
        return 1.0;
    }
    1.0 - index as f32 / (len - 1) as f32
}

/// Bounded-duration interpolation from every item's origin to its slot.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationPass {
    duration: Duration,
    elapsed: Duration,
}

impl AnimationPass {
    /// Starts a pass lasting `duration`.
    #[must_use]
    pub const fn new(duration: Duration) -> Self {
        Self {
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Total length of the pass.
    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    /// Time accumulated so far.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Normalized elapsed time clamped to `0.0..=1.0`.
    #[must_use]
    pub fn progress(&self) -> f32 {
        if self.is_finished() {
            return 1.0;
        }
        self.elapsed.as_secs_f32() / self.duration.as_secs_f32()
    }

    /// Reports whether the timer reached the duration.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Adds `dt` to the timer and interpolates every item.
    pub fn advance<T: Animated>(
        &mut self,
        dt: Duration,
        layout: &StageLayout,
        items: &mut [T],
    ) -> AnimationStatus {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.apply(layout, items);

        if self.is_finished() {
            AnimationStatus::Completed
        } else {
            let progress = self.progress();
            trace!(progress, "animation pass advanced");
            AnimationStatus::Running { progress }
        }
    }

    /// Presents every item at the transform matching the current timer.
    pub fn apply<T: Animated>(&self, layout: &StageLayout, items: &mut [T]) {
        let progress = self.progress();
        let len = items.len();
        for (index, item) in items.iter_mut().enumerate() {
            let target = slot_target(layout, index, len);
            item.set_current(item.origin().lerp(target, progress));
        }
    }
}
