#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative combat stage state.
//!
//! The world owns the content database, the player level and the stage queue
//! controller. Adapters feed it [`Command`] values through [`apply`], which
//! dispatches each signal to the controller and collects the resulting
//! [`Event`] values. Read access goes through the [`query`] module.

use combat_queue_content::Database;
use combat_queue_core::{Command, ConfigError, Event, PlayerLevel, QueueConfig, QueueError};
use combat_queue_system_stage_queue::{PanelFactory, StageObserver, StageQueue};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::trace;

const DEFAULT_PLAYER_LEVEL: u32 = 1;

/// Represents the authoritative combat stage state.
#[derive(Debug)]
pub struct World {
    database: Database,
    player_level: PlayerLevel,
    queue: StageQueue<PanelFactory, ChaCha8Rng>,
}

impl World {
    /// Creates a world over `database`, seeding stage generation with `rng_seed`.
    pub fn new(
        database: Database,
        config: QueueConfig,
        rng_seed: u64,
    ) -> Result<Self, ConfigError> {
        let queue = StageQueue::new(
            config,
            PanelFactory::new(),
            ChaCha8Rng::seed_from_u64(rng_seed),
        )?;
        Ok(Self {
            database,
            player_level: PlayerLevel::new(DEFAULT_PLAYER_LEVEL),
            queue,
        })
    }

    /// Registers an observer notified whenever a stage is selected.
    pub fn subscribe(&mut self, observer: impl StageObserver + 'static) {
        self.queue.subscribe(observer);
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(
    world: &mut World,
    command: Command,
    out_events: &mut Vec<Event>,
) -> Result<(), QueueError> {
    trace!(?command, "applying command");
    match command {
        Command::StartStage => {
            world
                .queue
                .on_stage_started(&world.database, &world.player_level, out_events)
        }
        Command::ClearStage { stage } => world.queue.on_stage_cleared(stage, out_events),
        Command::Tick { dt } => {
            out_events.push(Event::TimeAdvanced { dt });
            let _ = world.queue.advance(dt, out_events)?;
            Ok(())
        }
        Command::SetPlayerLevel { level } => {
            world.player_level = PlayerLevel::new(level);
            out_events.push(Event::PlayerLevelChanged { level });
            Ok(())
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use combat_queue_content::{Database, EligiblePool};
    use combat_queue_system_stage_queue::CombatStage;

    use super::World;

    /// Stages in front-to-back order.
    #[must_use]
    pub fn stages(world: &World) -> &[CombatStage] {
        world.queue.stages()
    }

    /// Stage occupying the front slot, if any.
    #[must_use]
    pub fn front_stage(world: &World) -> Option<&CombatStage> {
        world.queue.front()
    }

    /// Pool built by the most recent stage start.
    #[must_use]
    pub fn eligible_pool(world: &World) -> Option<&EligiblePool> {
        world.queue.eligible_pool()
    }

    /// Level reported by the player level provider.
    #[must_use]
    pub fn player_level(world: &World) -> u32 {
        world.player_level.get()
    }

    /// Reports whether an animation pass is in flight.
    #[must_use]
    pub fn is_animating(world: &World) -> bool {
        world.queue.is_animating()
    }

    /// Content database backing the world.
    #[must_use]
    pub fn database(world: &World) -> &Database {
        &world.database
    }

    /// Number of stages the factory currently keeps alive.
    #[must_use]
    pub fn live_stage_count(world: &World) -> usize {
        world.queue.factory().live_count()
    }
}
