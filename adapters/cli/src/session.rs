//! Frame loop that drives the world through a scripted run.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use combat_queue_content::{Content, Database};
use combat_queue_core::{Command, Event, QueueConfig, StageId};
use combat_queue_world::{self as world, query, World};

const MAX_FRAMES_PER_PASS: u32 = 10_000;

/// Parameters of a scripted run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Settings {
    pub(crate) level: u32,
    pub(crate) seed: u64,
    pub(crate) frame: Duration,
    pub(crate) clears: u32,
}

/// Stage announced at the end of a pass, with the enemies it holds.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Selection {
    pub(crate) stage: StageId,
    pub(crate) frames: u32,
    pub(crate) enemies: Vec<String>,
}

/// Starts a stage run, then clears the front stage `settings.clears` times.
pub(crate) fn run(
    database: Database,
    config: QueueConfig,
    settings: Settings,
) -> Result<Vec<Selection>> {
    let mut world =
        World::new(database, config, settings.seed).context("invalid queue configuration")?;
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::SetPlayerLevel {
            level: settings.level,
        },
        &mut events,
    )
    .context("failed to set player level")?;
    world::apply(&mut world, Command::StartStage, &mut events)
        .context("failed to start stage")?;

    let mut selections = Vec::new();
    for round in 0..=settings.clears {
        let (stage, frames) = drive_until_selected(&mut world, settings.frame)?;
        let front = query::front_stage(&world).context("queue emptied during a pass")?;
        selections.push(Selection {
            stage,
            frames,
            enemies: front
                .enemies()
                .iter()
                .map(|enemy| enemy.name().to_owned())
                .collect(),
        });

        if round < settings.clears {
            world::apply(&mut world, Command::ClearStage { stage }, &mut events)
                .with_context(|| format!("failed to clear stage {}", stage.get()))?;
        }
    }

    Ok(selections)
}

fn drive_until_selected(world: &mut World, frame: Duration) -> Result<(StageId, u32)> {
    let mut events = Vec::new();
    for frames in 1..=MAX_FRAMES_PER_PASS {
        events.clear();
        world::apply(world, Command::Tick { dt: frame }, &mut events)
            .context("animation pass failed")?;
        let selected = events.iter().find_map(|event| match event {
            Event::StageSelected { stage } => Some(*stage),
            _ => None,
        });
        if let Some(stage) = selected {
            return Ok((stage, frames));
        }
    }
    bail!("animation pass did not complete within {MAX_FRAMES_PER_PASS} frames");
}
