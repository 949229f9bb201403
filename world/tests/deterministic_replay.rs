use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use combat_queue_content::{Content, Database, EnemyData};
use combat_queue_core::{Command, Event, QueueConfig};
use combat_queue_world::{self as world, query, World};

const FRAME: Duration = Duration::from_millis(16);

#[test]
fn deterministic_replay_produces_identical_sequence() {
    let first = replay(0x5eed_cafe);
    let second = replay(0x5eed_cafe);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.selections.len(), 6, "one selection per completed pass");
    assert_eq!(first.fingerprint(), second.fingerprint());
}

#[test]
fn replay_keeps_queue_full_after_every_clear() {
    let outcome = replay(42);
    assert!(outcome.queue_lengths.iter().all(|length| *length == 3));
    assert_eq!(outcome.live_stages, 3);
}

fn database() -> Database {
    Database::new(vec![
        EnemyData::new("Slime", 1).with_attribute("health", 8),
        EnemyData::new("Goblin", 2).with_attribute("health", 14),
        EnemyData::new("Orc", 4).with_attribute("health", 30),
        EnemyData::new("Wraith", 9).with_attribute("health", 55),
    ])
}

#[derive(Debug, PartialEq)]
struct ReplayOutcome {
    selections: Vec<u32>,
    rosters: Vec<Vec<String>>,
    queue_lengths: Vec<usize>,
    live_stages: usize,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.selections.hash(&mut hasher);
        self.rosters.hash(&mut hasher);
        hasher.finish()
    }
}

fn replay(seed: u64) -> ReplayOutcome {
    let mut world = World::new(database(), QueueConfig::default(), seed).expect("valid config");
    let mut events = Vec::new();
    world::apply(&mut world, Command::SetPlayerLevel { level: 4 }, &mut events)
        .expect("level change succeeds");
    world::apply(&mut world, Command::StartStage, &mut events).expect("start succeeds");

    let mut selections = Vec::new();
    let mut rosters = Vec::new();
    let mut queue_lengths = Vec::new();

    for round in 0..6 {
        let selected = run_until_selected(&mut world);
        selections.push(selected.get());

        let front = query::front_stage(&world).expect("front stage");
        assert_eq!(front.id(), selected);
        rosters.push(
            front
                .enemies()
                .iter()
                .map(|enemy| enemy.name().to_owned())
                .collect(),
        );

        if round < 5 {
            let mut cleared = Vec::new();
            world::apply(
                &mut world,
                Command::ClearStage { stage: selected },
                &mut cleared,
            )
            .expect("clear succeeds");
            queue_lengths.push(query::stages(&world).len());
        }
    }

    ReplayOutcome {
        selections,
        rosters,
        queue_lengths,
        live_stages: query::live_stage_count(&world),
    }
}

fn run_until_selected(world: &mut World) -> combat_queue_core::StageId {
    for _ in 0..1_000 {
        let mut events = Vec::new();
        world::apply(world, Command::Tick { dt: FRAME }, &mut events).expect("tick succeeds");
        for event in events {
            if let Event::StageSelected { stage } = event {
                return stage;
            }
        }
    }
    panic!("animation pass never completed");
}
