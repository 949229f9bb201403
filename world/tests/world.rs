use std::{cell::RefCell, rc::Rc, time::Duration};

use combat_queue_content::{Content, Database, EnemyData};
use combat_queue_core::{Command, Event, QueueConfig, QueueError, StageId};
use combat_queue_system_stage_queue::CombatStage;
use combat_queue_world::{self as world, query, World};
use glam::Vec3;

fn database() -> Database {
    Database::new(vec![
        EnemyData::new("Slime", 1),
        EnemyData::new("Goblin", 3),
        EnemyData::new("Orc", 5),
        EnemyData::new("Wraith", 7),
    ])
}

fn world_at_level(level: u32) -> World {
    let mut world = World::new(database(), QueueConfig::default(), 7).expect("valid config");
    let mut events = Vec::new();
    world::apply(&mut world, Command::SetPlayerLevel { level }, &mut events)
        .expect("level change succeeds");
    world
}

#[test]
fn stage_started_filters_pool_and_spawns_back_rows() {
    let mut world = world_at_level(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartStage, &mut events).expect("start succeeds");

    let requirements: Vec<u32> = query::eligible_pool(&world)
        .expect("pool built")
        .enemies()
        .iter()
        .map(EnemyData::level_requirement)
        .collect();
    assert_eq!(requirements, vec![1, 3, 5]);

    let spawned: Vec<Vec3> = events
        .iter()
        .filter_map(|event| match event {
            Event::StageSpawned { position, .. } => Some(*position),
            _ => None,
        })
        .collect();
    assert_eq!(
        spawned,
        vec![
            Vec3::new(0.0, 300.0, 0.0),
            Vec3::new(0.0, 500.0, 0.0),
            Vec3::new(0.0, 700.0, 0.0),
        ]
    );
    assert!(query::is_animating(&world));
    assert!(query::stages(&world)
        .iter()
        .flat_map(|stage| stage.enemies())
        .all(|enemy| enemy.name() != "Wraith"));
}

#[test]
fn tick_drives_animation_and_notifies_observers() {
    let mut world = world_at_level(5);
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);
    world.subscribe(move |stage: &CombatStage| sink.borrow_mut().push(stage.id()));

    let mut events = Vec::new();
    world::apply(&mut world, Command::StartStage, &mut events).expect("start succeeds");

    events.clear();
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(400),
        },
        &mut events,
    )
    .expect("tick succeeds");
    assert_eq!(
        events,
        vec![Event::TimeAdvanced {
            dt: Duration::from_millis(400)
        }]
    );
    assert!(selected.borrow().is_empty());

    events.clear();
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_millis(600),
        },
        &mut events,
    )
    .expect("tick succeeds");

    let front = query::front_stage(&world).expect("front stage").id();
    assert!(events.contains(&Event::StageSelected { stage: front }));
    assert_eq!(*selected.borrow(), vec![front]);
    assert!(!query::is_animating(&world));
}

#[test]
fn clear_signal_replaces_stage_behind_queue() {
    let mut world = world_at_level(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartStage, &mut events).expect("start succeeds");
    world::apply(
        &mut world,
        Command::Tick {
            dt: Duration::from_secs(1),
        },
        &mut events,
    )
    .expect("tick succeeds");

    let front = query::front_stage(&world).expect("front stage").id();
    events.clear();
    world::apply(&mut world, Command::ClearStage { stage: front }, &mut events)
        .expect("clear succeeds");

    assert_eq!(query::stages(&world).len(), 3);
    assert_eq!(query::live_stage_count(&world), 3);
    let back = query::stages(&world).last().expect("back stage");
    assert_eq!(back.position(), Vec3::new(0.0, 500.0, 0.0));
    assert!(matches!(
        events.as_slice(),
        [
            Event::StageReleased { .. },
            Event::StageSpawned { .. },
            Event::AnimationStarted { stages: 3 },
        ]
    ));
}

#[test]
fn clear_signal_for_unknown_stage_surfaces_error() {
    let mut world = world_at_level(5);
    let mut events = Vec::new();
    world::apply(&mut world, Command::StartStage, &mut events).expect("start succeeds");

    let result = world::apply(
        &mut world,
        Command::ClearStage {
            stage: StageId::new(77),
        },
        &mut events,
    );
    assert_eq!(
        result,
        Err(QueueError::UnknownStage {
            stage: StageId::new(77)
        })
    );
}
