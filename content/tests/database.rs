use combat_queue_content::{Content, Database, EnemyData};

const DATABASE: &str = r#"
[[enemies]]
name = "Slime"
level_requirement = 1

[enemies.attributes]
health = 8
attack = 1

[[enemies]]
name = "Goblin"
level_requirement = 3

[[enemies]]
name = "Orc"
level_requirement = 5

[[enemies]]
name = "Wraith"
level_requirement = 7
"#;

#[test]
fn parses_enemies_in_database_order() {
    let database = Database::from_toml_str(DATABASE).expect("valid database");
    let names: Vec<&str> = database.enemies().iter().map(|enemy| enemy.name()).collect();

    assert_eq!(names, vec!["Slime", "Goblin", "Orc", "Wraith"]);
    assert_eq!(database.enemies()[0].attribute("health"), Some(8));
    assert!(database.enemies()[1].attributes().is_empty());
    assert!(database.enemies().iter().all(|enemy| enemy.id().is_none()));
}

#[test]
fn eligible_pool_keeps_requirements_at_or_below_level() {
    let database = Database::from_toml_str(DATABASE).expect("valid database");
    let pool = database.eligible_pool(5);

    let requirements: Vec<u32> = pool
        .enemies()
        .iter()
        .map(EnemyData::level_requirement)
        .collect();
    assert_eq!(requirements, vec![1, 3, 5]);
    assert_eq!(pool.level(), 5);
}

#[test]
fn eligible_pool_is_empty_below_every_requirement() {
    let database = Database::new(vec![EnemyData::new("Orc", 5)]);
    assert!(database.eligible_pool(4).is_empty());
}

#[test]
fn rejects_malformed_toml() {
    let result = Database::from_toml_str("[[enemies]]\nname = \"Slime\"\n");
    assert!(result.is_err(), "missing level requirement must be rejected");
}

#[test]
fn bundled_database_parses() {
    let database =
        Database::from_toml_str(include_str!("../../assets/enemies.toml")).expect("bundled");
    assert_eq!(database.enemies().len(), 5);
    assert_eq!(database.eligible_pool(1).len(), 2);
}
