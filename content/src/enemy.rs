//! Enemy definitions referenced by combat stages.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{Content, DataRecord};

/// Content definition of a single enemy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyData {
    #[serde(flatten)]
    record: DataRecord,
    level_requirement: u32,
    #[serde(default)]
    attributes: BTreeMap<String, i64>,
}

impl EnemyData {
    /// Creates an enemy definition unlocked at `level_requirement`.
    #[must_use]
    pub fn new(name: impl Into<String>, level_requirement: u32) -> Self {
        Self {
            record: DataRecord::new(name),
            level_requirement,
            attributes: BTreeMap::new(),
        }
    }

    /// Adds a named combat attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: i64) -> Self {
        let _ = self.attributes.insert(key.into(), value);
        self
    }

    /// Lowest player level at which the enemy may appear.
    #[must_use]
    pub const fn level_requirement(&self) -> u32 {
        self.level_requirement
    }

    /// Reports whether the enemy is unlocked at `level`.
    #[must_use]
    pub const fn is_unlocked_at(&self, level: u32) -> bool {
        self.level_requirement <= level
    }

    /// Combat attributes keyed by name. Opaque to the stage queue.
    #[must_use]
    pub fn attributes(&self) -> &BTreeMap<String, i64> {
        &self.attributes
    }

    /// Looks up a single attribute.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<i64> {
        self.attributes.get(key).copied()
    }

    /// Creates a fresh, instanced copy of this definition for one encounter.
    #[must_use]
    pub fn spawn_instance<R: Rng + ?Sized>(&self, rng: &mut R) -> Self {
        let mut spawned = Self {
            record: self.record.template(),
            level_requirement: self.level_requirement,
            attributes: self.attributes.clone(),
        };
        let _ = spawned.instance_with(rng);
        spawned
    }
}

impl Content for EnemyData {
    fn record(&self) -> &DataRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut DataRecord {
        &mut self.record
    }
}
