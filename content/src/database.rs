//! Read-only content database and the level-filtered enemy pool.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use rand::Rng;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{Content, EnemyData};

/// Ordered collection of content definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Database {
    #[serde(default)]
    enemies: Vec<EnemyData>,
}

impl Database {
    /// Creates a database holding the provided enemies in order.
    #[must_use]
    pub fn new(enemies: Vec<EnemyData>) -> Self {
        Self { enemies }
    }

    /// Parses a database from TOML made of `[[enemies]]` tables.
    pub fn from_toml_str(contents: &str) -> Result<Self, ContentError> {
        let database: Self = toml::from_str(contents)?;
        if let Some(index) = database
            .enemies
            .iter()
            .position(|enemy| enemy.name().trim().is_empty())
        {
            return Err(ContentError::UnnamedEnemy { index });
        }
        debug!(enemies = database.enemies.len(), "content database parsed");
        Ok(database)
    }

    /// Reads and parses the database stored at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Enemy definitions in database order.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyData] {
        &self.enemies
    }

    /// Collects every enemy unlocked at `level`, preserving database order.
    #[must_use]
    pub fn eligible_pool(&self, level: u32) -> EligiblePool {
        let enemies = self
            .enemies
            .iter()
            .filter(|enemy| enemy.is_unlocked_at(level))
            .cloned()
            .collect();
        EligiblePool { level, enemies }
    }
}

/// Enemies unlocked at a given player level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EligiblePool {
    level: u32,
    enemies: Vec<EnemyData>,
}

impl EligiblePool {
    /// Level the pool was filtered with.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }

    /// Eligible definitions in database order.
    #[must_use]
    pub fn enemies(&self) -> &[EnemyData] {
        &self.enemies
    }

    /// Number of eligible definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    /// Reports whether no definition is unlocked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Draws one definition uniformly; `None` when the pool is empty.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&EnemyData> {
        if self.enemies.is_empty() {
            return None;
        }
        self.enemies.get(rng.gen_range(0..self.enemies.len()))
    }
}

/// Failures raised while loading content.
#[derive(Debug, Error)]
pub enum ContentError {
    /// The database file could not be read.
    #[error("failed to read content database at {}", .path.display())]
    Io {
        /// Location that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The database contents are not valid TOML for the expected schema.
    #[error("failed to parse content database")]
    Parse(#[from] toml::de::Error),
    /// An enemy definition is missing its name.
    #[error("enemy definition #{index} has an empty name")]
    UnnamedEnemy {
        /// Position of the definition within the database.
        index: usize,
    },
}
