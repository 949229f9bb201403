#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Content definitions consumed by the combat stage queue.
//!
//! Every definition carries a [`DataRecord`] whose identity is assigned
//! lazily through [`Content::instance`]. The [`Database`] is an ordered,
//! read-only collection loaded from TOML; [`Database::eligible_pool`] filters
//! it by player level.

mod database;
mod enemy;
mod identity;

pub use database::{ContentError, Database, EligiblePool};
pub use enemy::EnemyData;
pub use identity::{Content, ContentId, DataRecord};
