//! Lazily assigned identity shared by every content definition.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

const VERSION_MASK: u128 = 0xf << 76;
const VERSION_RANDOM: u128 = 0x4 << 76;
const VARIANT_MASK: u128 = 0x3 << 62;
const VARIANT_RFC4122: u128 = 0x2 << 62;

/// Globally unique identifier handed to a content instance.
///
/// Rendered as a hyphenated version 4 identifier, e.g.
/// `1b4e28ba-2fa1-41d2-883f-0016d3cca427`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContentId(u128);

impl ContentId {
    /// Generates a fresh identifier from the thread-local generator.
    #[must_use]
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng())
    }

    /// Generates a fresh identifier from the provided generator.
    #[must_use]
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let bits: u128 = rng.gen();
        Self((bits & !VERSION_MASK & !VARIANT_MASK) | VERSION_RANDOM | VARIANT_RFC4122)
    }

    /// Retrieves the raw 128-bit value.
    #[must_use]
    pub const fn as_u128(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (value >> 96) as u32,
            (value >> 80) as u16,
            (value >> 64) as u16,
            (value >> 48) as u16,
            value & 0xffff_ffff_ffff,
        )
    }
}

/// Base record carried by every content definition.
///
/// The identifier stays unset until the record is first instanced and is
/// never reassigned afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    #[serde(skip)]
    id: Option<ContentId>,
    name: String,
}

impl DataRecord {
    /// Creates a record with the provided display name and no identity.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// Identifier assigned on first use, if any.
    #[must_use]
    pub const fn id(&self) -> Option<ContentId> {
        self.id
    }

    /// Display name of the definition.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the identifier, generating it from `rng` when still unset.
    pub fn assign_id_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> ContentId {
        *self.id.get_or_insert_with(|| ContentId::generate_with(rng))
    }

    /// Copy of the definition that has not been instanced yet.
    #[must_use]
    pub(crate) fn template(&self) -> Self {
        Self::new(self.name.clone())
    }
}

/// Content definitions that expose a [`DataRecord`].
///
/// [`Content::instance`] hands back the definition itself so derived types
/// can chain their own per-instance customisation after the identity is set.
pub trait Content {
    /// Base record of the definition.
    fn record(&self) -> &DataRecord;

    /// Mutable access to the base record.
    fn record_mut(&mut self) -> &mut DataRecord;

    /// Identifier assigned on first use, if any.
    fn id(&self) -> Option<ContentId> {
        self.record().id()
    }

    /// Display name of the definition.
    fn name(&self) -> &str {
        self.record().name()
    }

    /// Assigns an identifier if none is set and returns the definition.
    fn instance(&mut self) -> &mut Self
    where
        Self: Sized,
    {
        self.instance_with(&mut rand::thread_rng())
    }

    /// Same as [`Content::instance`], drawing the identifier from `rng`.
    fn instance_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self
    where
        Self: Sized,
    {
        let _ = self.record_mut().assign_id_with(rng);
        self
    }
}

impl Content for DataRecord {
    fn record(&self) -> &DataRecord {
        self
    }

    fn record_mut(&mut self) -> &mut DataRecord {
        self
    }
}
