//! Object property store.
//!
//! Object-shaped types are never expanded while they are classified. The
//! classifier interns the underlying checker type here and hands out an
//! opaque key; the properties are classified only when the key is resolved.
//! This is what keeps recursive types (`type Node = { next: Node }`) finite.
//!
//! Keys have the form `<generation>-<index>`. Every reset draws a fresh
//! generation from a process-wide counter, so a key minted before a reset, or
//! by another store, never aliases a live entry.

use crate::type_object::SourceFileLocation;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use tracing::trace;
use typeexpand_checker::TypeId;

static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

fn next_generation() -> u32 {
    NEXT_GENERATION.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StoreKey {
    generation: u32,
    /// Arena slot; never narrowed so every entry keeps a distinct key.
    index: usize,
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.generation, self.index)
    }
}

impl FromStr for StoreKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (generation, index) = s.split_once('-').ok_or(())?;
        Ok(StoreKey {
            generation: generation.parse().map_err(|_| ())?,
            index: index.parse().map_err(|_| ())?,
        })
    }
}

/// One interned object type.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredObject {
    pub ty: TypeId,
    pub locations: Vec<SourceFileLocation>,
}

/// Arena of object types for one session.
#[derive(Debug)]
pub struct ObjectStore {
    generation: u32,
    entries: Vec<StoredObject>,
}

impl Default for ObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore {
    pub fn new() -> Self {
        ObjectStore {
            generation: next_generation(),
            entries: Vec::new(),
        }
    }

    /// Drop every entry and invalidate all keys minted so far.
    pub fn reset(&mut self) {
        self.generation = next_generation();
        self.entries.clear();
    }

    /// Register an object type and return its fresh key.
    pub fn intern(&mut self, ty: TypeId, locations: Vec<SourceFileLocation>) -> StoreKey {
        let key = StoreKey {
            generation: self.generation,
            index: self.entries.len(),
        };
        trace!(key = %key, ty = %ty, "interned object type");
        self.entries.push(StoredObject { ty, locations });
        key
    }

    pub fn get(&self, key: StoreKey) -> Option<&StoredObject> {
        if key.generation != self.generation {
            return None;
        }
        self.entries.get(key.index)
    }

    /// Look up a key in its wire form.
    pub fn lookup(&self, key: &str) -> Option<&StoredObject> {
        self.get(key.parse().ok()?)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
