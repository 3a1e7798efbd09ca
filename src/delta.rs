//! The delta table: a mapping from location to (delta object, optional
//! name) (spec.md §3 "Mutator", §4.3, §4.4).

use crate::algebra::Algebra;
use crate::location::Location;

/// A single stored sample, expressed as `master - neutral` (spec.md
/// GLOSSARY: "Delta").
#[derive(Debug, Clone)]
pub struct DeltaEntry<O> {
    pub location: Location,
    pub object: O,
    pub name: Option<String>,
}

/// An insertion-ordered table of deltas, looked up by location equality
/// (spec.md §3's non-zero-coordinate-set equality, not map-key identity).
///
/// Per spec.md §9's re-architecture note, this is deliberately just a plain
/// `Vec`: identity (the `Location`) is kept alongside the payload rather
/// than used as a container key, so later redesigns (e.g. indexing by a
/// hashed canonical key) don't have to change this type's public shape.
#[derive(Debug, Clone, Default)]
pub struct DeltaTable<O> {
    entries: Vec<DeltaEntry<O>>,
}

impl<O: Algebra> DeltaTable<O> {
    pub fn new() -> Self {
        DeltaTable { entries: Vec::new() }
    }

    /// Insert or overwrite the entry at `location`.
    pub fn insert(&mut self, location: Location, object: O, name: Option<String>) {
        if let Some(existing) = self.entries.iter_mut().find(|e| e.location == location) {
            existing.object = object;
            existing.name = name;
        } else {
            self.entries.push(DeltaEntry { location, object, name });
        }
    }

    pub fn get(&self, location: &Location) -> Option<&DeltaEntry<O>> {
        self.entries.iter().find(|e| &e.location == location)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeltaEntry<O>> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All stored locations (spec.md §6 `collectLocations`).
    pub fn locations(&self) -> Vec<Location> {
        self.entries.iter().map(|e| e.location.clone()).collect()
    }
}
