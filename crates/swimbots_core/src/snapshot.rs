//! Immutable generation snapshots.

use serde::{Deserialize, Serialize};
use swimbots_data::Pond;

/// Deep copy of a generation.
///
/// Every swimbot, segment tree, family record and pellet is owned by the
/// copy, so stepping it never shows through in the source.
#[must_use]
pub fn clone_pond(pond: &Pond) -> Pond {
    pond.clone()
}

/// Append-only record of every generation of a run, starting at generation 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    snapshots: Vec<Pond>,
}

impl History {
    #[must_use]
    pub fn new(initial: Pond) -> Self {
        Self {
            snapshots: vec![initial],
        }
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            snapshots: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, pond: Pond) {
        self.snapshots.push(pond);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Snapshot of generation `generation`.
    #[must_use]
    pub fn get(&self, generation: usize) -> Option<&Pond> {
        self.snapshots.get(generation)
    }

    #[must_use]
    pub fn first(&self) -> Option<&Pond> {
        self.snapshots.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Pond> {
        self.snapshots.last()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pond> {
        self.snapshots.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Pond> {
        self.snapshots
    }
}

impl From<Vec<Pond>> for History {
    fn from(snapshots: Vec<Pond>) -> Self {
        Self { snapshots }
    }
}
