use std::collections::hash_map::Entry;
use std::collections::HashMap;

use crate::field::Field;
use crate::math::{point_key, R3};

/// Memoized field values keyed by the exact bits of each point.
///
/// Entries are never invalidated: a cache belongs to one sampling run over one fixed field.
#[derive(Debug, Clone, Default)]
pub struct SampleCache {
    entries: HashMap<[u64; 3], R3>,
}

impl SampleCache {
    /// Empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cache with room for `capacity` points.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: HashMap::with_capacity(capacity) }
    }

    /// Cached value at `point`, evaluating `field` and storing the result on first request.
    pub fn sample(&mut self, field: &Field, point: &R3) -> R3 {
        match self.entries.entry(point_key(point)) {
            Entry::Occupied(hit) => {
                tracing::trace!(x = point.x, y = point.y, z = point.z, "cache hit");
                *hit.get()
            }
            Entry::Vacant(slot) => *slot.insert(field.evaluate(point)),
        }
    }

    /// Cached value at `point`, if any.
    #[must_use]
    pub fn get(&self, point: &R3) -> Option<R3> {
        self.entries.get(&point_key(point)).copied()
    }

    /// Number of distinct cached points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Cached field vectors in arbitrary order.
    pub fn values(&self) -> impl Iterator<Item = &R3> + '_ {
        self.entries.values()
    }
}
