//! Bounded memoization of per-object geometry.

use std::collections::HashMap;

use slotmap::SlotMap;

use crate::model::{LinearObject, Variant};

slotmap::new_key_type! {
    /// Slot of a cached entry.
    struct EntryId;
}

/// Everything that shapes an object's geometry: variant, dimensions and the
/// exact bits of every point.
///
/// Keys compare by content, so two objects share an entry only when their
/// geometry inputs are bit-identical. The object id is not part of the key.
/// Styles and settings are not part of it either; clear the cache when they
/// change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GeometryKey {
    variant: Variant,
    bits: Box<[u64]>,
}

impl GeometryKey {
    #[must_use]
    pub fn of(object: &LinearObject) -> Self {
        let mut bits = Vec::with_capacity(3 + object.points.len() * 5);
        let dims = [object.width, object.elevation, object.thickness];
        bits.extend(dims.map(f64::to_bits));
        for p in &object.points {
            bits.extend([p.x.to_bits(), p.z.to_bits()]);
            match p.control_point {
                Some(c) => bits.extend([1, c.x.to_bits(), c.z.to_bits()]),
                None => bits.push(0),
            }
        }
        Self {
            variant: object.variant,
            bits: bits.into_boxed_slice(),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    key: GeometryKey,
    value: V,
    last_used: u64,
}

/// Fixed-capacity cache evicting the least recently used entry.
///
/// Owned by the host and passed where needed; there is no global instance.
#[derive(Debug)]
pub struct GeometryCache<V> {
    entries: SlotMap<EntryId, Entry<V>>,
    index: HashMap<GeometryKey, EntryId>,
    capacity: usize,
    clock: u64,
}

impl<V> GeometryCache<V> {
    /// Creates a cache holding at most `capacity` entries (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: SlotMap::with_capacity_and_key(capacity),
            index: HashMap::with_capacity(capacity),
            capacity,
            clock: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn contains(&self, key: &GeometryKey) -> bool {
        self.index.contains_key(key)
    }

    /// Looks up `key`, marking the entry as recently used.
    pub fn get(&mut self, key: &GeometryKey) -> Option<&V> {
        let id = *self.index.get(key)?;
        tracing::trace!(variant = %key.variant, "geometry cache hit");
        Some(self.touch(id))
    }

    /// Returns the cached value for `key`, computing it with `make` on a miss.
    pub fn get_or_insert_with(&mut self, key: GeometryKey, make: impl FnOnce() -> V) -> &V {
        let id = if let Some(&id) = self.index.get(&key) {
            tracing::trace!(variant = %key.variant, "geometry cache hit");
            id
        } else {
            tracing::trace!(variant = %key.variant, "geometry cache miss");
            self.insert_new(key, make())
        };
        self.touch(id)
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: GeometryKey, value: V) {
        if let Some(&id) = self.index.get(&key) {
            if let Some(entry) = self.entries.get_mut(id) {
                entry.value = value;
            }
            self.touch(id);
        } else {
            let id = self.insert_new(key, value);
            self.touch(id);
        }
    }

    pub fn remove(&mut self, key: &GeometryKey) -> Option<V> {
        let id = self.index.remove(key)?;
        self.entries.remove(id).map(|entry| entry.value)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    fn insert_new(&mut self, key: GeometryKey, value: V) -> EntryId {
        if self.entries.len() >= self.capacity {
            self.evict_least_recent();
        }
        let id = self.entries.insert(Entry {
            key: key.clone(),
            value,
            last_used: self.clock,
        });
        self.index.insert(key, id);
        id
    }

    fn evict_least_recent(&mut self) {
        let Some(id) = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(id, _)| id)
        else {
            return;
        };
        if let Some(entry) = self.entries.remove(id) {
            self.index.remove(&entry.key);
            tracing::trace!(variant = %entry.key.variant, "geometry cache eviction");
        }
    }

    /// Bumps the entry's recency. `id` must come from `index`.
    fn touch(&mut self, id: EntryId) -> &V {
        self.clock += 1;
        let entry = &mut self.entries[id];
        entry.last_used = self.clock;
        &entry.value
    }
}
