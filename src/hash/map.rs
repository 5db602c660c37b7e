//! OpenHashMap - open-addressing hash map over primitive keys
//!
//! Keys and values live directly in a power-of-two table of slots. Collisions
//! are resolved by linear probing, and removal closes the gap by shifting the
//! following entries of the cluster backward, so the table never holds
//! tombstones and lookups stop at the first empty slot.
//!
//! Slots are `Option<(K, V)>`: every key, zero included, is an ordinary
//! member of the table and there is no reserved "empty" key value.
//!
//! # Examples
//!
//! ```rust
//! use primcoll::hash::OpenHashMap;
//!
//! let mut map = OpenHashMap::<i32, &str>::new();
//! assert_eq!(map.insert(0, "zero"), None);
//! assert_eq!(map.insert(7, "seven"), None);
//! assert_eq!(map.insert(7, "SEVEN"), Some("seven"));
//! assert_eq!(map.get(0), Some(&"zero"));
//! assert_eq!(map.remove(7), Some("SEVEN"));
//! assert!(!map.contains_key(7));
//! ```
//!
//! # Concurrent modification
//!
//! Shared iterators borrow the map, so the compiler rules out modification
//! while they are alive. The only way to remove entries during a traversal is
//! [`CursorMut::remove_current`] (or [`OpenHashMap::retain`], built on it).

use super::common::{
    array_size, check_load_factor, max_fill, HashKey, DEFAULT_LOAD_FACTOR, DEFAULT_TABLE_SIZE,
};
use crate::config::HashTableConfig;
use crate::error::Result;
use std::fmt;
use std::iter::FusedIterator;
use std::mem;
use std::ops::AddAssign;

/// Outcome of probing for a key.
enum Probe {
    /// The key is stored at this slot
    Occupied(usize),
    /// The key is absent; this is the empty slot that ended the probe
    Vacant(usize),
}

/// Open-addressing hash map with linear probing and backward-shift deletion.
pub struct OpenHashMap<K, V> {
    /// Table of length `mask + 1`, a power of two
    slots: Vec<Option<(K, V)>>,
    /// Probe wraparound mask
    mask: usize,
    /// Number of occupied slots
    len: usize,
    /// Occupancy at which the next insertion grows the table
    max_fill: usize,
    /// Configured load factor
    load_factor: f32,
}

impl<K: HashKey, V> OpenHashMap<K, V> {
    /// Creates an empty map sized for 16 entries at the default load factor.
    pub fn new() -> Self {
        Self::allocate(DEFAULT_TABLE_SIZE, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map that holds `expected` entries without rehashing.
    pub fn with_capacity(expected: usize) -> Result<Self> {
        Self::with_capacity_and_load_factor(expected, DEFAULT_LOAD_FACTOR)
    }

    /// Creates an empty map with an explicit load factor in (0, 1).
    pub fn with_capacity_and_load_factor(expected: usize, load_factor: f32) -> Result<Self> {
        check_load_factor(load_factor)?;
        let n = array_size(expected, load_factor)?;
        Ok(Self::allocate(n, load_factor))
    }

    /// Creates an empty map from a [`HashTableConfig`].
    pub fn with_config(config: &HashTableConfig) -> Result<Self> {
        Self::with_capacity_and_load_factor(config.initial_capacity, config.load_factor)
    }

    fn allocate(n: usize, load_factor: f32) -> Self {
        debug_assert!(n.is_power_of_two() && n >= 2);
        Self {
            slots: empty_slots(n),
            mask: n - 1,
            len: 0,
            max_fill: max_fill(n, load_factor),
            load_factor,
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the map holds no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current table length (number of slots).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// The load factor the map was created with.
    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    #[inline]
    fn home(&self, key: K) -> usize {
        key.hash_mix() & self.mask
    }

    fn probe(&self, key: K) -> Probe {
        let mut pos = self.home(key);
        loop {
            match &self.slots[pos] {
                None => return Probe::Vacant(pos),
                Some((k, _)) if k.key_eq(key) => return Probe::Occupied(pos),
                Some(_) => pos = (pos + 1) & self.mask,
            }
        }
    }

    /// Returns a reference to the value stored for `key`.
    pub fn get(&self, key: K) -> Option<&V> {
        match self.probe(key) {
            Probe::Occupied(pos) => self.slots[pos].as_ref().map(|(_, v)| v),
            Probe::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to the value stored for `key`.
    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Occupied(pos) => self.slots[pos].as_mut().map(|(_, v)| v),
            Probe::Vacant(_) => None,
        }
    }

    /// Whether `key` is stored in the map.
    pub fn contains_key(&self, key: K) -> bool {
        matches!(self.probe(key), Probe::Occupied(_))
    }

    /// Whether some entry holds `value`. Linear in the table length.
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Inserts `value` for `key`, returning the previous value if the key was
    /// already present.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.probe(key) {
            Probe::Occupied(pos) => self.slots[pos]
                .as_mut()
                .map(|(_, v)| mem::replace(v, value)),
            Probe::Vacant(pos) => {
                self.insert_vacant(pos, key, value);
                None
            }
        }
    }

    /// Returns the value for `key`, inserting `make()` first if absent.
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, make: F) -> &mut V {
        let pos = match self.probe(key) {
            Probe::Occupied(pos) => pos,
            Probe::Vacant(pos) => return self.insert_vacant(pos, key, make()),
        };
        match &mut self.slots[pos] {
            Some((_, v)) => v,
            None => unreachable!("probe reported an occupied slot"),
        }
    }

    /// Adds `increment` to the value of `key` (inserting the default value
    /// first if absent) and returns the value before the addition.
    pub fn add_to(&mut self, key: K, increment: V) -> V
    where
        V: AddAssign + Default + Copy,
    {
        let value = self.get_or_insert_with(key, V::default);
        let old = *value;
        *value += increment;
        old
    }

    fn insert_vacant(&mut self, mut pos: usize, key: K, value: V) -> &mut V {
        if self.len >= self.max_fill {
            self.grow();
            pos = self.vacant_slot(key);
        }
        self.len += 1;
        &mut self.slots[pos].insert((key, value)).1
    }

    /// First empty slot on the probe sequence of a key known to be absent.
    fn vacant_slot(&self, key: K) -> usize {
        let mut pos = self.home(key);
        while self.slots[pos].is_some() {
            pos = (pos + 1) & self.mask;
        }
        pos
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: K) -> Option<V> {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value.
    pub fn remove_entry(&mut self, key: K) -> Option<(K, V)> {
        match self.probe(key) {
            Probe::Occupied(pos) => self.remove_at(pos),
            Probe::Vacant(_) => None,
        }
    }

    fn remove_at(&mut self, pos: usize) -> Option<(K, V)> {
        let entry = self.slots[pos].take()?;
        self.len -= 1;
        self.shift_keys(pos);
        Some(entry)
    }

    /// Closes the gap at `pos` by backward shifting.
    ///
    /// Walks the cluster after the gap. An entry may fill the gap only if the
    /// gap lies on its probe path, i.e. its home slot is not circularly inside
    /// `(gap, entry]`. Entries that cannot move are skipped, and the scan only
    /// ends at an empty slot, which is left as the new gap.
    fn shift_keys(&mut self, mut pos: usize) {
        let mask = self.mask;
        loop {
            let last = pos;
            pos = (last + 1) & mask;
            loop {
                let key = match &self.slots[pos] {
                    None => return,
                    Some((k, _)) => *k,
                };
                let home = key.hash_mix() & mask;
                let movable = if last <= pos {
                    last >= home || home > pos
                } else {
                    last >= home && home > pos
                };
                if movable {
                    break;
                }
                pos = (pos + 1) & mask;
            }
            self.slots[last] = self.slots[pos].take();
        }
    }

    /// Removes every entry, keeping the table length.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.len = 0;
    }

    /// Makes room for `additional` more entries without further rehashing.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        let needed = array_size(self.len.saturating_add(additional), self.load_factor)?;
        if needed > self.slots.len() {
            self.rehash(needed);
        }
        Ok(())
    }

    /// Makes room for `capacity` entries in total.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<()> {
        self.reserve(capacity.saturating_sub(self.len))
    }

    /// Shrinks the table to the smallest length that holds the current
    /// entries. Returns whether the table was rehashed.
    pub fn trim(&mut self) -> bool {
        self.trim_to(self.len)
    }

    /// Shrinks the table to the smallest length that holds `target` entries
    /// (or the current entries, if more). Never grows the table. Returns
    /// whether the table was rehashed.
    pub fn trim_to(&mut self, target: usize) -> bool {
        let Ok(n) = array_size(target.max(self.len), self.load_factor) else {
            return false;
        };
        if n >= self.slots.len() || self.len > max_fill(n, self.load_factor) {
            return false;
        }
        log::debug!(
            "trimming open hash table from {} to {} slots ({} entries)",
            self.slots.len(),
            n,
            self.len
        );
        self.rehash(n);
        true
    }

    fn grow(&mut self) {
        let doubled = self.slots.len() << 1;
        let n = array_size(self.len + 1, self.load_factor).unwrap_or(doubled);
        self.rehash(n.max(doubled));
    }

    /// Re-inserts every entry into a fresh table of length `n`.
    fn rehash(&mut self, n: usize) {
        log::debug!(
            "rehashing open hash table from {} to {} slots ({} entries)",
            self.slots.len(),
            n,
            self.len
        );
        let old = mem::replace(&mut self.slots, empty_slots(n));
        self.mask = n - 1;
        self.max_fill = max_fill(n, self.load_factor);
        for (key, value) in old.into_iter().flatten() {
            let pos = self.vacant_slot(key);
            self.slots[pos] = Some((key, value));
        }
    }

    /// Keeps only the entries for which `keep` returns true.
    ///
    /// Every entry is offered exactly once, even though removals shift
    /// later entries backward.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(K, &mut V) -> bool,
    {
        let mut cursor = self.cursor_mut();
        while let Some((key, value)) = cursor.advance() {
            if !keep(key, value) {
                cursor.remove_current();
            }
        }
    }

    /// Cursor over the entries that can remove the entry it stands on.
    pub fn cursor_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(self)
    }

    /// Iterator over `(key, &value)` in table order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.len,
        }
    }

    /// Iterator over `(key, &mut value)` in table order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.len,
        }
    }

    /// Iterator over the keys.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Iterator over the values.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Iterator over mutable references to the values.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Scans the whole table and panics if some entry is not reachable from
    /// its home slot without crossing an empty slot.
    #[cfg(test)]
    pub(crate) fn assert_no_gaps(&self) {
        let mut occupied = 0;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some((key, _)) = slot {
                occupied += 1;
                let mut pos = self.home(*key);
                while pos != i {
                    assert!(
                        self.slots[pos].is_some(),
                        "key {:?} at slot {} is cut off from home slot {} by empty slot {}",
                        key,
                        i,
                        self.home(*key),
                        pos
                    );
                    pos = (pos + 1) & self.mask;
                }
            }
        }
        assert_eq!(occupied, self.len);
        assert!(self.len <= self.max_fill && self.max_fill < self.slots.len());
    }
}

fn empty_slots<K, V>(n: usize) -> Vec<Option<(K, V)>> {
    std::iter::repeat_with(|| None).take(n).collect()
}

impl<K: HashKey, V> Default for OpenHashMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for OpenHashMap<K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            mask: self.mask,
            len: self.len,
            max_fill: self.max_fill,
            load_factor: self.load_factor,
        }
    }
}

impl<K: HashKey, V: fmt::Debug> fmt::Debug for OpenHashMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: HashKey, V: PartialEq> PartialEq for OpenHashMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: HashKey, V: Eq> Eq for OpenHashMap<K, V> {}

impl<K: HashKey, V> Extend<(K, V)> for OpenHashMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        // Only a sizing hint: inserts still grow the table on demand.
        let _ = self.reserve(iter.size_hint().0);
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: HashKey, V> FromIterator<(K, V)> for OpenHashMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

/// Cursor over the entries of an [`OpenHashMap`] supporting removal.
///
/// The traversal starts right after an empty slot and wraps around the
/// table once. No cluster crosses that empty slot, so a backward shift
/// triggered by [`remove_current`](Self::remove_current) only moves entries
/// the cursor has not reached yet, and only into slots at or after the freed
/// one. Removal leaves the cursor on the freed slot, so the next
/// [`advance`](Self::advance) re-reads it and every entry is visited exactly
/// once.
pub struct CursorMut<'a, K, V> {
    map: &'a mut OpenHashMap<K, V>,
    start: usize,
    /// Slots consumed so far, counted from `start`
    offset: usize,
    current: Option<usize>,
}

impl<'a, K: HashKey, V> CursorMut<'a, K, V> {
    fn new(map: &'a mut OpenHashMap<K, V>) -> Self {
        let start = map
            .slots
            .iter()
            .position(Option::is_none)
            .map_or(0, |empty| (empty + 1) & map.mask);
        Self {
            map,
            start,
            offset: 0,
            current: None,
        }
    }

    /// Moves to the next entry and returns it, or `None` once the table is
    /// exhausted.
    pub fn advance(&mut self) -> Option<(K, &mut V)> {
        let n = self.map.slots.len();
        while self.offset < n {
            let pos = (self.start + self.offset) & self.map.mask;
            self.offset += 1;
            if self.map.slots[pos].is_some() {
                self.current = Some(pos);
                return self.map.slots[pos].as_mut().map(|(k, v)| (*k, v));
            }
        }
        self.current = None;
        None
    }

    /// The entry the cursor stands on, if any.
    pub fn current(&mut self) -> Option<(K, &mut V)> {
        let pos = self.current?;
        self.map.slots[pos].as_mut().map(|(k, v)| (*k, v))
    }

    /// Removes the entry the cursor stands on. The cursor stays on the freed
    /// slot; call [`advance`](Self::advance) to move on. Returns `None` if
    /// the cursor is not on an entry.
    pub fn remove_current(&mut self) -> Option<(K, V)> {
        let pos = self.current.take()?;
        let entry = self.map.remove_at(pos)?;
        self.offset -= 1;
        Some(entry)
    }

    /// Number of entries left in the map.
    pub fn len(&self) -> usize {
        self.map.len
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.map.len == 0
    }
}

/// Iterator over `(key, &value)` pairs.
pub struct Iter<'a, K, V> {
    slots: std::slice::Iter<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K: Copy, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some((k, v)) = slot {
                self.remaining -= 1;
                return Some((*k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Copy, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K: Copy, V> FusedIterator for Iter<'_, K, V> {}

impl<K: Copy, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

/// Iterator over `(key, &mut value)` pairs.
pub struct IterMut<'a, K, V> {
    slots: std::slice::IterMut<'a, Option<(K, V)>>,
    remaining: usize,
}

impl<'a, K: Copy, V> Iterator for IterMut<'a, K, V> {
    type Item = (K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        for slot in self.slots.by_ref() {
            if let Some((k, v)) = slot {
                self.remaining -= 1;
                return Some((*k, v));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Copy, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K: Copy, V> FusedIterator for IterMut<'_, K, V> {}

/// Iterator over the keys of a map.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<K: Copy, V> Iterator for Keys<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K: Copy, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over the values of a map.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K: Copy, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for Values<'_, K, V> {}

/// Iterator over mutable references to the values of a map.
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K: Copy, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

/// Owning iterator over `(key, value)` pairs.
pub struct IntoIter<K, V> {
    slots: std::vec::IntoIter<Option<(K, V)>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let entry = self.slots.find_map(|slot| slot)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}
impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: HashKey, V> IntoIterator for OpenHashMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            remaining: self.len,
            slots: self.slots.into_iter(),
        }
    }
}

impl<'a, K: HashKey, V> IntoIterator for &'a OpenHashMap<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: HashKey, V> IntoIterator for &'a mut OpenHashMap<K, V> {
    type Item = (K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Keys of `i32` whose home slot in a table with `mask` is `slot`.
    fn keys_homed_at(slot: usize, mask: usize, count: usize) -> Vec<i32> {
        (0..)
            .filter(|k: &i32| k.hash_mix() & mask == slot)
            .take(count)
            .collect()
    }

    #[test]
    fn test_basic_insert_get() {
        let mut map = OpenHashMap::<i32, String>::new();
        assert_eq!(map.insert(1, "one".to_string()), None);
        assert_eq!(map.get(1), Some(&"one".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.capacity(), DEFAULT_TABLE_SIZE);
    }

    #[test]
    fn test_update_existing() {
        let mut map = OpenHashMap::<i64, i32>::new();
        assert_eq!(map.insert(9, 1), None);
        assert_eq!(map.insert(9, 2), Some(1));
        assert_eq!(map.get(9), Some(&2));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_zero_key() {
        let mut map = OpenHashMap::<i32, i32>::new();
        assert!(!map.contains_key(0));
        assert_eq!(map.get(0), None);
        assert_eq!(map.insert(0, 10), None);
        assert!(map.contains_key(0));
        assert_eq!(map.get(0), Some(&10));
        assert_eq!(map.insert(0, 11), Some(10));
        assert_eq!(map.len(), 1);
        assert_eq!(map.remove(0), Some(11));
        assert!(!map.contains_key(0));
        assert_eq!(map.remove(0), None);
        assert!(map.is_empty());
        map.assert_no_gaps();
    }

    #[test]
    fn test_remove_missing() {
        let mut map = OpenHashMap::<u32, u32>::new();
        map.insert(1, 1);
        assert_eq!(map.remove(2), None);
        assert_eq!(map.remove_entry(1), Some((1, 1)));
        assert_eq!(map.remove_entry(1), None);
    }

    #[test]
    fn test_growth() {
        let mut map = OpenHashMap::<i32, i32>::new();
        let initial = map.capacity();
        for i in 0..1000 {
            map.insert(i, i * 2);
        }
        assert!(map.capacity() > initial);
        assert!(map.capacity().is_power_of_two());
        for i in 0..1000 {
            assert_eq!(map.get(i), Some(&(i * 2)));
        }
        map.assert_no_gaps();
    }

    #[test]
    fn test_invalid_construction() {
        assert!(OpenHashMap::<i32, i32>::with_capacity_and_load_factor(10, 0.0).is_err());
        assert!(OpenHashMap::<i32, i32>::with_capacity_and_load_factor(10, 1.0).is_err());
        assert!(OpenHashMap::<i32, i32>::with_capacity_and_load_factor(10, f32::NAN).is_err());
        assert!(OpenHashMap::<i32, i32>::with_capacity(usize::MAX).is_err());
        let map = OpenHashMap::<i32, i32>::with_capacity_and_load_factor(100, 0.5).unwrap();
        assert_eq!(map.capacity(), 256);
        assert_eq!(map.load_factor(), 0.5);
    }

    #[test]
    fn test_with_config() {
        let config = HashTableConfig {
            initial_capacity: 1000,
            load_factor: 0.5,
        };
        let map = OpenHashMap::<i32, i32>::with_config(&config).unwrap();
        assert_eq!(map.capacity(), 2048);
    }

    #[test]
    fn test_high_load_factor_tiny_table() {
        let mut map = OpenHashMap::<i32, i32>::with_capacity_and_load_factor(0, 0.99).unwrap();
        assert_eq!(map.capacity(), 2);
        for i in 0..50 {
            map.insert(i, i);
            map.assert_no_gaps();
        }
        for i in 0..50 {
            assert_eq!(map.remove(i), Some(i));
            map.assert_no_gaps();
        }
    }

    #[test]
    fn test_backward_shift_across_wraparound() {
        let mut map = OpenHashMap::<i32, i32>::new();
        let mask = map.capacity() - 1;
        // A cluster homed at the last slot spills over into slots 0, 1, 2.
        let tail = keys_homed_at(mask, mask, 4);
        // A key homed at slot 0 lands after the spilled entries.
        let head = keys_homed_at(0, mask, 1);
        for &k in tail.iter().chain(head.iter()) {
            map.insert(k, k);
        }
        map.assert_no_gaps();

        assert_eq!(map.remove(tail[0]), Some(tail[0]));
        map.assert_no_gaps();
        for &k in tail[1..].iter().chain(head.iter()) {
            assert_eq!(map.get(k), Some(&k), "lost key {} after wraparound shift", k);
        }

        assert_eq!(map.remove(tail[2]), Some(tail[2]));
        map.assert_no_gaps();
        assert_eq!(map.get(head[0]), Some(&head[0]));
    }

    #[test]
    fn test_shift_skips_entries_that_cannot_move() {
        let mut map = OpenHashMap::<i32, i32>::new();
        let mask = map.capacity() - 1;
        let at5 = keys_homed_at(5, mask, 2);
        let at6 = keys_homed_at(6, mask, 1);
        // slots: 5 <- at5[0], 6 <- at6[0], 7 <- at5[1]
        map.insert(at5[0], 0);
        map.insert(at6[0], 1);
        map.insert(at5[1], 2);
        map.assert_no_gaps();

        // at6[0] cannot move into slot 5 but at5[1] behind it can.
        map.remove(at5[0]);
        map.assert_no_gaps();
        assert_eq!(map.get(at6[0]), Some(&1));
        assert_eq!(map.get(at5[1]), Some(&2));
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut map = OpenHashMap::<i32, i32>::new();
        for i in 0..100 {
            map.insert(i, i);
        }
        for i in (0..100).step_by(3) {
            map.remove(i);
        }
        for i in (0..100).step_by(3) {
            assert!(!map.contains_key(i));
            assert_eq!(map.insert(i, -i), None);
            assert_eq!(map.get(i), Some(&-i));
        }
        assert_eq!(map.len(), 100);
        map.assert_no_gaps();
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut map = OpenHashMap::<i32, i32>::new();
        for i in 0..100 {
            map.insert(i, i);
        }
        let capacity = map.capacity();
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.capacity(), capacity);
        assert_eq!(map.get(5), None);
        assert_eq!(map.iter().count(), 0);
    }

    #[test]
    fn test_trim() {
        let mut map = OpenHashMap::<i32, i32>::new();
        for i in 0..1000 {
            map.insert(i, i);
        }
        for i in 10..1000 {
            map.remove(i);
        }
        let before = map.capacity();
        assert!(map.trim());
        assert!(map.capacity() < before);
        assert_eq!(map.capacity(), 16);
        for i in 0..10 {
            assert_eq!(map.get(i), Some(&i));
        }
        map.assert_no_gaps();
        assert!(!map.trim());
    }

    #[test]
    fn test_trim_to_never_grows() {
        let mut map = OpenHashMap::<i32, i32>::new();
        map.insert(1, 1);
        let before = map.capacity();
        assert!(!map.trim_to(1_000_000));
        assert_eq!(map.capacity(), before);
        assert!(!map.trim_to(usize::MAX));
        assert!(map.trim_to(0));
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.get(1), Some(&1));
    }

    #[test]
    fn test_reserve() {
        let mut map = OpenHashMap::<i32, i32>::new();
        map.reserve(1000).unwrap();
        let capacity = map.capacity();
        assert!(capacity >= 1334);
        for i in 0..1000 {
            map.insert(i, i);
        }
        assert_eq!(map.capacity(), capacity);
        assert!(map.reserve(usize::MAX).is_err());
    }

    #[test]
    fn test_get_or_insert_with_and_add_to() {
        let mut map = OpenHashMap::<u8, u64>::new();
        assert_eq!(map.add_to(3, 5), 0);
        assert_eq!(map.add_to(3, 5), 5);
        assert_eq!(map.get(3), Some(&10));
        *map.get_or_insert_with(4, || 40) += 1;
        assert_eq!(map.get(4), Some(&41));
        assert_eq!(*map.get_or_insert_with(4, || 0), 41);

        // Insertion through get_or_insert_with grows the table when needed.
        for k in 0..=255u8 {
            map.get_or_insert_with(k, || k as u64);
        }
        assert_eq!(map.len(), 256);
        map.assert_no_gaps();
    }

    #[test]
    fn test_get_mut_and_values_mut() {
        let mut map: OpenHashMap<i16, i32> = (0..10).map(|i| (i, i as i32)).collect();
        if let Some(v) = map.get_mut(3) {
            *v = 300;
        }
        assert_eq!(map.get(3), Some(&300));
        for v in map.values_mut() {
            *v += 1;
        }
        assert_eq!(map.get(0), Some(&1));
        assert_eq!(map.get(3), Some(&301));
        for (k, v) in &mut map {
            *v = k as i32;
        }
        assert!(map.contains_value(&9));
        assert!(!map.contains_value(&10));
    }

    #[test]
    fn test_iterators() {
        let map: OpenHashMap<i32, i32> = (0..50).map(|i| (i, i * i)).collect();
        assert_eq!(map.iter().len(), 50);
        let mut keys: Vec<i32> = map.keys().collect();
        keys.sort_unstable();
        assert_eq!(keys, (0..50).collect::<Vec<_>>());
        let sum: i32 = map.values().sum();
        assert_eq!(sum, (0..50).map(|i| i * i).sum::<i32>());
        let mut owned: Vec<(i32, i32)> = map.clone().into_iter().collect();
        owned.sort_unstable();
        assert_eq!(owned[7], (7, 49));
        assert_eq!(owned.len(), 50);
    }

    #[test]
    fn test_retain() {
        let mut map: OpenHashMap<i32, i32> = (0..1000).map(|i| (i, i)).collect();
        let mut seen = 0;
        map.retain(|k, v| {
            seen += 1;
            *v += 1;
            k % 2 == 0
        });
        assert_eq!(seen, 1000);
        assert_eq!(map.len(), 500);
        for i in 0..1000 {
            assert_eq!(map.get(i).copied(), if i % 2 == 0 { Some(i + 1) } else { None });
        }
        map.assert_no_gaps();
    }

    #[test]
    fn test_retain_wrapping_cluster_visits_each_entry_once() {
        let mut map = OpenHashMap::<i32, i32>::new();
        let mask = map.capacity() - 1;
        let tail = keys_homed_at(mask, mask, 5);
        let tail_minus_one = keys_homed_at(mask - 1, mask, 2);
        for &k in tail.iter().chain(tail_minus_one.iter()) {
            map.insert(k, 0);
        }
        map.retain(|_, visits| {
            *visits += 1;
            false
        });
        assert!(map.is_empty());

        for &k in tail.iter().chain(tail_minus_one.iter()) {
            map.insert(k, 0);
        }
        let keep = tail[3];
        let mut visits: HashMap<i32, usize> = HashMap::new();
        map.retain(|k, _| {
            *visits.entry(k).or_default() += 1;
            k == keep
        });
        assert_eq!(visits.len(), 7);
        assert!(visits.values().all(|&n| n == 1), "{:?}", visits);
        assert_eq!(map.len(), 1);
        assert!(map.contains_key(keep));
        map.assert_no_gaps();
    }

    #[test]
    fn test_cursor_remove_current() {
        let mut map: OpenHashMap<i32, i32> = (0..100).map(|i| (i, i)).collect();
        let mut cursor = map.cursor_mut();
        assert!(cursor.current().is_none());
        assert!(cursor.remove_current().is_none());
        let mut removed = Vec::new();
        while let Some((k, _)) = cursor.advance() {
            if k % 10 == 0 {
                assert_eq!(cursor.current().map(|(k, _)| k), Some(k));
                removed.push(cursor.remove_current().map(|(k, _)| k));
                assert!(cursor.remove_current().is_none());
            }
        }
        assert_eq!(cursor.len(), 90);
        assert!(!cursor.is_empty());
        assert!(cursor.advance().is_none());
        assert_eq!(removed.len(), 10);
        assert_eq!(map.len(), 90);
        map.assert_no_gaps();
    }

    #[test]
    fn test_equality_and_debug() {
        let a: OpenHashMap<i32, i32> = (0..20).map(|i| (i, i)).collect();
        let mut b = OpenHashMap::with_capacity(1000).unwrap();
        for i in (0..20).rev() {
            b.insert(i, i);
        }
        assert_eq!(a, b);
        b.insert(3, 4);
        assert_ne!(a, b);

        let mut single = OpenHashMap::<i32, &str>::new();
        single.insert(1, "x");
        assert_eq!(format!("{:?}", single), "{1: \"x\"}");
    }

    #[test]
    fn test_float_keys() {
        let mut map = OpenHashMap::<f64, &str>::new();
        map.insert(f64::NAN, "nan");
        map.insert(0.0, "zero");
        map.insert(-0.0, "negative zero");
        assert_eq!(map.get(f64::NAN), Some(&"nan"));
        assert_eq!(map.get(0.0), Some(&"zero"));
        assert_eq!(map.get(-0.0), Some(&"negative zero"));
        assert_eq!(map.len(), 3);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Insert(i16, i32),
        Remove(i16),
        Retain(i16),
        Trim,
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        // A narrow key range forces long clusters and frequent wraparound.
        let key = -40i16..40;
        prop_oneof![
            4 => (key.clone(), any::<i32>()).prop_map(|(k, v)| Op::Insert(k, v)),
            3 => key.clone().prop_map(Op::Remove),
            1 => (1i16..7).prop_map(Op::Retain),
            1 => Just(Op::Trim),
        ]
    }

    proptest! {
        #[test]
        fn prop_no_gap_invariant(ops in prop::collection::vec(op_strategy(), 0..400)) {
            let mut map = OpenHashMap::<i16, i32>::with_capacity_and_load_factor(4, 0.9).unwrap();
            let mut reference = HashMap::new();
            for op in ops {
                match op {
                    Op::Insert(k, v) => {
                        prop_assert_eq!(map.insert(k, v), reference.insert(k, v));
                    }
                    Op::Remove(k) => {
                        prop_assert_eq!(map.remove(k), reference.remove(&k));
                    }
                    Op::Retain(m) => {
                        map.retain(|k, _| k % m != 0);
                        reference.retain(|k, _| k % m != 0);
                    }
                    Op::Trim => {
                        map.trim();
                    }
                }
                map.assert_no_gaps();
                prop_assert_eq!(map.len(), reference.len());
            }
            for (k, v) in &reference {
                prop_assert_eq!(map.get(*k), Some(v));
            }
        }
    }
}
