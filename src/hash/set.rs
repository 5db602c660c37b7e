//! OpenHashSet - open-addressing hash set over primitive keys
//!
//! A thin layer over [`OpenHashMap`] with unit values, so it shares the
//! probing, backward-shift deletion and cursor rules of the map.
//!
//! # Examples
//!
//! ```rust
//! use primcoll::hash::OpenHashSet;
//!
//! let mut set: OpenHashSet<i64> = [3, 1, 4, 1, 5].into_iter().collect();
//! assert_eq!(set.len(), 4);
//! assert!(set.insert(9));
//! assert!(!set.insert(9));
//! set.retain(|k| k % 2 == 1);
//! assert!(!set.contains(4));
//! ```

use super::common::HashKey;
use super::map::{self, CursorMut, OpenHashMap};
use crate::config::HashTableConfig;
use crate::error::{check_range, CollectionError, Result};
use std::fmt;
use std::iter::FusedIterator;

/// Open-addressing hash set with linear probing and backward-shift deletion.
pub struct OpenHashSet<K> {
    map: OpenHashMap<K, ()>,
}

impl<K: HashKey> OpenHashSet<K> {
    /// Creates an empty set sized for 16 keys at the default load factor.
    pub fn new() -> Self {
        Self {
            map: OpenHashMap::new(),
        }
    }

    /// Creates an empty set that holds `expected` keys without rehashing.
    pub fn with_capacity(expected: usize) -> Result<Self> {
        Ok(Self {
            map: OpenHashMap::with_capacity(expected)?,
        })
    }

    /// Creates an empty set with an explicit load factor in (0, 1).
    pub fn with_capacity_and_load_factor(expected: usize, load_factor: f32) -> Result<Self> {
        Ok(Self {
            map: OpenHashMap::with_capacity_and_load_factor(expected, load_factor)?,
        })
    }

    /// Creates an empty set from a [`HashTableConfig`].
    pub fn with_config(config: &HashTableConfig) -> Result<Self> {
        Ok(Self {
            map: OpenHashMap::with_config(config)?,
        })
    }

    /// Creates a set holding `keys[offset..offset + length]`.
    ///
    /// The range is validated before anything is allocated.
    pub fn from_slice_range(keys: &[K], offset: usize, length: usize) -> Result<Self> {
        let end = offset.checked_add(length).ok_or_else(|| {
            CollectionError::invalid_argument(format!(
                "range overflow: offset {} + length {}",
                offset, length
            ))
        })?;
        check_range(offset, end, keys.len())?;
        let mut set = Self::with_capacity(length)?;
        set.extend(keys[offset..end].iter().copied());
        Ok(set)
    }

    /// Number of keys.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Whether the set holds no keys.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Current table length (number of slots).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.map.capacity()
    }

    /// The load factor the set was created with.
    #[inline]
    pub fn load_factor(&self) -> f32 {
        self.map.load_factor()
    }

    /// Whether `key` is in the set.
    pub fn contains(&self, key: K) -> bool {
        self.map.contains_key(key)
    }

    /// Adds `key`. Returns false if it was already present.
    pub fn insert(&mut self, key: K) -> bool {
        self.map.insert(key, ()).is_none()
    }

    /// Removes `key`. Returns false if it was not present.
    pub fn remove(&mut self, key: K) -> bool {
        self.map.remove(key).is_some()
    }

    /// Removes every key, keeping the table length.
    pub fn clear(&mut self) {
        self.map.clear();
    }

    /// Makes room for `additional` more keys without further rehashing.
    pub fn reserve(&mut self, additional: usize) -> Result<()> {
        self.map.reserve(additional)
    }

    /// Makes room for `capacity` keys in total.
    pub fn ensure_capacity(&mut self, capacity: usize) -> Result<()> {
        self.map.ensure_capacity(capacity)
    }

    /// Shrinks the table to fit the current keys. Returns whether the table
    /// was rehashed.
    pub fn trim(&mut self) -> bool {
        self.map.trim()
    }

    /// Shrinks the table to fit `target` keys (or the current keys, if more).
    pub fn trim_to(&mut self, target: usize) -> bool {
        self.map.trim_to(target)
    }

    /// Keeps only the keys for which `keep` returns true. Every key is
    /// offered exactly once.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(K) -> bool,
    {
        self.map.retain(|k, _| keep(k));
    }

    /// Keeps only the keys also contained in `other`. Returns whether the
    /// set changed.
    pub fn retain_all(&mut self, other: &OpenHashSet<K>) -> bool {
        let before = self.len();
        self.retain(|k| other.contains(k));
        self.len() != before
    }

    /// Removes every key contained in `other`. Returns whether the set
    /// changed.
    pub fn remove_all(&mut self, other: &OpenHashSet<K>) -> bool {
        let before = self.len();
        if other.len() < self.len() {
            for key in other.iter() {
                self.remove(key);
            }
        } else {
            self.retain(|k| !other.contains(k));
        }
        self.len() != before
    }

    /// Cursor over the keys that can remove the key it stands on.
    pub fn cursor(&mut self) -> SetCursor<'_, K> {
        SetCursor {
            inner: self.map.cursor_mut(),
        }
    }

    /// Iterator over the keys in table order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            inner: self.map.keys(),
        }
    }

    #[cfg(test)]
    pub(crate) fn assert_no_gaps(&self) {
        self.map.assert_no_gaps();
    }
}

impl<K: HashKey> Default for OpenHashSet<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone> Clone for OpenHashSet<K> {
    fn clone(&self) -> Self {
        Self {
            map: self.map.clone(),
        }
    }
}

impl<K: HashKey> fmt::Debug for OpenHashSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: HashKey> PartialEq for OpenHashSet<K> {
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<K: HashKey> Eq for OpenHashSet<K> {}

impl<K: HashKey> Extend<K> for OpenHashSet<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        self.map.extend(iter.into_iter().map(|k| (k, ())));
    }
}

impl<K: HashKey> FromIterator<K> for OpenHashSet<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Cursor over the keys of an [`OpenHashSet`] supporting removal.
///
/// Follows the rules of [`CursorMut`]: after
/// [`remove_current`](Self::remove_current) the cursor stays on the freed
/// slot and the next [`advance`](Self::advance) re-reads it.
pub struct SetCursor<'a, K> {
    inner: CursorMut<'a, K, ()>,
}

impl<K: HashKey> SetCursor<'_, K> {
    /// Moves to the next key and returns it.
    pub fn advance(&mut self) -> Option<K> {
        self.inner.advance().map(|(k, _)| k)
    }

    /// The key the cursor stands on, if any.
    pub fn current(&mut self) -> Option<K> {
        self.inner.current().map(|(k, _)| k)
    }

    /// Removes the key the cursor stands on.
    pub fn remove_current(&mut self) -> Option<K> {
        self.inner.remove_current().map(|(k, _)| k)
    }
}

/// Iterator over the keys of a set.
pub struct Iter<'a, K> {
    inner: map::Keys<'a, K, ()>,
}

impl<K: Copy> Iterator for Iter<'_, K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy> ExactSizeIterator for Iter<'_, K> {}
impl<K: Copy> FusedIterator for Iter<'_, K> {}

/// Owning iterator over the keys of a set.
pub struct IntoIter<K> {
    inner: map::IntoIter<K, ()>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}

impl<K: HashKey> IntoIterator for OpenHashSet<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(self) -> IntoIter<K> {
        IntoIter {
            inner: self.map.into_iter(),
        }
    }
}

impl<'a, K: HashKey> IntoIterator for &'a OpenHashSet<K> {
    type Item = K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}
