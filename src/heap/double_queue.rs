//! Indirect heap priority queue with a secondary order.

use super::indirect_queue::IndirectHeapPriorityQueue;
use super::queue::IndirectPriorityQueue;
use super::NaturalOrder;
use crate::error::{CollectionError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Indirect queue ordered by a primary comparator, with a secondary
/// comparator that ranks the indices tied for first place.
///
/// The secondary order is consulted only by the `secondary_*` methods, which
/// scan the primary front. No second heap is kept.
pub struct DoubleIndirectHeapPriorityQueue<'a, T, S, C = NaturalOrder<T>> {
    primary: IndirectHeapPriorityQueue<'a, T, C>,
    secondary: S,
}

impl<'a, T: Ord, S> DoubleIndirectHeapPriorityQueue<'a, T, S>
where
    S: Fn(&T, &T) -> Ordering,
{
    /// Empty queue over `refs` in natural order, ties ranked by `secondary`.
    pub fn new(refs: &'a [T], secondary: S) -> Self {
        Self::with_comparators(refs, T::cmp, secondary)
    }
}

impl<'a, T, S, C> DoubleIndirectHeapPriorityQueue<'a, T, S, C>
where
    C: Fn(&T, &T) -> Ordering,
    S: Fn(&T, &T) -> Ordering,
{
    /// Empty queue over `refs` ordered by `primary`, ties ranked by
    /// `secondary`.
    pub fn with_comparators(refs: &'a [T], primary: C, secondary: S) -> Self {
        Self {
            primary: IndirectHeapPriorityQueue::with_comparator(refs, primary),
            secondary,
        }
    }

    /// The borrowed reference slice.
    pub fn refs(&self) -> &'a [T] {
        self.primary.refs()
    }

    /// Picks from the front the index that wins under `better`. The first
    /// visited index wins ties.
    fn secondary_pick(&self, better: Ordering) -> Result<usize> {
        let refs = self.primary.refs();
        let mut best: Option<usize> = None;
        self.primary.for_each_front(&mut |index| match best {
            Some(b) if (self.secondary)(&refs[index], &refs[b]) != better => {}
            _ => best = Some(index),
        });
        best.ok_or(CollectionError::Empty)
    }

    /// Among the indices tied for first place, the one minimal under the
    /// secondary order.
    pub fn secondary_first(&self) -> Result<usize> {
        self.secondary_pick(Ordering::Less)
    }

    /// Among the indices tied for first place, the one maximal under the
    /// secondary order.
    pub fn secondary_last(&self) -> Result<usize> {
        self.secondary_pick(Ordering::Greater)
    }

    /// Writes into `out` the indices tied for first place under both orders
    /// and returns how many were written.
    pub fn secondary_front(&self, out: &mut [usize]) -> Result<usize> {
        let refs = self.primary.refs();
        let top = &refs[self.secondary_first()?];
        let mut count = 0;
        let mut overflow = false;
        self.primary.for_each_front(&mut |index| {
            if (self.secondary)(&refs[index], top) != Ordering::Equal {
                return;
            }
            match out.get_mut(count) {
                Some(slot) => *slot = index,
                None => overflow = true,
            }
            count += 1;
        });
        if overflow {
            return Err(CollectionError::out_of_bounds(count, out.len()));
        }
        Ok(count)
    }
}

impl<T, S, C> IndirectPriorityQueue for DoubleIndirectHeapPriorityQueue<'_, T, S, C>
where
    C: Fn(&T, &T) -> Ordering,
    S: Fn(&T, &T) -> Ordering,
{
    fn enqueue(&mut self, index: usize) -> Result<()> {
        self.primary.enqueue(index)
    }

    fn dequeue(&mut self) -> Result<usize> {
        self.primary.dequeue()
    }

    fn first(&self) -> Result<usize> {
        self.primary.first()
    }

    fn last(&self) -> Result<usize> {
        self.primary.last()
    }

    fn changed(&mut self) -> Result<()> {
        self.primary.changed()
    }

    fn changed_at(&mut self, index: usize) -> Result<()> {
        self.primary.changed_at(index)
    }

    fn all_changed(&mut self) {
        self.primary.all_changed()
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        self.primary.remove(index)
    }

    fn contains(&self, index: usize) -> bool {
        self.primary.contains(index)
    }

    fn front(&self, out: &mut [usize]) -> Result<usize> {
        self.primary.front(out)
    }

    fn len(&self) -> usize {
        self.primary.len()
    }

    fn clear(&mut self) {
        self.primary.clear()
    }
}

impl<T, S, C> fmt::Debug for DoubleIndirectHeapPriorityQueue<'_, T, S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleIndirectHeapPriorityQueue")
            .field("primary", &self.primary)
            .finish_non_exhaustive()
    }
}
