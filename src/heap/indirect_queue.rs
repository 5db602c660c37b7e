//! Indirect heap priority queue.

use super::indirect::{down_heap, fix, front, last, make_heap, up_heap};
use super::queue::IndirectPriorityQueue;
use super::NaturalOrder;
use crate::error::{check_bounds, CollectionError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Inverse-array entry of an index that is not enqueued.
pub const NOT_PRESENT: usize = usize::MAX;

/// Priority queue of distinct indices into `refs`.
///
/// An inverse array maps every reference index to its heap position, so
/// any enqueued index can be changed, removed or looked up in O(log n).
/// Each index is enqueued at most once; the capacity is `refs.len()`.
pub struct IndirectHeapPriorityQueue<'a, T, C = NaturalOrder<T>> {
    refs: &'a [T],
    heap: Vec<usize>,
    inv: Vec<usize>,
    cmp: C,
}

impl<'a, T: Ord> IndirectHeapPriorityQueue<'a, T> {
    /// Empty queue over `refs` in natural order.
    pub fn new(refs: &'a [T]) -> Self {
        Self::with_comparator(refs, T::cmp)
    }
}

impl<'a, T, C> IndirectHeapPriorityQueue<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Empty queue over `refs` ordered by `cmp`.
    pub fn with_comparator(refs: &'a [T], cmp: C) -> Self {
        Self {
            refs,
            heap: Vec::with_capacity(refs.len()),
            inv: vec![NOT_PRESENT; refs.len()],
            cmp,
        }
    }

    /// Queue holding `indices`, heapified in O(n). Fails without building
    /// anything if an index is out of range or repeated.
    pub fn from_indices(refs: &'a [T], indices: &[usize], cmp: C) -> Result<Self> {
        let mut queue = Self::with_comparator(refs, cmp);
        for (pos, &index) in indices.iter().enumerate() {
            check_bounds(index, refs.len())?;
            if queue.inv[index] != NOT_PRESENT {
                return Err(CollectionError::index_already_present(index));
            }
            queue.inv[index] = pos;
        }
        queue.heap.extend_from_slice(indices);
        make_heap(queue.refs, &mut queue.heap, &mut queue.inv, &queue.cmp);
        Ok(queue)
    }

    /// The borrowed reference slice.
    pub fn refs(&self) -> &'a [T] {
        self.refs
    }

    /// Heap position of `index`, if enqueued.
    fn position(&self, index: usize) -> Result<usize> {
        match self.inv.get(index) {
            Some(&pos) if pos != NOT_PRESENT => Ok(pos),
            _ => Err(CollectionError::index_not_present(index)),
        }
    }

    /// Calls `visit` with every index of the front.
    pub(crate) fn for_each_front<F: FnMut(usize)>(&self, visit: &mut F) {
        super::indirect::for_each_front(self.refs, &self.heap, &self.cmp, visit);
    }

    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        for (pos, &index) in self.heap.iter().enumerate() {
            assert_eq!(self.inv[index], pos, "inverse of index {}", index);
            if pos > 0 {
                let parent = self.heap[(pos - 1) / 2];
                assert_ne!(
                    (self.cmp)(&self.refs[parent], &self.refs[index]),
                    Ordering::Greater,
                    "heap order broken at position {}",
                    pos
                );
            }
        }
        let present = self.inv.iter().filter(|&&pos| pos != NOT_PRESENT).count();
        assert_eq!(present, self.heap.len());
    }
}

impl<T, C> IndirectPriorityQueue for IndirectHeapPriorityQueue<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn enqueue(&mut self, index: usize) -> Result<()> {
        check_bounds(index, self.refs.len())?;
        if self.inv[index] != NOT_PRESENT {
            return Err(CollectionError::index_already_present(index));
        }
        let pos = self.heap.len();
        self.heap.push(index);
        self.inv[index] = pos;
        up_heap(self.refs, &mut self.heap, &mut self.inv, pos, &self.cmp);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<usize> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }
        let result = self.heap.swap_remove(0);
        self.inv[result] = NOT_PRESENT;
        if !self.heap.is_empty() {
            self.inv[self.heap[0]] = 0;
            down_heap(self.refs, &mut self.heap, &mut self.inv, 0, &self.cmp);
        }
        Ok(result)
    }

    fn first(&self) -> Result<usize> {
        self.heap.first().copied().ok_or(CollectionError::Empty)
    }

    fn last(&self) -> Result<usize> {
        last(self.refs, &self.heap, &self.cmp).ok_or(CollectionError::Empty)
    }

    fn changed(&mut self) -> Result<()> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }
        down_heap(self.refs, &mut self.heap, &mut self.inv, 0, &self.cmp);
        Ok(())
    }

    fn changed_at(&mut self, index: usize) -> Result<()> {
        let pos = self.position(index)?;
        fix(self.refs, &mut self.heap, &mut self.inv, pos, &self.cmp);
        Ok(())
    }

    fn all_changed(&mut self) {
        log::debug!("rebuilding indirect heap of {} indices", self.heap.len());
        make_heap(self.refs, &mut self.heap, &mut self.inv, &self.cmp);
    }

    fn remove(&mut self, index: usize) -> Result<()> {
        let pos = self.position(index)?;
        self.inv[index] = NOT_PRESENT;
        self.heap.swap_remove(pos);
        if pos < self.heap.len() {
            self.inv[self.heap[pos]] = pos;
            fix(self.refs, &mut self.heap, &mut self.inv, pos, &self.cmp);
        }
        Ok(())
    }

    fn contains(&self, index: usize) -> bool {
        self.position(index).is_ok()
    }

    fn front(&self, out: &mut [usize]) -> Result<usize> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }
        front(self.refs, &self.heap, &self.cmp, out)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }

    fn clear(&mut self) {
        for &index in &self.heap {
            self.inv[index] = NOT_PRESENT;
        }
        self.heap.clear();
    }
}

impl<T, C> fmt::Debug for IndirectHeapPriorityQueue<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndirectHeapPriorityQueue")
            .field("heap", &self.heap)
            .finish_non_exhaustive()
    }
}
