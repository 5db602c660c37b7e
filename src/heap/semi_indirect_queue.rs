//! Semi-indirect heap priority queue.

use super::queue::IndirectPriorityQueue;
use super::semi_indirect::{down_heap, front, last, make_heap, up_heap};
use super::NaturalOrder;
use crate::error::{check_bounds, CollectionError, Result};
use std::cmp::Ordering;
use std::fmt;

/// Priority queue of indices into `refs`, kept as a plain binary heap.
///
/// Without an inverse array the queue cannot locate an arbitrary index:
/// only the first element can be reported as changed, `remove` and
/// `changed_at` are not supported, and `contains` is a linear scan. In
/// exchange the same index may be enqueued more than once.
///
/// The heap array is allocated once; the queue holds at most `capacity`
/// indices.
pub struct SemiIndirectHeapPriorityQueue<'a, T, C = NaturalOrder<T>> {
    refs: &'a [T],
    heap: Vec<usize>,
    capacity: usize,
    cmp: C,
}

impl<'a, T: Ord> SemiIndirectHeapPriorityQueue<'a, T> {
    /// Empty queue over `refs` in natural order, with capacity `refs.len()`.
    pub fn new(refs: &'a [T]) -> Self {
        Self::with_comparator(refs, T::cmp)
    }

    /// Empty queue over `refs` in natural order with a fixed capacity.
    pub fn with_capacity(refs: &'a [T], capacity: usize) -> Self {
        Self::with_capacity_and_comparator(refs, capacity, T::cmp)
    }
}

impl<'a, T, C> SemiIndirectHeapPriorityQueue<'a, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Empty queue over `refs` ordered by `cmp`, with capacity `refs.len()`.
    pub fn with_comparator(refs: &'a [T], cmp: C) -> Self {
        Self::with_capacity_and_comparator(refs, refs.len(), cmp)
    }

    /// Empty queue over `refs` ordered by `cmp` with a fixed capacity.
    pub fn with_capacity_and_comparator(refs: &'a [T], capacity: usize, cmp: C) -> Self {
        Self {
            refs,
            heap: Vec::with_capacity(capacity),
            capacity,
            cmp,
        }
    }

    /// Queue holding `indices`, heapified in O(n). The capacity is the
    /// larger of `refs.len()` and `indices.len()`.
    pub fn from_indices(refs: &'a [T], indices: &[usize], cmp: C) -> Result<Self> {
        for &index in indices {
            check_bounds(index, refs.len())?;
        }
        let capacity = refs.len().max(indices.len());
        let mut heap = Vec::with_capacity(capacity);
        heap.extend_from_slice(indices);
        make_heap(refs, &mut heap, &cmp);
        Ok(Self {
            refs,
            heap,
            capacity,
            cmp,
        })
    }

    /// Maximum number of enqueued indices.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The borrowed reference slice.
    pub fn refs(&self) -> &'a [T] {
        self.refs
    }
}

impl<T, C> IndirectPriorityQueue for SemiIndirectHeapPriorityQueue<'_, T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    fn enqueue(&mut self, index: usize) -> Result<()> {
        check_bounds(index, self.refs.len())?;
        if self.heap.len() == self.capacity {
            return Err(CollectionError::capacity_exceeded(self.capacity));
        }
        self.heap.push(index);
        let pos = self.heap.len() - 1;
        up_heap(self.refs, &mut self.heap, pos, &self.cmp);
        Ok(())
    }

    fn dequeue(&mut self) -> Result<usize> {
        if self.heap.is_empty() {
            return Err(CollectionError::Empty);
        }
        let result = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            down_heap(self.refs, &mut self.heap, 0, &self.cmp);
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
        down_heap(self.refs, &mut self.heap, 0, &self.cmp);
        Ok(())
    }

    fn all_changed(&mut self) {
        log::debug!("rebuilding semi-indirect heap of {} indices", self.heap.len());
        make_heap(self.refs, &mut self.heap, &self.cmp);
    }

    fn contains(&self, index: usize) -> bool {
        self.heap.contains(&index)
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
        self.heap.clear();
    }
}

impl<T, C> fmt::Debug for SemiIndirectHeapPriorityQueue<'_, T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SemiIndirectHeapPriorityQueue")
            .field("heap", &self.heap)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn drain<Q: IndirectPriorityQueue>(queue: &mut Q) -> Vec<usize> {
        let mut out = Vec::new();
        while let Ok(index) = queue.dequeue() {
            out.push(index);
        }
        out
    }

    #[test]
    fn test_natural_order() {
        let refs = [30, 10, 50, 20, 40];
        let mut queue = SemiIndirectHeapPriorityQueue::new(&refs);
        for i in 0..refs.len() {
            queue.enqueue(i).unwrap();
        }
        assert_eq!(queue.len(), 5);
        assert_eq!(queue.first().unwrap(), 1);
        assert_eq!(queue.last().unwrap(), 2);
        assert_eq!(drain(&mut queue), vec![1, 3, 0, 4, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_custom_comparator() {
        let refs = ["pear", "fig", "banana", "kiwi"];
        let mut queue =
            SemiIndirectHeapPriorityQueue::with_comparator(&refs, |a: &&str, b: &&str| {
                b.len().cmp(&a.len())
            });
        for i in 0..refs.len() {
            queue.enqueue(i).unwrap();
        }
        assert_eq!(queue.dequeue().unwrap(), 2);
        assert_eq!(queue.last().unwrap(), 1);
    }

    #[test]
    fn test_empty_queue_errors() {
        let refs = [1, 2, 3];
        let mut queue = SemiIndirectHeapPriorityQueue::new(&refs);
        assert!(matches!(queue.dequeue(), Err(CollectionError::Empty)));
        assert!(matches!(queue.first(), Err(CollectionError::Empty)));
        assert!(matches!(queue.last(), Err(CollectionError::Empty)));
        assert!(matches!(queue.changed(), Err(CollectionError::Empty)));
        let mut out = [0; 3];
        assert!(matches!(queue.front(&mut out), Err(CollectionError::Empty)));
    }

    #[test]
    fn test_capacity_and_bounds() {
        let refs = [1, 2, 3];
        let mut queue = SemiIndirectHeapPriorityQueue::with_capacity(&refs, 2);
        assert_eq!(queue.capacity(), 2);
        queue.enqueue(0).unwrap();
        queue.enqueue(0).unwrap();
        assert!(matches!(
            queue.enqueue(1),
            Err(CollectionError::CapacityExceeded { capacity: 2 })
        ));
        queue.clear();
        assert!(matches!(
            queue.enqueue(3),
            Err(CollectionError::OutOfBounds { index: 3, size: 3 })
        ));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_duplicates() {
        let refs = [2, 1];
        let mut queue = SemiIndirectHeapPriorityQueue::with_capacity(&refs, 4);
        for i in [0, 1, 0, 1] {
            queue.enqueue(i).unwrap();
        }
        assert_eq!(drain(&mut queue), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_changed_first() {
        let refs = [Cell::new(1), Cell::new(2), Cell::new(3)];
        let mut queue =
            SemiIndirectHeapPriorityQueue::with_comparator(&refs, |a: &Cell<i32>, b: &Cell<i32>| {
                a.get().cmp(&b.get())
            });
        for i in 0..refs.len() {
            queue.enqueue(i).unwrap();
        }
        refs[0].set(10);
        queue.changed().unwrap();
        assert_eq!(queue.first().unwrap(), 1);
        assert!(matches!(
            queue.changed_at(1),
            Err(CollectionError::NotSupported { .. })
        ));
        assert!(matches!(
            queue.remove(1),
            Err(CollectionError::NotSupported { .. })
        ));
        assert_eq!(drain(&mut queue), vec![1, 2, 0]);
    }

    #[test]
    fn test_all_changed() {
        let refs = [Cell::new(1), Cell::new(2), Cell::new(3), Cell::new(4)];
        let mut queue =
            SemiIndirectHeapPriorityQueue::with_comparator(&refs, |a: &Cell<i32>, b: &Cell<i32>| {
                a.get().cmp(&b.get())
            });
        for i in 0..refs.len() {
            queue.enqueue(i).unwrap();
        }
        for (i, cell) in refs.iter().enumerate() {
            cell.set(-(i as i32));
        }
        queue.all_changed();
        assert_eq!(drain(&mut queue), vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_from_indices() {
        let refs = [5, 4, 3, 2, 1];
        let mut queue =
            SemiIndirectHeapPriorityQueue::from_indices(&refs, &[0, 2, 4, 2], i32::cmp).unwrap();
        assert_eq!(queue.len(), 4);
        assert!(queue.contains(2));
        assert!(!queue.contains(1));
        assert_eq!(drain(&mut queue), vec![4, 2, 2, 0]);

        assert!(SemiIndirectHeapPriorityQueue::from_indices(&refs, &[5], i32::cmp).is_err());
    }

    #[test]
    fn test_front() {
        let refs = [2, 0, 1, 0, 0];
        let mut queue = SemiIndirectHeapPriorityQueue::new(&refs);
        for i in 0..refs.len() {
            queue.enqueue(i).unwrap();
        }
        let mut front = queue.front_vec().unwrap();
        front.sort_unstable();
        assert_eq!(front, vec![1, 3, 4]);

        let mut out = [0; 2];
        assert!(matches!(
            queue.front(&mut out),
            Err(CollectionError::OutOfBounds { .. })
        ));
    }
}
