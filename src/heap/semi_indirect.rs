//! Heap primitives over a heap of indices into a reference slice.
//!
//! `heap` holds indices into `refs`; its length is the heap size. The
//! element at `heap[0]` references a minimal value under `cmp`. Nothing here
//! checks that indices are in range of `refs`; callers validate on entry.

use crate::error::{CollectionError, Result};
use std::cmp::Ordering;

#[inline]
fn parent(pos: usize) -> usize {
    (pos - 1) >> 1
}

#[inline]
fn left_child(pos: usize) -> usize {
    (pos << 1) + 1
}

/// Moves the element at `pos` toward the leaves until neither child is
/// smaller. Returns its final position.
pub fn down_heap<T, C>(refs: &[T], heap: &mut [usize], mut pos: usize, cmp: &C) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    let size = heap.len();
    debug_assert!(pos < size);
    let e = heap[pos];
    let e_ref = &refs[e];
    loop {
        let mut child = left_child(pos);
        if child >= size {
            break;
        }
        let right = child + 1;
        if right < size && cmp(&refs[heap[right]], &refs[heap[child]]) == Ordering::Less {
            child = right;
        }
        if cmp(e_ref, &refs[heap[child]]) != Ordering::Greater {
            break;
        }
        heap[pos] = heap[child];
        pos = child;
    }
    heap[pos] = e;
    pos
}

/// Moves the element at `pos` toward the root while it is smaller than its
/// parent. Returns its final position.
pub fn up_heap<T, C>(refs: &[T], heap: &mut [usize], mut pos: usize, cmp: &C) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    debug_assert!(pos < heap.len());
    let e = heap[pos];
    let e_ref = &refs[e];
    while pos != 0 {
        let p = parent(pos);
        if cmp(&refs[heap[p]], e_ref) != Ordering::Greater {
            break;
        }
        heap[pos] = heap[p];
        pos = p;
    }
    heap[pos] = e;
    pos
}

/// Arranges `heap` into heap order in O(n).
pub fn make_heap<T, C>(refs: &[T], heap: &mut [usize], cmp: &C)
where
    C: Fn(&T, &T) -> Ordering,
{
    for pos in (0..heap.len() / 2).rev() {
        down_heap(refs, heap, pos, cmp);
    }
}

/// Calls `visit` with every index whose referenced value ties the one at the
/// top of the heap.
///
/// Subtrees rooted at a strictly greater element are skipped: heap order
/// guarantees they hold no tie, so the walk costs O(k) comparisons for k
/// tied elements. The visiting order is unspecified.
pub fn for_each_front<T, C, F>(refs: &[T], heap: &[usize], cmp: &C, visit: &mut F)
where
    C: Fn(&T, &T) -> Ordering,
    F: FnMut(usize),
{
    if let Some(&top) = heap.first() {
        visit_tied(refs, heap, 0, &refs[top], cmp, visit);
    }
}

fn visit_tied<T, C, F>(refs: &[T], heap: &[usize], pos: usize, top: &T, cmp: &C, visit: &mut F)
where
    C: Fn(&T, &T) -> Ordering,
    F: FnMut(usize),
{
    if pos >= heap.len() || cmp(&refs[heap[pos]], top) != Ordering::Equal {
        return;
    }
    visit(heap[pos]);
    let child = left_child(pos);
    visit_tied(refs, heap, child, top, cmp, visit);
    visit_tied(refs, heap, child + 1, top, cmp, visit);
}

/// Writes the front of the heap into `out` and returns how many indices were
/// written. Fails with `OutOfBounds` if `out` is too short; its content is
/// then unspecified.
pub fn front<T, C>(refs: &[T], heap: &[usize], cmp: &C, out: &mut [usize]) -> Result<usize>
where
    C: Fn(&T, &T) -> Ordering,
{
    let mut count = 0;
    let mut overflow = false;
    for_each_front(refs, heap, cmp, &mut |index| {
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

/// Index referencing a maximal value. Only leaves can hold the maximum, so
/// the scan covers the second half of the heap.
pub fn last<T, C>(refs: &[T], heap: &[usize], cmp: &C) -> Option<usize>
where
    C: Fn(&T, &T) -> Ordering,
{
    heap[heap.len() / 2..]
        .iter()
        .copied()
        .max_by(|&a, &b| cmp(&refs[a], &refs[b]))
}
