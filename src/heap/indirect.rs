//! Heap primitives that keep an inverse array in sync.
//!
//! Same layout as [`semi_indirect`](super::semi_indirect), plus `inv`:
//! `inv[heap[pos]] == pos` for every position of the heap. `inv` is indexed
//! by reference index and must cover every index stored in `heap`.

use std::cmp::Ordering;

pub use super::semi_indirect::{for_each_front, front, last};

/// Moves the element at `pos` toward the leaves, updating `inv`. Returns
/// its final position.
pub fn down_heap<T, C>(
    refs: &[T],
    heap: &mut [usize],
    inv: &mut [usize],
    mut pos: usize,
    cmp: &C,
) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    let size = heap.len();
    debug_assert!(pos < size);
    let e = heap[pos];
    let e_ref = &refs[e];
    loop {
        let mut child = (pos << 1) + 1;
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
        inv[heap[pos]] = pos;
        pos = child;
    }
    heap[pos] = e;
    inv[e] = pos;
    pos
}

/// Moves the element at `pos` toward the root, updating `inv`. Returns its
/// final position.
pub fn up_heap<T, C>(
    refs: &[T],
    heap: &mut [usize],
    inv: &mut [usize],
    mut pos: usize,
    cmp: &C,
) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    debug_assert!(pos < heap.len());
    let e = heap[pos];
    let e_ref = &refs[e];
    while pos != 0 {
        let parent = (pos - 1) >> 1;
        if cmp(&refs[heap[parent]], e_ref) != Ordering::Greater {
            break;
        }
        heap[pos] = heap[parent];
        inv[heap[pos]] = pos;
        pos = parent;
    }
    heap[pos] = e;
    inv[e] = pos;
    pos
}

/// Arranges `heap` into heap order in O(n) and rebuilds `inv` for its
/// elements.
pub fn make_heap<T, C>(refs: &[T], heap: &mut [usize], inv: &mut [usize], cmp: &C)
where
    C: Fn(&T, &T) -> Ordering,
{
    for (pos, &index) in heap.iter().enumerate() {
        inv[index] = pos;
    }
    for pos in (0..heap.len() / 2).rev() {
        down_heap(refs, heap, inv, pos, cmp);
    }
}

/// Restores heap order around `pos` after the value it references moved in
/// either direction. Returns the final position.
pub fn fix<T, C>(refs: &[T], heap: &mut [usize], inv: &mut [usize], pos: usize, cmp: &C) -> usize
where
    C: Fn(&T, &T) -> Ordering,
{
    let pos = up_heap(refs, heap, inv, pos, cmp);
    down_heap(refs, heap, inv, pos, cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natural(a: &i32, b: &i32) -> Ordering {
        a.cmp(b)
    }

    fn assert_consistent(refs: &[i32], heap: &[usize], inv: &[usize]) {
        for (pos, &index) in heap.iter().enumerate() {
            assert_eq!(inv[index], pos, "inverse of index {}", index);
            if pos > 0 {
                assert!(refs[heap[(pos - 1) / 2]] <= refs[index]);
            }
        }
    }

    #[test]
    fn test_make_heap_sets_inverse() {
        let refs = [6, 2, 9, 4, 0, 7, 1];
        let mut heap: Vec<usize> = (0..refs.len()).rev().collect();
        let mut inv = vec![usize::MAX; refs.len()];
        make_heap(&refs, &mut heap, &mut inv, &natural);
        assert_consistent(&refs, &heap, &inv);
        assert_eq!(heap[0], 4);
    }

    #[test]
    fn test_fix_in_both_directions() {
        let mut refs = [6, 2, 9, 4, 0, 7, 1];
        let mut heap: Vec<usize> = (0..refs.len()).collect();
        let mut inv = vec![usize::MAX; refs.len()];
        make_heap(&refs, &mut heap, &mut inv, &natural);

        refs[2] = -1;
        let at = inv[2];
        let pos = fix(&refs, &mut heap, &mut inv, at, &natural);
        assert_eq!(pos, 0);
        assert_consistent(&refs, &heap, &inv);

        refs[2] = 100;
        let at = inv[2];
        fix(&refs, &mut heap, &mut inv, at, &natural);
        assert_consistent(&refs, &heap, &inv);
        assert_eq!(heap[0], 4);
    }

    #[test]
    fn test_partial_heap() {
        let refs = [3, 1, 2, 0];
        let mut heap = vec![2, 0];
        let mut inv = vec![usize::MAX; refs.len()];
        make_heap(&refs, &mut heap, &mut inv, &natural);
        assert_consistent(&refs, &heap, &inv);
        assert_eq!(inv[1], usize::MAX);
        assert_eq!(inv[3], usize::MAX);
        assert_eq!(heap[0], 2);
    }
}
