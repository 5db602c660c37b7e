//! The interface shared by every indirect priority queue.

use crate::error::{CollectionError, Result};

/// A priority queue of indices into a borrowed reference slice, ordered by
/// the values they reference.
///
/// The queue never reads the values except through its comparator. When a
/// referenced value changes, the caller must report it with [`changed`] or
/// [`changed_at`] before the next queue operation.
///
/// [`changed`]: IndirectPriorityQueue::changed
/// [`changed_at`]: IndirectPriorityQueue::changed_at
pub trait IndirectPriorityQueue {
    /// Adds a reference index.
    fn enqueue(&mut self, index: usize) -> Result<()>;

    /// Removes and returns the index referencing a minimal value.
    fn dequeue(&mut self) -> Result<usize>;

    /// Index referencing a minimal value.
    fn first(&self) -> Result<usize>;

    /// Index referencing a maximal value. Linear in the queue size.
    fn last(&self) -> Result<usize>;

    /// Restores order after the value referenced by [`first`] changed.
    ///
    /// [`first`]: IndirectPriorityQueue::first
    fn changed(&mut self) -> Result<()>;

    /// Restores order after the value referenced by `index` changed.
    fn changed_at(&mut self, index: usize) -> Result<()> {
        let _ = index;
        Err(CollectionError::not_supported("changed_at"))
    }

    /// Rebuilds the queue after arbitrary changes to the referenced values.
    fn all_changed(&mut self);

    /// Removes `index` from the queue.
    fn remove(&mut self, index: usize) -> Result<()> {
        let _ = index;
        Err(CollectionError::not_supported("remove"))
    }

    /// Whether `index` is enqueued.
    fn contains(&self, index: usize) -> bool;

    /// Writes every index whose value ties [`first`] into `out` and returns
    /// how many were written. Order among them is unspecified.
    ///
    /// [`first`]: IndirectPriorityQueue::first
    fn front(&self, out: &mut [usize]) -> Result<usize>;

    /// Like [`front`], collecting into a vector.
    ///
    /// [`front`]: IndirectPriorityQueue::front
    fn front_vec(&self) -> Result<Vec<usize>> {
        let mut out = vec![0; self.len()];
        let n = self.front(&mut out)?;
        out.truncate(n);
        Ok(out)
    }

    /// Number of enqueued indices.
    fn len(&self) -> usize;

    /// Whether the queue is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every index.
    fn clear(&mut self);
}
