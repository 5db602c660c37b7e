//! Indirect binary heaps
//!
//! The queues here hold indices into a caller-owned slice and order them by
//! the values they reference. The slice is borrowed for the lifetime of the
//! queue and never written to.
//!
//! - [`SemiIndirectHeapPriorityQueue`]: heap of indices only; duplicates
//!   allowed, only the first element can be reported as changed
//! - [`IndirectHeapPriorityQueue`]: adds an inverse array, so any enqueued
//!   index can be changed or removed in O(log n)
//! - [`DoubleIndirectHeapPriorityQueue`]: indirect queue with a secondary
//!   comparator that breaks ties within the front
//!
//! Values that change while enqueued are usually held in a `Cell`:
//!
//! ```rust
//! use primcoll::heap::{IndirectHeapPriorityQueue, IndirectPriorityQueue};
//! use std::cell::Cell;
//!
//! # fn main() -> primcoll::Result<()> {
//! let costs = [Cell::new(5), Cell::new(3), Cell::new(8)];
//! let mut queue =
//!     IndirectHeapPriorityQueue::with_comparator(&costs, |a: &Cell<i32>, b: &Cell<i32>| {
//!         a.get().cmp(&b.get())
//!     });
//! for i in 0..costs.len() {
//!     queue.enqueue(i)?;
//! }
//! costs[2].set(1);
//! queue.changed_at(2)?;
//! assert_eq!(queue.dequeue()?, 2);
//! # Ok(())
//! # }
//! ```

use std::cmp::Ordering;

mod double_queue;
pub mod indirect;
mod indirect_queue;
mod queue;
pub mod semi_indirect;
mod semi_indirect_queue;

pub use double_queue::DoubleIndirectHeapPriorityQueue;
pub use indirect_queue::{IndirectHeapPriorityQueue, NOT_PRESENT};
pub use queue::IndirectPriorityQueue;
pub use semi_indirect_queue::SemiIndirectHeapPriorityQueue;

/// Comparator type of queues built with natural order.
pub type NaturalOrder<T> = fn(&T, &T) -> Ordering;
