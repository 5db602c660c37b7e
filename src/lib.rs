//! # Primcoll: Primitive-Keyed Collections
//!
//! Hash maps, hash sets and indirect priority queues specialized for
//! primitive keys, without boxing or per-type source duplication.
//!
//! ## Key Features
//!
//! - **Open-Addressing Hash Tables**: linear probing over power-of-two
//!   tables, tombstone-free deletion by backward shift, and cursors that can
//!   remove while traversing
//! - **Every Primitive Key**: one generic engine monomorphized for integers,
//!   `char`, `bool` and floats (compared by bit pattern); zero is an ordinary
//!   key
//! - **Indirect Priority Queues**: heaps of indices into a borrowed slice,
//!   with O(log n) change notification and removal, and pruned retrieval of
//!   every index tied for first place
//! - **Configuration**: validated sizing parameters with presets,
//!   environment loading and JSON persistence
//!
//! ## Quick Start
//!
//! ```rust
//! use primcoll::{IndirectHeapPriorityQueue, IndirectPriorityQueue, IntOpenHashMap, LongOpenHashSet};
//!
//! # fn main() -> primcoll::Result<()> {
//! // Counting with a primitive-keyed map
//! let mut counts = IntOpenHashMap::<u32>::new();
//! for word_len in [3, 5, 3, 0, 3] {
//!     counts.add_to(word_len, 1);
//! }
//! assert_eq!(counts.get(3), Some(&3));
//! assert_eq!(counts.get(0), Some(&1));
//!
//! // Removing while traversing
//! let mut ids: LongOpenHashSet = (0..100).collect();
//! ids.retain(|id| id % 7 == 0);
//! assert_eq!(ids.len(), 15);
//!
//! // Priority queue over an external array
//! let distances = [7, 2, 9, 2];
//! let mut queue = IndirectHeapPriorityQueue::new(&distances);
//! for i in 0..distances.len() {
//!     queue.enqueue(i)?;
//! }
//! let mut tied = queue.front_vec()?;
//! tied.sort_unstable();
//! assert_eq!(tied, vec![1, 3]);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod hash;
pub mod heap;

// Re-export core types
pub use config::{Config, HashTableConfig};
pub use error::{CollectionError, Result};

pub use hash::{
    ByteOpenHashMap, ByteOpenHashSet, CharOpenHashMap, CharOpenHashSet, DoubleOpenHashMap,
    DoubleOpenHashSet, FloatOpenHashMap, FloatOpenHashSet, HashKey, Int2DoubleOpenHashMap,
    Int2IntOpenHashMap, IntOpenHashMap, IntOpenHashSet, Long2LongOpenHashMap, LongOpenHashMap,
    LongOpenHashSet, OpenHashMap, OpenHashSet, ShortOpenHashMap, ShortOpenHashSet,
};

pub use heap::{
    DoubleIndirectHeapPriorityQueue, IndirectHeapPriorityQueue, IndirectPriorityQueue,
    SemiIndirectHeapPriorityQueue,
};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_info() {
        assert!(!VERSION.is_empty());
        // Version should be semver format like "0.1.0"
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2);
    }

    #[test]
    fn test_re_exports() {
        let mut map = Int2IntOpenHashMap::new();
        map.insert(1, 2);
        let mut set = OpenHashSet::<u16>::new();
        set.insert(7);
        let refs = [1.5f64, 0.5];
        let mut queue =
            SemiIndirectHeapPriorityQueue::with_comparator(&refs, |a: &f64, b: &f64| a.total_cmp(b));
        queue.enqueue(0).unwrap();
        queue.enqueue(1).unwrap();

        assert_eq!(map.get(1), Some(&2));
        assert!(set.contains(7));
        assert_eq!(queue.first().unwrap(), 1);
        assert!(std::any::type_name::<Result<()>>().contains("CollectionError"));
    }
}
