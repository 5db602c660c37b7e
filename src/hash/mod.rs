//! Open-addressing hash maps and sets over primitive keys
//!
//! One engine serves every key type: [`OpenHashMap`] and [`OpenHashSet`] are
//! generic over a [`HashKey`], and the aliases below name the usual
//! per-primitive instantiations.
//!
//! - Linear probing over a power-of-two table
//! - Backward-shift deletion, no tombstones
//! - Growth when the fill exceeds the load factor, shrinking only on `trim`
//! - Removal during traversal through a cursor that revisits the freed slot
//!
//! Single-threaded by contract. A table shared between threads needs one
//! lock around the whole structure; rehashing and backward shifts span
//! several slots and are not atomic at a finer grain.

pub mod common;
mod map;
mod set;

pub use common::{
    array_size, max_fill, mix32, mix64, HashKey, DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR,
    FAST_LOAD_FACTOR, VERY_FAST_LOAD_FACTOR,
};
pub use map::{CursorMut, IntoIter, Iter, IterMut, Keys, OpenHashMap, Values, ValuesMut};
pub use set::{
    IntoIter as SetIntoIter, Iter as SetIter, OpenHashSet, SetCursor,
};

/// Map keyed by `i8`.
pub type ByteOpenHashMap<V> = OpenHashMap<i8, V>;
/// Map keyed by `i16`.
pub type ShortOpenHashMap<V> = OpenHashMap<i16, V>;
/// Map keyed by `i32`.
pub type IntOpenHashMap<V> = OpenHashMap<i32, V>;
/// Map keyed by `i64`.
pub type LongOpenHashMap<V> = OpenHashMap<i64, V>;
/// Map keyed by `char`.
pub type CharOpenHashMap<V> = OpenHashMap<char, V>;
/// Map keyed by `f32`, compared by bit pattern.
pub type FloatOpenHashMap<V> = OpenHashMap<f32, V>;
/// Map keyed by `f64`, compared by bit pattern.
pub type DoubleOpenHashMap<V> = OpenHashMap<f64, V>;

/// `i32` to `i32` map.
pub type Int2IntOpenHashMap = OpenHashMap<i32, i32>;
/// `i64` to `i64` map.
pub type Long2LongOpenHashMap = OpenHashMap<i64, i64>;
/// `i32` to `f64` map.
pub type Int2DoubleOpenHashMap = OpenHashMap<i32, f64>;

/// Set of `i8`.
pub type ByteOpenHashSet = OpenHashSet<i8>;
/// Set of `i16`.
pub type ShortOpenHashSet = OpenHashSet<i16>;
/// Set of `i32`.
pub type IntOpenHashSet = OpenHashSet<i32>;
/// Set of `i64`.
pub type LongOpenHashSet = OpenHashSet<i64>;
/// Set of `char`.
pub type CharOpenHashSet = OpenHashSet<char>;
/// Set of `f32`, compared by bit pattern.
pub type FloatOpenHashSet = OpenHashSet<f32>;
/// Set of `f64`, compared by bit pattern.
pub type DoubleOpenHashSet = OpenHashSet<f64>;
