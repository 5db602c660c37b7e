//! Shared pieces of the open-addressing engine: the key capability trait,
//! the mixing functions that turn a key into a probe start, and the table
//! sizing rules.

use crate::error::{CollectionError, Result};
use std::fmt;

/// The initial number of expected elements when none is given.
pub const DEFAULT_INITIAL_SIZE: usize = 16;

/// The default load factor of a hash table.
pub const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// A load factor trading memory for shorter probe sequences.
pub const FAST_LOAD_FACTOR: f32 = 0.5;

/// A load factor for tables where lookups dominate everything else.
pub const VERY_FAST_LOAD_FACTOR: f32 = 0.25;

/// Table length for [`DEFAULT_INITIAL_SIZE`] at [`DEFAULT_LOAD_FACTOR`].
pub(crate) const DEFAULT_TABLE_SIZE: usize = 32;

/// Largest table length `array_size` will hand out.
const MAX_ARRAY_SIZE: usize = 1 << (usize::BITS - 2);

/// 2^32 divided by the golden ratio.
pub const INT_PHI: u32 = 0x9E37_79B9;

/// 2^64 divided by the golden ratio.
pub const LONG_PHI: u64 = 0x9E37_79B9_7F4A_7C15;

/// Scrambles the bits of a 32-bit value so that the low bits depend on all
/// input bits. Bijective.
#[inline]
pub fn mix32(x: u32) -> u32 {
    let h = x.wrapping_mul(INT_PHI);
    h ^ (h >> 16)
}

/// 64-bit counterpart of [`mix32`].
#[inline]
pub fn mix64(x: u64) -> u64 {
    let mut h = x.wrapping_mul(LONG_PHI);
    h ^= h >> 32;
    h ^ (h >> 16)
}

/// Capability a primitive type needs to act as an open-addressing key.
///
/// `hash_mix` must be consistent with `key_eq`: equal keys mix to the same
/// value. The table masks the result, so only the low bits have to be good.
pub trait HashKey: Copy + fmt::Debug {
    /// Mixed hash of the key; the probe sequence starts at `hash_mix() & mask`.
    fn hash_mix(self) -> usize;

    /// Key equality as seen by the table.
    fn key_eq(self, other: Self) -> bool;
}

macro_rules! impl_hash_key_32 {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                #[inline]
                fn hash_mix(self) -> usize {
                    mix32(self as u32) as usize
                }

                #[inline]
                fn key_eq(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

macro_rules! impl_hash_key_64 {
    ($($t:ty),*) => {
        $(
            impl HashKey for $t {
                #[inline]
                fn hash_mix(self) -> usize {
                    mix64(self as u64) as usize
                }

                #[inline]
                fn key_eq(self, other: Self) -> bool {
                    self == other
                }
            }
        )*
    };
}

impl_hash_key_32!(i8, i16, i32, u8, u16, u32, char, bool);
impl_hash_key_64!(i64, u64, isize, usize);

// Floats are keyed by bit pattern with every NaN collapsed to one value, so
// NaN finds itself and 0.0 and -0.0 stay distinct keys.
impl HashKey for f32 {
    #[inline]
    fn hash_mix(self) -> usize {
        mix32(canonical_f32_bits(self)) as usize
    }

    #[inline]
    fn key_eq(self, other: Self) -> bool {
        canonical_f32_bits(self) == canonical_f32_bits(other)
    }
}

impl HashKey for f64 {
    #[inline]
    fn hash_mix(self) -> usize {
        mix64(canonical_f64_bits(self)) as usize
    }

    #[inline]
    fn key_eq(self, other: Self) -> bool {
        canonical_f64_bits(self) == canonical_f64_bits(other)
    }
}

#[inline]
fn canonical_f32_bits(x: f32) -> u32 {
    if x.is_nan() {
        f32::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

#[inline]
fn canonical_f64_bits(x: f64) -> u64 {
    if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

/// Rejects load factors outside the open interval (0, 1).
pub fn check_load_factor(load_factor: f32) -> Result<()> {
    if !load_factor.is_finite() || load_factor <= 0.0 || load_factor >= 1.0 {
        return Err(CollectionError::invalid_argument(format!(
            "load factor must be greater than 0 and smaller than 1, got {}",
            load_factor
        )));
    }
    Ok(())
}

/// Smallest power-of-two table length (at least 2) that keeps `expected`
/// elements at or below `load_factor`.
pub fn array_size(expected: usize, load_factor: f32) -> Result<usize> {
    let needed = (expected as f64 / load_factor as f64).ceil();
    if !needed.is_finite() || needed > MAX_ARRAY_SIZE as f64 {
        return Err(CollectionError::invalid_argument(format!(
            "too large ({} expected elements with load factor {})",
            expected, load_factor
        )));
    }
    Ok((needed as usize).max(2).next_power_of_two())
}

/// Number of occupied slots a table of length `n` may hold, always leaving
/// at least one slot free so probing terminates.
pub fn max_fill(n: usize, load_factor: f32) -> usize {
    let fill = (n as f64 * load_factor as f64).ceil() as usize;
    fill.min(n - 1)
}
