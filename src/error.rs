//! Error handling for the primcoll library
//!
//! Hash table misses are reported through `Option`/`bool` and never reach this
//! module. Errors here are caller-contract violations (empty queue access,
//! unknown queue index, bad arguments) plus configuration and I/O failures.

use thiserror::Error;

/// Main error type for the primcoll library
#[derive(Error, Debug)]
pub enum CollectionError {
    /// I/O related errors (configuration persistence)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Access to the first/last element of an empty structure
    #[error("Collection is empty")]
    Empty,

    /// `changed`/`remove` on an index that is not currently enqueued
    #[error("Index {index} is not present in the queue")]
    IndexNotPresent {
        /// The reference-array index
        index: usize,
    },

    /// `enqueue` of an index that is already enqueued
    #[error("Index {index} is already present in the queue")]
    IndexAlreadyPresent {
        /// The reference-array index
        index: usize,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Fixed-capacity structure is full
    #[error("Capacity exceeded: capacity {capacity}")]
    CapacityExceeded {
        /// The fixed capacity
        capacity: usize,
    },

    /// Invalid argument at a call boundary
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the rejected argument
        message: String,
    },

    /// Operation not supported by this variant
    #[error("Not supported: {feature}")]
    NotSupported {
        /// Description of the unsupported operation
        feature: String,
    },

    /// Configuration or parameter errors
    #[error("Invalid configuration: {message}")]
    Configuration {
        /// Configuration error message
        message: String,
    },
}

impl CollectionError {
    /// Create an index not present error
    pub fn index_not_present(index: usize) -> Self {
        Self::IndexNotPresent { index }
    }

    /// Create an index already present error
    pub fn index_already_present(index: usize) -> Self {
        Self::IndexAlreadyPresent { index }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create a capacity exceeded error
    pub fn capacity_exceeded(capacity: usize) -> Self {
        Self::CapacityExceeded { capacity }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a not supported error
    pub fn not_supported<S: Into<String>>(feature: S) -> Self {
        Self::NotSupported {
            feature: feature.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Whether the error reports a broken caller contract rather than an
    /// environmental failure
    pub fn is_contract_violation(&self) -> bool {
        match self {
            Self::Io(_) => false,
            Self::Configuration { .. } => false,
            Self::Empty => true,
            Self::IndexNotPresent { .. } => true,
            Self::IndexAlreadyPresent { .. } => true,
            Self::OutOfBounds { .. } => true,
            Self::CapacityExceeded { .. } => true,
            Self::InvalidArgument { .. } => true,
            Self::NotSupported { .. } => true,
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Empty => "empty",
            Self::IndexNotPresent { .. } => "index",
            Self::IndexAlreadyPresent { .. } => "index",
            Self::OutOfBounds { .. } => "bounds",
            Self::CapacityExceeded { .. } => "capacity",
            Self::InvalidArgument { .. } => "argument",
            Self::NotSupported { .. } => "unsupported",
            Self::Configuration { .. } => "config",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, CollectionError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(CollectionError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

/// Assert that a range is within bounds
#[inline]
pub fn check_range(start: usize, end: usize, size: usize) -> Result<()> {
    if start > end {
        return Err(CollectionError::invalid_argument(format!(
            "Invalid range: start {} > end {}",
            start, end
        )));
    }
    if end > size {
        return Err(CollectionError::out_of_bounds(end, size));
    }
    Ok(())
}
