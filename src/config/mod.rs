//! Configuration APIs for primcoll
//!
//! Configuration types share the [`Config`] trait: validation, initialization
//! from environment variables, presets for typical workloads, and JSON file
//! persistence.
//!
//! # Preset Configurations
//!
//! ```rust
//! use primcoll::config::{Config, HashTableConfig};
//!
//! // Short probe sequences at the cost of memory
//! let config = HashTableConfig::performance_preset();
//! assert!(config.validate().is_ok());
//!
//! // Dense tables
//! let config = HashTableConfig::memory_preset();
//! assert!(config.load_factor > 0.75);
//! ```
//!
//! # Environment Initialization
//!
//! ```rust
//! use primcoll::config::{Config, HashTableConfig};
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads PRIMCOLL_HASH_INITIAL_CAPACITY and PRIMCOLL_HASH_LOAD_FACTOR
//! let config = HashTableConfig::from_env()?;
//!
//! // Custom prefix
//! let config = HashTableConfig::from_env_with_prefix("MYAPP_")?;
//! # Ok(())
//! # }
//! ```

use crate::error::Result;
use std::env;
use std::fmt;
use std::path::Path;

pub mod hash_table;

pub use hash_table::HashTableConfig;

/// Common configuration trait providing validation, environment initialization,
/// and preset management functionality.
pub trait Config: Clone + fmt::Debug {
    /// Validate the configuration for correctness and consistency.
    fn validate(&self) -> Result<()>;

    /// Initialize configuration from environment variables.
    ///
    /// Environment variables use the format `PRIMCOLL_{COMPONENT}_{FIELD}`,
    /// for example `PRIMCOLL_HASH_LOAD_FACTOR=0.5`. Unset or unparsable
    /// variables keep their default values.
    fn from_env() -> Result<Self>
    where
        Self: Default,
    {
        Self::from_env_with_prefix("PRIMCOLL_")
    }

    /// Initialize configuration from environment variables with a custom prefix.
    fn from_env_with_prefix(prefix: &str) -> Result<Self>
    where
        Self: Default;

    /// Preset favoring speed over memory.
    fn performance_preset() -> Self;

    /// Preset favoring memory over speed.
    fn memory_preset() -> Self;

    /// Preset favoring predictable latency: avoids work on the first
    /// operations rather than amortizing it.
    fn realtime_preset() -> Self;

    /// Balanced preset, identical to the default.
    fn balanced_preset() -> Self
    where
        Self: Default,
    {
        Self::default()
    }

    /// Save configuration to a JSON file.
    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()>;

    /// Load and validate configuration from a JSON file.
    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self>;
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or does not parse.
pub fn parse_env_var<T>(var_name: &str, default: T) -> T
where
    T: std::str::FromStr + Clone,
{
    env::var(var_name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}
