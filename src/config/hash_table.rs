//! Hash table sizing configuration.

use super::{parse_env_var, Config};
use crate::error::{CollectionError, Result};
use crate::hash::common::{
    array_size, check_load_factor, DEFAULT_INITIAL_SIZE, DEFAULT_LOAD_FACTOR, FAST_LOAD_FACTOR,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sizing parameters of an open-addressing table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HashTableConfig {
    /// Number of elements the table should hold without rehashing
    pub initial_capacity: usize,
    /// Fill ratio above which the table grows, in (0, 1)
    pub load_factor: f32,
}

impl Default for HashTableConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_SIZE,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl HashTableConfig {
    /// Table length this configuration allocates.
    pub fn table_size(&self) -> Result<usize> {
        check_load_factor(self.load_factor)?;
        array_size(self.initial_capacity, self.load_factor)
    }
}

impl Config for HashTableConfig {
    fn validate(&self) -> Result<()> {
        self.table_size()
            .map(|_| ())
            .map_err(|e| CollectionError::configuration(e.to_string()))
    }

    fn from_env_with_prefix(prefix: &str) -> Result<Self> {
        let mut config = Self::default();
        config.initial_capacity = parse_env_var(
            &format!("{}HASH_INITIAL_CAPACITY", prefix),
            config.initial_capacity,
        );
        config.load_factor =
            parse_env_var(&format!("{}HASH_LOAD_FACTOR", prefix), config.load_factor);
        config.validate()?;
        Ok(config)
    }

    fn performance_preset() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_SIZE,
            load_factor: FAST_LOAD_FACTOR,
        }
    }

    fn memory_preset() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_SIZE,
            load_factor: 0.9,
        }
    }

    fn realtime_preset() -> Self {
        Self {
            initial_capacity: 1024,
            load_factor: FAST_LOAD_FACTOR,
        }
    }

    fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self).map_err(|e| {
            CollectionError::configuration(format!("Failed to serialize hash table config: {}", e))
        })?;
        std::fs::write(path, serialized)?;
        Ok(())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            CollectionError::configuration(format!("Failed to parse hash table config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
