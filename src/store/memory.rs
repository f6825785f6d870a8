//! In-Process Counter Table
//!
//! A thread-safe stand-in for the remote table, used for local runs, tests and
//! benchmarks. It stores records as maps of numeric attributes and supports
//! the same atomic add the DynamoDB store relies on.
//!
//! ## Concurrency Model
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       MemoryStore                           │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐           │
//! │  │ Shard 0 │ │ Shard 1 │ │ Shard 2 │ │ Shard N │           │
//! │  │ RwLock  │ │ RwLock  │ │ RwLock  │ │ RwLock  │           │
//! │  │ HashMap │ │ HashMap │ │ HashMap │ │ HashMap │           │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Record keys are distributed across shards by hash. An add holds the write
//! lock of its record's shard for the read-modify-write, which is what makes
//! it atomic with respect to other adds on the same record.

use crate::config::CounterConfig;
use crate::store::{CounterStore, StoreError};
use std::collections::HashMap;
use std::future::Future;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::{PoisonError, RwLock};

/// Number of shards for the store.
const NUM_SHARDS: usize = 16;

/// A record: attribute name to value.
type Record = HashMap<String, Value>;

/// A stored attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A number, the only thing an add accepts
    Number(i64),
    /// Anything else
    Text(String),
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

#[derive(Debug, Default)]
struct Shard {
    records: RwLock<HashMap<String, Record>>,
}

/// Sharded in-memory table with atomic adds.
///
/// # Example
///
/// ```
/// use visitor_counter::store::MemoryStore;
///
/// let store = MemoryStore::new();
///
/// assert_eq!(store.add_to("visitors", "visitors", 1).unwrap(), 1);
/// assert_eq!(store.add_to("visitors", "visitors", 1).unwrap(), 2);
/// assert_eq!(store.get("visitors", "visitors"), Some(2));
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    shards: Vec<Shard>,

    /// Record the `CounterStore` impl adds to
    key_name: String,

    /// Attribute the `CounterStore` impl adds to
    counter_attribute: String,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Creates an empty store whose counter is the default `visitors` record.
    pub fn new() -> Self {
        Self::from_config(&CounterConfig::default())
    }

    /// Creates an empty store whose counter is the record named by `config`.
    pub fn from_config(config: &CounterConfig) -> Self {
        Self {
            shards: (0..NUM_SHARDS).map(|_| Shard::default()).collect(),
            key_name: config.key_name.clone(),
            counter_attribute: config.counter_attribute.clone(),
        }
    }

    #[inline]
    fn shard(&self, key: &str) -> &Shard {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        &self.shards[(hasher.finish() as usize) % NUM_SHARDS]
    }

    /// Atomically adds `delta` to `attribute` of record `key`.
    ///
    /// A missing record or attribute starts at zero. Returns the updated value.
    /// A failed add changes nothing.
    pub fn add_to(&self, key: &str, attribute: &str, delta: i64) -> Result<i64, StoreError> {
        let mut records = self
            .shard(key)
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let current = match records.get(key).and_then(|record| record.get(attribute)) {
            Some(Value::Number(n)) => *n,
            Some(Value::Text(text)) => {
                return Err(StoreError::NotANumber {
                    attribute: attribute.to_string(),
                    value: text.clone(),
                })
            }
            None => 0,
        };

        let updated = current.checked_add(delta).ok_or(StoreError::Overflow)?;
        records
            .entry(key.to_string())
            .or_default()
            .insert(attribute.to_string(), Value::Number(updated));

        Ok(updated)
    }

    /// Reads a numeric attribute, or `None` if the record, the attribute, or a
    /// number is missing.
    pub fn get(&self, key: &str, attribute: &str) -> Option<i64> {
        let records = self
            .shard(key)
            .records
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        match records.get(key)?.get(attribute)? {
            Value::Number(n) => Some(*n),
            Value::Text(_) => None,
        }
    }

    /// Overwrites an attribute, creating the record if needed.
    pub fn set(&self, key: &str, attribute: &str, value: impl Into<Value>) {
        let mut records = self
            .shard(key)
            .records
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        records
            .entry(key.to_string())
            .or_default()
            .insert(attribute.to_string(), value.into());
    }
}

impl CounterStore for MemoryStore {
    fn add(&self, delta: i64) -> impl Future<Output = Result<i64, StoreError>> + Send {
        let result = self.add_to(&self.key_name, &self.counter_attribute, delta);
        async move { result }
    }
}
