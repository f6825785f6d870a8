//! Counter Store Module
//!
//! This module defines the one primitive the handler needs from a key-value
//! table: an atomic add on a numeric attribute that returns the updated value.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │ CounterHandler  │
//! └────────┬────────┘
//!          │ add(1)
//!          ▼
//! ┌─────────────────────────────────────────────┐
//! │            CounterStore (trait)             │
//! └──────────┬───────────────────────┬──────────┘
//!            │                       │
//!            ▼                       ▼
//! ┌────────────────────┐   ┌────────────────────┐
//! │    DynamoStore     │   │    MemoryStore     │
//! │ UpdateItem + ADD   │   │ sharded RwLock map │
//! └────────────────────┘   └────────────────────┘
//! ```
//!
//! Both implementations create the record on first use: adding to a missing
//! record or attribute starts from zero, the way DynamoDB's `ADD` action does.
//!
//! Atomicity is the store's job. The handler issues a single add per
//! invocation and never retries it.

pub mod dynamo;
pub mod memory;

pub use dynamo::DynamoStore;
pub use memory::MemoryStore;

use std::future::Future;

/// Errors returned by a counter store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The remote call itself failed (network, permissions, missing table, throttling)
    #[error("store request failed: {0}")]
    Request(String),

    /// The response carried no updated value for the counter
    #[error("response is missing attribute '{0}'")]
    MissingAttribute(String),

    /// The counter attribute holds something other than an integer
    #[error("attribute '{attribute}' is not an integer: {value}")]
    NotANumber { attribute: String, value: String },

    /// The add would overflow the counter
    #[error("increment would overflow")]
    Overflow,
}

/// An atomic counter living in a key-value table.
///
/// Implementations are shared by every invocation in the process, so they
/// must be `Send + Sync`, and the returned future must be `Send`.
pub trait CounterStore: Send + Sync {
    /// Atomically adds `delta` to the counter and returns the updated value.
    fn add(&self, delta: i64) -> impl Future<Output = Result<i64, StoreError>> + Send;
}

impl<S: CounterStore> CounterStore for std::sync::Arc<S> {
    fn add(&self, delta: i64) -> impl Future<Output = Result<i64, StoreError>> + Send {
        (**self).add(delta)
    }
}
