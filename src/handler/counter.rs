//! Counter Handler
//!
//! One invocation, one atomic add:
//!
//! ```text
//! invocation ──> store.add(1) ──> updated value ──> {"visitors": "<value>"} ──> 200
//! ```
//!
//! The invocation payload and context are accepted but never looked at. Store
//! failures are not caught: they are returned as-is and the Lambda runtime
//! reports them as an invocation error.

use crate::handler::response::ResponseEnvelope;
use crate::store::{CounterStore, StoreError};
use lambda_runtime::{Context, LambdaEvent};
use serde_json::Value;
use tracing::{debug, info};

/// Amount added to the counter per visit.
pub const VISIT_INCREMENT: i64 = 1;

/// Errors returned by [`CounterHandler::handle`].
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// The store call failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The response body could not be encoded
    #[error("failed to encode response body: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Counts a visit per invocation.
///
/// The store is created once per process and shared by every invocation.
///
/// # Example
///
/// ```
/// use lambda_runtime::Context;
/// use visitor_counter::handler::CounterHandler;
/// use visitor_counter::store::MemoryStore;
///
/// # tokio_test::block_on(async {
/// let handler = CounterHandler::new(MemoryStore::new());
///
/// let response = handler
///     .handle(&serde_json::Value::Null, &Context::default())
///     .await
///     .unwrap();
/// assert_eq!(response.body, r#"{"visitors": "1"}"#);
/// # });
/// ```
#[derive(Debug)]
pub struct CounterHandler<S> {
    store: S,
}

impl<S: CounterStore> CounterHandler<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds one visit and reports the updated count.
    pub async fn handle(
        &self,
        _event: &Value,
        _context: &Context,
    ) -> Result<ResponseEnvelope, HandlerError> {
        let visitors = self.store.add(VISIT_INCREMENT).await?;
        info!(visitors, "Visit counted");

        Ok(ResponseEnvelope::visitors(visitors)?)
    }

    /// Adapter for `lambda_runtime::service_fn`. Passes the event through
    /// untouched; the runtime already tags its own logs with the request id.
    pub async fn invoke(
        &self,
        event: LambdaEvent<Value>,
    ) -> Result<ResponseEnvelope, lambda_runtime::Error> {
        debug!("Invocation received");

        Ok(self.handle(&event.payload, &event.context).await?)
    }
}
