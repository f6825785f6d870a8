//! # visitor-counter - A Serverless Visitor Counter
//!
//! Every invocation atomically adds one to a counter record in a DynamoDB
//! table and returns the updated count as a JSON HTTP response, ready for an
//! API Gateway proxy integration.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Lambda process                             │
//! │                                                                   │
//! │  ┌─────────────┐    ┌─────────────────┐    ┌──────────────────┐   │
//! │  │   Lambda    │───>│ CounterHandler  │───>│  CounterStore    │   │
//! │  │  runtime    │    │                 │    │  (DynamoStore)   │   │
//! │  └─────────────┘    └────────┬────────┘    └────────┬─────────┘   │
//! │         ▲                    │                      │             │
//! │         │                    ▼                      ▼             │
//! │         │           ┌─────────────────┐     UpdateItem ADD        │
//! │         └───────────│ResponseEnvelope │     (DynamoDB table)      │
//! │                     └─────────────────┘                           │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store client is built once at startup and shared by every
//! invocation. Nothing else is kept between calls.
//!
//! ## Response
//!
//! ```text
//! 200
//! Access-Control-Allow-Origin: *
//! Content-Type: application/json
//!
//! {"visitors": "43"}
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use visitor_counter::{CounterConfig, CounterHandler, DynamoStore};
//! use lambda_runtime::service_fn;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), lambda_runtime::Error> {
//!     let config = CounterConfig::from_env()?;
//!     let handler = Arc::new(CounterHandler::new(DynamoStore::connect(&config).await));
//!
//!     lambda_runtime::run(service_fn(move |event| {
//!         let handler = Arc::clone(&handler);
//!         async move { handler.invoke(event).await }
//!     }))
//!     .await
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: table location, with defaults and environment overrides
//! - [`store`]: the atomic-add seam and its DynamoDB and in-memory implementations
//! - [`handler`]: the counter handler and the response envelope

pub mod config;
pub mod handler;
pub mod store;

// Re-export commonly used types for convenience
pub use config::{ConfigError, CounterConfig};
pub use handler::{CounterHandler, HandlerError, ResponseEnvelope};
pub use store::{CounterStore, DynamoStore, MemoryStore, StoreError};

/// Version of visitor-counter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
