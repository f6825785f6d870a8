//! Invocation Handling
//!
//! - `counter`: the [`CounterHandler`] that turns an invocation into one atomic add
//! - `response`: the [`ResponseEnvelope`] returned to the gateway

pub mod counter;
pub mod response;

pub use counter::{CounterHandler, HandlerError, VISIT_INCREMENT};
pub use response::{to_spaced_json, ResponseEnvelope};
