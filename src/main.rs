//! visitor-counter - Lambda entry point
//!
//! Sets up logging, reads the configuration, builds the DynamoDB client once
//! for the lifetime of the process, then hands invocations to the handler.

use lambda_runtime::service_fn;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use visitor_counter::{CounterConfig, CounterHandler, DynamoStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging. CloudWatch stamps every line, so no timestamps or colors.
    FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(false)
        .without_time()
        .init();

    let config = CounterConfig::from_env()?;
    info!(
        version = visitor_counter::VERSION,
        region = %config.region,
        table = %config.table_name,
        key = %config.key_name,
        "Starting visitor counter"
    );

    // One client per process, shared by every invocation
    let store = DynamoStore::connect(&config).await;
    let handler = Arc::new(CounterHandler::new(store));

    lambda_runtime::run(service_fn(move |event| {
        let handler = Arc::clone(&handler);
        async move { handler.invoke(event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))?;

    info!("Runtime loop exited");
    Ok(())
}
