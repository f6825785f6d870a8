//! DynamoDB Counter Store
//!
//! The production store. Each add is a single `UpdateItem` call:
//!
//! ```text
//! UpdateItem
//!   TableName:                 <table_name>
//!   Key:                       { <key_attribute>: S(<key_name>) }
//!   UpdateExpression:          ADD #counter :delta
//!   ExpressionAttributeNames:  { #counter: <counter_attribute> }
//!   ExpressionAttributeValues: { :delta: N(<delta>) }
//!   ReturnValues:              UPDATED_NEW
//! ```
//!
//! `ADD` is applied atomically by DynamoDB, so concurrent invocations never
//! lose an increment. If the record does not exist yet, DynamoDB creates it
//! with the counter set to `delta`.
//!
//! The SDK client is built once per process and reused by every invocation.
//! Its retries are disabled: `ADD` is not idempotent, and a retried request
//! whose first attempt already landed would count the visit twice. Each add is
//! exactly one request.

use crate::config::CounterConfig;
use crate::store::{CounterStore, StoreError};
use aws_config::retry::RetryConfig;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use std::future::Future;
use tracing::{debug, error};

/// Placeholder for the counter attribute name in the update expression.
const COUNTER_PLACEHOLDER: &str = "#counter";

/// Placeholder for the delta in the update expression.
const DELTA_PLACEHOLDER: &str = ":delta";

/// A counter stored in a DynamoDB table.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: Client,
    table_name: String,
    key_attribute: String,
    key_name: String,
    counter_attribute: String,
}

impl DynamoStore {
    /// Wraps an existing SDK client as-is, including its retry policy.
    pub fn new(client: Client, config: &CounterConfig) -> Self {
        Self {
            client,
            table_name: config.table_name.clone(),
            key_attribute: config.key_attribute.clone(),
            key_name: config.key_name.clone(),
            counter_attribute: config.counter_attribute.clone(),
        }
    }

    /// Loads AWS credentials for the configured region (and endpoint, if any)
    /// and builds a store around a fresh client.
    pub async fn connect(config: &CounterConfig) -> Self {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

        if let Some(endpoint_url) = &config.endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;
        Self::from_sdk_config(&sdk_config, config)
    }

    /// Builds a store around a client that sends each add exactly once.
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: &CounterConfig) -> Self {
        let client_config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .retry_config(RetryConfig::disabled())
            .build();

        Self::new(Client::from_conf(client_config), config)
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn update(&self, delta: i64) -> Result<i64, StoreError> {
        debug!(
            table = %self.table_name,
            key = %self.key_name,
            delta,
            "Adding to counter"
        );

        let output = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(&self.key_attribute, AttributeValue::S(self.key_name.clone()))
            .update_expression(format!("ADD {COUNTER_PLACEHOLDER} {DELTA_PLACEHOLDER}"))
            .expression_attribute_names(COUNTER_PLACEHOLDER, &self.counter_attribute)
            .expression_attribute_values(DELTA_PLACEHOLDER, AttributeValue::N(delta.to_string()))
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(|e| {
                error!(table = %self.table_name, "UpdateItem failed: {}", DisplayErrorContext(&e));
                StoreError::Request(DisplayErrorContext(&e).to_string())
            })?;

        updated_value(output.attributes(), &self.counter_attribute)
    }
}

impl CounterStore for DynamoStore {
    fn add(&self, delta: i64) -> impl Future<Output = Result<i64, StoreError>> + Send {
        self.update(delta)
    }
}

/// Extracts the post-update counter from an `UPDATED_NEW` attribute map.
fn updated_value(
    attributes: Option<&HashMap<String, AttributeValue>>,
    attribute: &str,
) -> Result<i64, StoreError> {
    let value = attributes
        .and_then(|attrs| attrs.get(attribute))
        .ok_or_else(|| StoreError::MissingAttribute(attribute.to_string()))?;

    let number = value.as_n().map_err(|other| StoreError::NotANumber {
        attribute: attribute.to_string(),
        value: format!("{other:?}"),
    })?;

    number.parse::<i64>().map_err(|_| StoreError::NotANumber {
        attribute: attribute.to_string(),
        value: number.clone(),
    })
}
