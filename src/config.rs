//! Counter Configuration
//!
//! Every parameter that locates the counter record lives here: the AWS region,
//! the table, the partition-key attribute and value that identify the record,
//! and the attribute that holds the count.
//!
//! The defaults reproduce the deployment this function was written for. They
//! can be changed programmatically before the store is built, or overridden
//! from the environment at startup:
//!
//! | Option              | Environment variable     | Default                  |
//! |---------------------|--------------------------|--------------------------|
//! | `region`            | `COUNTER_REGION`         | `us-east-1`              |
//! | `table_name`        | `COUNTER_TABLE_NAME`     | `cloud-resume-challenge` |
//! | `key_attribute`     | `COUNTER_KEY_ATTRIBUTE`  | `ID`                     |
//! | `key_name`          | `COUNTER_KEY_NAME`       | `visitors`               |
//! | `counter_attribute` | `COUNTER_ATTRIBUTE`      | `visitors`               |
//! | `endpoint_url`      | `COUNTER_ENDPOINT_URL`   | unset                    |
//!
//! ## Example
//!
//! ```
//! use visitor_counter::config::CounterConfig;
//!
//! let config = CounterConfig::default()
//!     .with_table_name("resume-stats")
//!     .with_region("eu-west-1");
//!
//! assert_eq!(config.table_name, "resume-stats");
//! assert_eq!(config.key_name, "visitors");
//! ```

/// Region the table lives in.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Table holding the counter record.
pub const DEFAULT_TABLE_NAME: &str = "cloud-resume-challenge";

/// Partition-key attribute of the table.
pub const DEFAULT_KEY_ATTRIBUTE: &str = "ID";

/// Partition-key value identifying the counter record.
pub const DEFAULT_KEY_NAME: &str = "visitors";

/// Numeric attribute incremented on every visit.
pub const DEFAULT_COUNTER_ATTRIBUTE: &str = "visitors";

pub const ENV_REGION: &str = "COUNTER_REGION";
pub const ENV_TABLE_NAME: &str = "COUNTER_TABLE_NAME";
pub const ENV_KEY_ATTRIBUTE: &str = "COUNTER_KEY_ATTRIBUTE";
pub const ENV_KEY_NAME: &str = "COUNTER_KEY_NAME";
pub const ENV_COUNTER_ATTRIBUTE: &str = "COUNTER_ATTRIBUTE";
pub const ENV_ENDPOINT_URL: &str = "COUNTER_ENDPOINT_URL";

/// Errors raised while reading configuration.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable was present but blank
    #[error("{0} is set but empty")]
    Empty(&'static str),
}

/// Location of the counter record and how to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterConfig {
    /// AWS region of the table
    pub region: String,
    /// Target table identifier
    pub table_name: String,
    /// Name of the partition-key attribute
    pub key_attribute: String,
    /// Record identity (value of the partition key)
    pub key_name: String,
    /// Attribute that holds the count
    pub counter_attribute: String,
    /// Custom endpoint, for DynamoDB Local or LocalStack
    pub endpoint_url: Option<String>,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            table_name: DEFAULT_TABLE_NAME.to_string(),
            key_attribute: DEFAULT_KEY_ATTRIBUTE.to_string(),
            key_name: DEFAULT_KEY_NAME.to_string(),
            counter_attribute: DEFAULT_COUNTER_ATTRIBUTE.to_string(),
            endpoint_url: None,
        }
    }
}

impl CounterConfig {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Variables the lookup does not know keep their default. A variable that
    /// resolves to an empty (or all-whitespace) string is rejected rather than
    /// silently producing a table or key named `""`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let read = |name: &'static str| -> Result<Option<String>, ConfigError> {
            match lookup(name) {
                Some(value) if value.trim().is_empty() => Err(ConfigError::Empty(name)),
                Some(value) => Ok(Some(value.trim().to_string())),
                None => Ok(None),
            }
        };

        if let Some(region) = read(ENV_REGION)? {
            config.region = region;
        }
        if let Some(table_name) = read(ENV_TABLE_NAME)? {
            config.table_name = table_name;
        }
        if let Some(key_attribute) = read(ENV_KEY_ATTRIBUTE)? {
            config.key_attribute = key_attribute;
        }
        if let Some(key_name) = read(ENV_KEY_NAME)? {
            config.key_name = key_name;
        }
        if let Some(counter_attribute) = read(ENV_COUNTER_ATTRIBUTE)? {
            config.counter_attribute = counter_attribute;
        }
        config.endpoint_url = read(ENV_ENDPOINT_URL)?;

        Ok(config)
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    pub fn with_table_name(mut self, table_name: impl Into<String>) -> Self {
        self.table_name = table_name.into();
        self
    }

    pub fn with_key_attribute(mut self, key_attribute: impl Into<String>) -> Self {
        self.key_attribute = key_attribute.into();
        self
    }

    pub fn with_key_name(mut self, key_name: impl Into<String>) -> Self {
        self.key_name = key_name.into();
        self
    }

    pub fn with_counter_attribute(mut self, counter_attribute: impl Into<String>) -> Self {
        self.counter_attribute = counter_attribute.into();
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }
}
