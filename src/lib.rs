pub mod config;
pub mod error;
pub mod handler;
pub mod store;
pub mod validation;
pub mod web;

pub use config::{Config, TableConfig, TableProps};
pub use error::Error;
pub use store::{DynamodbStore, Store};
pub use web::{route, AppState};

pub const ENV_DYNAMODB_ENDPOINT_URL: &str = "DYNAMODB_ENDPOINT_URL";
pub const ENV_PORT: &str = "PORT";
pub const ENV_CONFIG_PATH: &str = "CONFIG_PATH";
pub const ENV_API_RESOURCE: &str = "API_RESOURCE";

pub const ENV_TABLE_NAME: &str = "TABLE_NAME";
pub const ENV_PARTITION_KEY: &str = "PARTITION_KEY";
pub const ENV_SORT_KEY: &str = "SORT_KEY";
pub const ENV_GSI_PARTITION_KEY: &str = "GSI_PARTITION_KEY";
