use crate::{ENV_API_RESOURCE, ENV_CONFIG_PATH, ENV_DYNAMODB_ENDPOINT_URL, ENV_PORT};

use anyhow::Result;
use std::env;

mod file;
mod table;

pub use file::{GsiProps, Operations, TableProps};
pub use table::TableConfig;

#[derive(Debug)]
pub struct Config {
    endpoint_url: Option<String>,
    port: u16,
    resource: String,
    props: TableProps,
}

impl Config {
    pub fn new() -> Result<Self> {
        let endpoint_url = env::var(ENV_DYNAMODB_ENDPOINT_URL).ok();
        let port = env::var(ENV_PORT)
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let resource = env::var(ENV_API_RESOURCE)
            .ok()
            .map(|r| r.trim_matches('/').to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| "holidays".to_string());

        let props = match env::var(ENV_CONFIG_PATH).ok().and_then(TableProps::from_file) {
            Some(props) => props,
            None => TableProps::from_table(&TableConfig::from_env()?),
        };

        Ok(Self {
            endpoint_url,
            port,
            resource,
            props,
        })
    }

    pub fn endpoint_url(&self) -> Option<String> {
        self.endpoint_url.clone()
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn props(&self) -> &TableProps {
        &self.props
    }

    pub fn table(&self) -> TableConfig {
        self.props.environment()
    }
}
