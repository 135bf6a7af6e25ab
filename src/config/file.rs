use super::table::{non_empty, TableConfig};

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;
use validator::Validate;

/// Declaration of the table, its secondary index and the operations served
/// against it.
#[derive(Debug, Clone, Deserialize, PartialEq, Validate)]
pub struct TableProps {
    #[validate(length(min = 1, max = 255))]
    pub table_name: String,
    #[validate(length(min = 1, max = 255))]
    pub partition_key: String,
    #[validate(length(min = 1, max = 255))]
    pub sort_key: Option<String>,
    #[validate]
    pub gsi: Option<GsiProps>,
    #[serde(default)]
    pub operations: Operations,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Validate)]
pub struct GsiProps {
    #[validate(length(min = 1, max = 255))]
    pub index_name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub partition_key: String,
    #[validate(length(min = 1, max = 255))]
    pub sort_key: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct Operations {
    #[serde(default = "enabled")]
    pub create: bool,
    #[serde(default = "enabled")]
    pub read: bool,
    #[serde(default = "enabled")]
    pub update: bool,
    #[serde(default = "enabled")]
    pub delete: bool,
}

fn enabled() -> bool {
    true
}

impl Default for Operations {
    fn default() -> Self {
        Self {
            create: true,
            read: true,
            update: true,
            delete: true,
        }
    }
}

impl TableProps {
    /// Reads the declaration from a yaml file. Returns `None` (after logging
    /// why) if the file cannot be used.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Option<Self> {
        read_props(path)
            .map_err(|err| {
                warn!("{err}");
                warn!("Skip reading config file.");
            })
            .ok()
    }

    /// Every operation enabled.
    pub fn from_table(config: &TableConfig) -> Self {
        Self {
            table_name: config.table_name.clone(),
            partition_key: config.partition_key.clone(),
            sort_key: config.sort_key.clone(),
            gsi: config.gsi_partition_key.as_ref().map(|key| GsiProps {
                index_name: config.gsi_index_name.clone(),
                partition_key: key.clone(),
                sort_key: config.gsi_sort_key.clone(),
            }),
            operations: Operations::default(),
        }
    }

    /// The key names handed to each handler.
    pub fn environment(&self) -> TableConfig {
        let gsi = self
            .gsi
            .as_ref()
            .filter(|gsi| !gsi.partition_key.is_empty());

        TableConfig {
            table_name: self.table_name.clone(),
            partition_key: self.partition_key.clone(),
            sort_key: self.sort_key.clone().and_then(non_empty),
            gsi_partition_key: gsi.map(|gsi| gsi.partition_key.clone()),
            gsi_sort_key: gsi.and_then(|gsi| gsi.sort_key.clone()).and_then(non_empty),
            gsi_index_name: gsi.and_then(|gsi| gsi.index_name.clone()).and_then(non_empty),
        }
    }
}

fn read_props<P: AsRef<Path>>(path: P) -> Result<TableProps, String> {
    let content = fs::read_to_string(&path)
        .map_err(|err| format!("Failed to read: {}. {err}", path.as_ref().to_string_lossy()))?;
    let props: TableProps = serde_yaml::from_str(&content)
        .map_err(|err| format!("Failed to deserialize config file: {err}"))?;
    props
        .validate()
        .map_err(|err| format!("Invalid config file: {err}"))?;
    Ok(props)
}
