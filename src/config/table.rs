use crate::{ENV_GSI_PARTITION_KEY, ENV_PARTITION_KEY, ENV_SORT_KEY, ENV_TABLE_NAME};

use anyhow::Result;
use std::env;

/// Key names of the single table every handler works against.
///
/// The attribute names arrive as configuration rather than being hard-coded, so
/// query parameters and conditional writes are always looked up through this
/// struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableConfig {
    pub table_name: String,
    pub partition_key: String,
    pub sort_key: Option<String>,
    pub gsi_partition_key: Option<String>,
    pub gsi_sort_key: Option<String>,
    pub gsi_index_name: Option<String>,
}

impl TableConfig {
    pub fn new<T, P>(table_name: T, partition_key: P) -> Self
    where
        T: Into<String>,
        P: Into<String>,
    {
        Self {
            table_name: table_name.into(),
            partition_key: partition_key.into(),
            sort_key: None,
            gsi_partition_key: None,
            gsi_sort_key: None,
            gsi_index_name: None,
        }
    }

    pub fn sort_key<S: Into<String>>(self, sort_key: S) -> Self {
        Self {
            sort_key: non_empty(sort_key.into()),
            ..self
        }
    }

    pub fn gsi_partition_key<S: Into<String>>(self, key: S) -> Self {
        Self {
            gsi_partition_key: non_empty(key.into()),
            ..self
        }
    }

    pub fn gsi_sort_key<S: Into<String>>(self, key: S) -> Self {
        Self {
            gsi_sort_key: non_empty(key.into()),
            ..self
        }
    }

    pub fn gsi_index_name<S: Into<String>>(self, name: S) -> Self {
        Self {
            gsi_index_name: non_empty(name.into()),
            ..self
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .and_then(non_empty)
                .ok_or_else(|| anyhow::anyhow!("env {key} is required"))
        };

        let sort_key = lookup(ENV_SORT_KEY).and_then(non_empty);
        let gsi_partition_key = lookup(ENV_GSI_PARTITION_KEY).and_then(non_empty);

        // An index provisioned from env alone is sorted by the table's sort key.
        Ok(Self {
            table_name: required(ENV_TABLE_NAME)?,
            partition_key: required(ENV_PARTITION_KEY)?,
            gsi_sort_key: gsi_partition_key.as_ref().and(sort_key.clone()),
            gsi_partition_key,
            gsi_index_name: None,
            sort_key,
        })
    }

    /// Name of the secondary index. Defaults to `GSI_<index key>`.
    pub fn index_name(&self) -> Option<String> {
        let key = self.gsi_partition_key.as_ref()?;
        Some(
            self.gsi_index_name
                .clone()
                .unwrap_or_else(|| format!("GSI_{key}")),
        )
    }

    /// Whether the index is sorted by the same attribute as the table, so a
    /// sort-key prefix can narrow an index query too.
    pub fn index_shares_sort_key(&self) -> bool {
        self.sort_key.is_some() && self.gsi_sort_key == self.sort_key
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn it_reads_every_key_name() {
        let config = TableConfig::from_lookup(lookup(&[
            ("TABLE_NAME", "Holiday"),
            ("PARTITION_KEY", "State"),
            ("SORT_KEY", "SK"),
            ("GSI_PARTITION_KEY", "Type"),
        ]))
        .unwrap();

        assert_eq!(
            config,
            TableConfig::new("Holiday", "State")
                .sort_key("SK")
                .gsi_partition_key("Type")
                .gsi_sort_key("SK")
        );
        assert_eq!(config.index_name(), Some("GSI_Type".to_string()));
        assert!(config.index_shares_sort_key());
    }

    #[test]
    fn it_prefers_a_declared_index_name() {
        let config = TableConfig::new("Holiday", "State")
            .gsi_partition_key("Type")
            .gsi_index_name("ByType");
        assert_eq!(config.index_name().as_deref(), Some("ByType"));

        let config = TableConfig::new("Holiday", "State").gsi_index_name("ByType");
        assert!(config.index_name().is_none());
    }

    #[test]
    fn it_compares_index_and_table_sort_keys() {
        let table = TableConfig::new("Holiday", "State")
            .sort_key("SK")
            .gsi_partition_key("Type");
        assert!(!table.index_shares_sort_key());
        assert!(!table.clone().gsi_sort_key("StartDate").index_shares_sort_key());
        assert!(table.gsi_sort_key("SK").index_shares_sort_key());

        let unsorted = TableConfig::new("Holiday", "State").gsi_partition_key("Type");
        assert!(!unsorted.index_shares_sort_key());
    }

    #[test]
    fn it_treats_empty_optional_keys_as_unset() {
        let config = TableConfig::from_lookup(lookup(&[
            ("TABLE_NAME", "Holiday"),
            ("PARTITION_KEY", "State"),
            ("SORT_KEY", ""),
            ("GSI_PARTITION_KEY", ""),
        ]))
        .unwrap();

        assert!(config.sort_key.is_none());
        assert!(config.gsi_partition_key.is_none());
        assert!(config.gsi_sort_key.is_none());
        assert!(config.index_name().is_none());
    }

    #[test]
    fn it_requires_table_name_and_partition_key() {
        let result = TableConfig::from_lookup(lookup(&[("TABLE_NAME", "Holiday")]));
        assert!(result.is_err());
        assert_eq!(
            format!("{}", result.unwrap_err()),
            "env PARTITION_KEY is required"
        );

        let result = TableConfig::from_lookup(lookup(&[("PARTITION_KEY", "State")]));
        assert!(result.is_err());
    }
}
