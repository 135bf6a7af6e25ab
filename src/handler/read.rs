use super::{param, Params};
use crate::{
    config::TableConfig,
    error::{Error, Result},
    store::{DateSubstring, QueryOutput},
    web::{AppState, Reply},
};

use tracing::{error, info};

/// How a read request is answered, decided by which key values it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy<'a> {
    /// No query parameters at all.
    Scan,
    /// Exact partition key.
    Partition { value: &'a str },
    /// Exact partition key, sort key prefix, date substring.
    PartitionAndSort { value: &'a str, sort: &'a str },
    /// Exact secondary index key, optionally refined like `PartitionAndSort`.
    Index {
        index_name: String,
        value: &'a str,
        sort: Option<&'a str>,
    },
}

impl<'a> Strategy<'a> {
    pub fn resolve(config: &TableConfig, params: &'a Params) -> Result<Self> {
        if params.is_empty() {
            return Ok(Self::Scan);
        }

        let sort = config
            .sort_key
            .as_deref()
            .and_then(|sort_key| param(params, sort_key));

        if let Some(value) = param(params, &config.partition_key) {
            return Ok(match sort {
                Some(sort) => Self::PartitionAndSort { value, sort },
                None => Self::Partition { value },
            });
        }

        let (index_key, index_name) = config
            .gsi_partition_key
            .as_deref()
            .zip(config.index_name())
            .ok_or(Error::MissingQueryConfiguration)?;
        let value = param(params, index_key)
            .ok_or_else(|| Error::MissingQueryParameter(index_key.to_string()))?;

        Ok(Self::Index {
            index_name,
            value,
            sort,
        })
    }
}

/// Answers with the serialized query result. Errors end up in the body with
/// status 200.
pub async fn handle(state: &AppState, params: &Params) -> Reply {
    match read(state, params).await {
        Ok(output) => match serde_json::to_string(&output) {
            Ok(body) => Reply::json(body),
            Err(err) => {
                error!("{err}");
                Reply::ok(format!("{err}"))
            }
        },
        Err(err) => {
            error!("{err}");
            Reply::ok(format!("{err}"))
        }
    }
}

async fn read(state: &AppState, params: &Params) -> Result<QueryOutput> {
    let strategy = Strategy::resolve(state.config(), params)?;
    info!("{:?}", strategy);

    let store = state.store();
    match strategy {
        Strategy::Scan => store.scan_all().await,
        Strategy::Partition { value } => store.query_by_partition(value, None).await,
        Strategy::PartitionAndSort { value, sort } => {
            store
                .query_by_partition_and_sort_prefix(value, sort, Some(DateSubstring::new(sort)))
                .await
        }
        Strategy::Index {
            index_name,
            value,
            sort: None,
        } => store.query_by_index(&index_name, value, None).await,
        Strategy::Index {
            index_name,
            value,
            sort: Some(sort),
        } => {
            store
                .query_by_index_and_sort_prefix(
                    &index_name,
                    value,
                    sort,
                    Some(DateSubstring::new(sort)),
                )
                .await
        }
    }
}
