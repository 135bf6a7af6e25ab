mod attribute;
mod dynamodb;
mod expression;
#[cfg(test)]
mod mock;
mod query;

use crate::{
    config::TableConfig,
    error::{Error, Result},
};

use axum::async_trait;
use serde::Serialize;
use serde_json::{Map, Value};

pub use dynamodb::{DynamodbStore, DynamodbStoreBuilder};
pub use expression::Expression;
#[cfg(test)]
pub use mock::MockStore;
pub use query::{BeginsWith, DateSubstring, KeyEquals, Query, END_DATE, START_DATE};

/// A stored record: free-form attributes keyed by name.
pub type Item = Map<String, Value>;

/// Result of a query or scan, in the store's response shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct QueryOutput {
    pub items: Vec<Item>,
    pub count: usize,
    pub scanned_count: usize,
}

impl QueryOutput {
    pub fn new(items: Vec<Item>, scanned_count: usize) -> Self {
        Self {
            count: items.len(),
            items,
            scanned_count,
        }
    }

    pub fn append(&mut self, mut other: QueryOutput) {
        self.items.append(&mut other.items);
        self.count = self.items.len();
        self.scanned_count += other.scanned_count;
    }
}

/// Operations against the single table described by [`Store::config`].
///
/// `put_if_absent` and `put_if_exists` must evaluate their precondition and
/// the write as one atomic operation at the store.
#[async_trait]
pub trait Store: Send + Sync {
    fn config(&self) -> &TableConfig;

    async fn put(&self, item: Item) -> Result<()>;

    /// Fails with [`Error::ConditionalWriteRejected`] if an item with the
    /// same primary key exists.
    async fn put_if_absent(&self, item: Item, partition_key: &str) -> Result<()>;

    /// Fails with [`Error::ConditionalWriteRejected`] unless an item with
    /// the same primary key exists. Replaces it entirely.
    async fn put_if_exists(&self, item: Item, partition_key: &str) -> Result<()>;

    async fn delete_by_key(&self, partition_value: &str, sort_value: &str) -> Result<()>;

    async fn query(&self, query: Query) -> Result<QueryOutput>;

    async fn scan_all(&self) -> Result<QueryOutput>;

    async fn query_by_partition(
        &self,
        partition_value: &str,
        filter: Option<DateSubstring>,
    ) -> Result<QueryOutput> {
        let key = KeyEquals::new(self.config().partition_key.as_str(), partition_value);
        self.query(Query::new(key).filter(filter)).await
    }

    async fn query_by_partition_and_sort_prefix(
        &self,
        partition_value: &str,
        sort_prefix: &str,
        filter: Option<DateSubstring>,
    ) -> Result<QueryOutput> {
        let key = KeyEquals::new(self.config().partition_key.as_str(), partition_value);
        let query = Query::new(key)
            .sort(self.sort_prefix(sort_prefix)?)
            .filter(filter);
        self.query(query).await
    }

    async fn query_by_index(
        &self,
        index_name: &str,
        index_value: &str,
        filter: Option<DateSubstring>,
    ) -> Result<QueryOutput> {
        let key = KeyEquals::new(self.index_key()?, index_value);
        self.query(Query::new(key).index(index_name).filter(filter))
            .await
    }

    async fn query_by_index_and_sort_prefix(
        &self,
        index_name: &str,
        index_value: &str,
        sort_prefix: &str,
        filter: Option<DateSubstring>,
    ) -> Result<QueryOutput> {
        let key = KeyEquals::new(self.index_key()?, index_value);
        // Only an index sorted by the table's sort key can take the prefix.
        let sort = if self.config().index_shares_sort_key() {
            self.sort_prefix(sort_prefix)?
        } else {
            None
        };
        let query = Query::new(key).index(index_name).sort(sort).filter(filter);
        self.query(query).await
    }

    fn index_key(&self) -> Result<&str> {
        self.config()
            .gsi_partition_key
            .as_deref()
            .ok_or(Error::MissingQueryConfiguration)
    }

    fn sort_prefix(&self, prefix: &str) -> Result<Option<BeginsWith>> {
        self.config()
            .sort_key
            .as_deref()
            .map(|sort_key| Some(BeginsWith::new(sort_key, prefix)))
            .ok_or_else(|| no_sort_key(self.config()))
    }
}

pub(crate) fn no_sort_key(config: &TableConfig) -> Error {
    Error::StoreOperationFailed(format!("table {} has no sort key", config.table_name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_output_serializes_in_store_shape() {
        let item = match json!({ "State": "BY" }) {
            Value::Object(map) => map,
            _ => unreachable!(),
        };
        let output = QueryOutput::new(vec![item], 3);

        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            json!({
                "Items": [{ "State": "BY" }],
                "Count": 1,
                "ScannedCount": 3,
            })
        );
    }

    #[tokio::test]
    async fn put_replaces_unconditionally() {
        let config = TableConfig::new("Holiday", "State").sort_key("SK");
        let store = MockStore::new(config);

        for name in ["first", "second"] {
            let item = match json!({ "State": "BY", "SK": "2024", "Name": name }) {
                Value::Object(map) => map,
                _ => unreachable!(),
            };
            store.put(item).await.unwrap();
        }

        let items = store.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get("Name"), Some(&json!("second")));
    }

    #[tokio::test]
    async fn index_queries_need_a_configured_index_key() {
        let store = MockStore::new(TableConfig::new("Holiday", "State").sort_key("SK"));

        let result = store.query_by_index("GSI_Type", "school", None).await;
        assert!(matches!(result, Err(Error::MissingQueryConfiguration)));
        assert!(store.queries().is_empty());
    }

    #[tokio::test]
    async fn sort_prefix_queries_need_a_sort_key() {
        let store = MockStore::new(TableConfig::new("Holiday", "State"));

        let result = store
            .query_by_partition_and_sort_prefix("BY", "2024", None)
            .await;
        assert!(matches!(result, Err(Error::StoreOperationFailed(_))));
    }

    #[tokio::test]
    async fn index_sort_prefix_needs_an_index_sorted_like_the_table() {
        let table = TableConfig::new("Holiday", "State")
            .sort_key("SK")
            .gsi_partition_key("Type");

        for config in [table.clone(), table.gsi_sort_key("StartDate")] {
            let store = MockStore::new(config);
            store
                .query_by_index_and_sort_prefix(
                    "GSI_Type",
                    "school",
                    "2024",
                    Some(DateSubstring::new("2024")),
                )
                .await
                .unwrap();

            let query = &store.queries()[0];
            assert_eq!(query.index_name.as_deref(), Some("GSI_Type"));
            assert!(query.sort.is_none());
            assert!(query.filter.is_some());
        }
    }

    #[test]
    fn query_output_appends_pages() {
        let mut output = QueryOutput::new(vec![Item::new()], 2);
        output.append(QueryOutput::new(vec![Item::new(), Item::new()], 5));

        assert_eq!(output.count, 3);
        assert_eq!(output.scanned_count, 7);
    }
}
