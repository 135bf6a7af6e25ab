use super::{no_sort_key, Item, Query, QueryOutput, Store};
use crate::{
    config::TableConfig,
    error::{Error, Result},
};

use axum::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// In-memory table evaluating the same predicates as the real store.
#[derive(Debug)]
pub struct MockStore {
    config: TableConfig,
    items: Mutex<Vec<Item>>,
    queries: Mutex<Vec<Query>>,
    failure: Option<String>,
}

impl MockStore {
    pub fn new(config: TableConfig) -> Self {
        Self {
            config,
            items: Mutex::new(vec![]),
            queries: Mutex::new(vec![]),
            failure: None,
        }
    }

    /// Every operation fails with `message`.
    pub fn failing(config: TableConfig, message: &str) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new(config)
        }
    }

    pub fn with_items<I: IntoIterator<Item = Value>>(self, items: I) -> Self {
        {
            let mut stored = self.items.lock().unwrap();
            for value in items {
                match value {
                    Value::Object(item) => stored.push(item),
                    _ => panic!("item should be an object"),
                }
            }
        }
        self
    }

    pub fn items(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }

    pub fn queries(&self) -> Vec<Query> {
        self.queries.lock().unwrap().clone()
    }

    fn check(&self) -> Result<()> {
        match self.failure.as_ref() {
            Some(message) => Err(Error::StoreOperationFailed(message.clone())),
            None => Ok(()),
        }
    }

    fn same_key(&self, a: &Item, b: &Item) -> bool {
        let eq = |key: &str| a.get(key).is_some() && a.get(key) == b.get(key);
        eq(self.config.partition_key.as_str())
            && self.config.sort_key.as_deref().map(eq).unwrap_or(true)
    }

    fn position(&self, items: &[Item], item: &Item) -> Option<usize> {
        items.iter().position(|stored| self.same_key(stored, item))
    }

    fn sorted(&self, mut items: Vec<Item>) -> Vec<Item> {
        if let Some(sort_key) = self.config.sort_key.as_deref() {
            items.sort_by(|a, b| {
                let a = a.get(sort_key).and_then(Value::as_str);
                let b = b.get(sort_key).and_then(Value::as_str);
                a.cmp(&b)
            });
        }
        items
    }
}

#[async_trait]
impl Store for MockStore {
    fn config(&self) -> &TableConfig {
        &self.config
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.check()?;
        let mut items = self.items.lock().unwrap();
        match self.position(&items, &item) {
            Some(i) => items[i] = item,
            None => items.push(item),
        }
        Ok(())
    }

    async fn put_if_absent(&self, item: Item, partition_key: &str) -> Result<()> {
        self.check()?;
        assert_eq!(partition_key, self.config.partition_key);

        let mut items = self.items.lock().unwrap();
        match self.position(&items, &item) {
            Some(_) => Err(Error::ConditionalWriteRejected),
            None => {
                items.push(item);
                Ok(())
            }
        }
    }

    async fn put_if_exists(&self, item: Item, partition_key: &str) -> Result<()> {
        self.check()?;
        assert_eq!(partition_key, self.config.partition_key);

        let mut items = self.items.lock().unwrap();
        match self.position(&items, &item) {
            Some(i) => {
                items[i] = item;
                Ok(())
            }
            None => Err(Error::ConditionalWriteRejected),
        }
    }

    async fn delete_by_key(&self, partition_value: &str, sort_value: &str) -> Result<()> {
        self.check()?;
        let sort_key = self
            .config
            .sort_key
            .as_deref()
            .ok_or_else(|| no_sort_key(&self.config))?;

        let mut key = Item::new();
        key.insert(self.config.partition_key.clone(), partition_value.into());
        key.insert(sort_key.to_string(), sort_value.into());

        let mut items = self.items.lock().unwrap();
        items.retain(|stored| !self.same_key(stored, &key));
        Ok(())
    }

    async fn query(&self, query: Query) -> Result<QueryOutput> {
        self.queries.lock().unwrap().push(query.clone());
        self.check()?;

        let items = self.items.lock().unwrap();
        let scanned: Vec<Item> = items
            .iter()
            .filter(|item| {
                query.key.matches(item)
                    && query.sort.as_ref().map(|s| s.matches(item)).unwrap_or(true)
            })
            .cloned()
            .collect();
        let scanned_count = scanned.len();
        let matched = scanned
            .into_iter()
            .filter(|item| query.matches(item))
            .collect();

        Ok(QueryOutput::new(self.sorted(matched), scanned_count))
    }

    async fn scan_all(&self) -> Result<QueryOutput> {
        self.check()?;
        let items = self.items.lock().unwrap().clone();
        let scanned_count = items.len();
        Ok(QueryOutput::new(items, scanned_count))
    }
}
