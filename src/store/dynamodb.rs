use super::{
    attribute::{from_attributes, into_attribute, into_attributes},
    no_sort_key, Expression, Item, Query, QueryOutput, Store,
};
use crate::{
    config::TableConfig,
    error::{Error, Result},
};

use aws_sdk_dynamodb::{
    config::Builder as DbConfigBuilder,
    error::{DisplayErrorContext, SdkError},
    operation::put_item::PutItemError,
    types::AttributeValue,
    Client as DbClient,
};
use axum::async_trait;
use std::collections::HashMap;

type Key = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamodbStore {
    client: DbClient,
    config: TableConfig,
}

#[async_trait]
impl Store for DynamodbStore {
    fn config(&self) -> &TableConfig {
        &self.config
    }

    async fn put(&self, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.config.table_name)
            .set_item(Some(into_attributes(item)))
            .send()
            .await
            .map(|_| ())
            .map_err(store_error)
    }

    async fn put_if_absent(&self, item: Item, partition_key: &str) -> Result<()> {
        self.conditional_put(item, "attribute_not_exists(#pk)", partition_key)
            .await
    }

    async fn put_if_exists(&self, item: Item, partition_key: &str) -> Result<()> {
        self.conditional_put(item, "attribute_exists(#pk)", partition_key)
            .await
    }

    async fn delete_by_key(&self, partition_value: &str, sort_value: &str) -> Result<()> {
        let sort_key = self
            .config
            .sort_key
            .as_deref()
            .ok_or_else(|| no_sort_key(&self.config))?;

        self.client
            .delete_item()
            .table_name(&self.config.table_name)
            .key(
                &self.config.partition_key,
                AttributeValue::S(partition_value.to_string()),
            )
            .key(sort_key, AttributeValue::S(sort_value.to_string()))
            .send()
            .await
            .map(|_| ())
            .map_err(store_error)
    }

    async fn query(&self, query: Query) -> Result<QueryOutput> {
        let mut expr = Expression::new();
        let key_condition = query.key_condition(&mut expr);
        let filter = query.filter_expression(&mut expr);

        let (names, values) = expr.into_parts();
        let values: HashMap<String, AttributeValue> = values
            .into_iter()
            .map(|(placeholder, value)| (placeholder, into_attribute(value)))
            .collect();

        let mut output = QueryOutput::default();
        let mut start_key: Option<Key> = None;

        loop {
            let page = self
                .client
                .query()
                .table_name(&self.config.table_name)
                .set_index_name(query.index_name.clone())
                .key_condition_expression(&key_condition)
                .set_filter_expression(filter.clone())
                .set_expression_attribute_names(Some(names.clone()))
                .set_expression_attribute_values(Some(values.clone()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(store_error)?;

            start_key = page.last_evaluated_key;
            output.append(into_output(page.items, page.scanned_count));

            if start_key.is_none() {
                break;
            }
        }

        Ok(output)
    }

    async fn scan_all(&self) -> Result<QueryOutput> {
        let mut output = QueryOutput::default();
        let mut start_key: Option<Key> = None;

        loop {
            let page = self
                .client
                .scan()
                .table_name(&self.config.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(store_error)?;

            start_key = page.last_evaluated_key;
            output.append(into_output(page.items, page.scanned_count));

            if start_key.is_none() {
                break;
            }
        }

        Ok(output)
    }
}

impl DynamodbStore {
    pub async fn builder() -> DynamodbStoreBuilder {
        DynamodbStoreBuilder::new().await
    }

    async fn conditional_put(&self, item: Item, condition: &str, partition_key: &str) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.config.table_name)
            .set_item(Some(into_attributes(item)))
            .condition_expression(condition)
            .expression_attribute_names("#pk", partition_key)
            .send()
            .await
            .map(|_| ())
            .map_err(put_error)
    }
}

fn into_output(items: Option<Vec<Key>>, scanned_count: i32) -> QueryOutput {
    let items = items
        .unwrap_or_default()
        .into_iter()
        .map(from_attributes)
        .collect();
    QueryOutput::new(items, scanned_count.max(0) as usize)
}

fn put_error<R: std::fmt::Debug + 'static>(err: SdkError<PutItemError, R>) -> Error {
    let rejected = match &err {
        SdkError::ServiceError(context) => context.err().is_conditional_check_failed_exception(),
        _ => false,
    };

    if rejected {
        Error::ConditionalWriteRejected
    } else {
        store_error(err)
    }
}

fn store_error<E: std::error::Error + 'static>(err: E) -> Error {
    Error::StoreOperationFailed(format!("{}", DisplayErrorContext(&err)))
}

#[derive(Debug)]
pub struct DynamodbStoreBuilder {
    db_builder: DbConfigBuilder,
}

impl DynamodbStoreBuilder {
    pub async fn new() -> Self {
        let config = aws_config::load_from_env().await;
        let db_builder = DbConfigBuilder::from(&config);

        Self { db_builder }
    }

    pub fn endpoint_url(self, url: Option<String>) -> Self {
        match url {
            Some(url) => Self {
                db_builder: self.db_builder.endpoint_url(&url),
            },
            None => self,
        }
    }

    pub fn build(self, config: TableConfig) -> DynamodbStore {
        let db_config = self.db_builder.build();
        let client = DbClient::from_conf(db_config);

        DynamodbStore { client, config }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::error::{
        ConditionalCheckFailedException, ResourceNotFoundException,
    };

    #[test]
    fn it_rejects_a_failed_condition_check() {
        let err = PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder()
                .message("The conditional request failed")
                .build(),
        );

        let result = put_error(SdkError::service_error(err, ()));
        assert!(matches!(result, Error::ConditionalWriteRejected));
        assert_eq!(format!("{result}"), "The conditional request failed");
    }

    #[test]
    fn it_passes_other_service_errors_through() {
        let err = PutItemError::ResourceNotFoundException(
            ResourceNotFoundException::builder()
                .message("Requested resource not found")
                .build(),
        );

        let result = put_error(SdkError::service_error(err, ()));
        match result {
            Error::StoreOperationFailed(message) => {
                assert!(message.contains("Requested resource not found"))
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
