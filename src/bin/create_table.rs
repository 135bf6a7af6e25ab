use anyhow::Result;
use aws_sdk_dynamodb::{
    config::Builder as ConfigBuilder,
    types::{
        AttributeDefinition, BillingMode, GlobalSecondaryIndex, KeySchemaElement, KeyType,
        Projection, ProjectionType, ScalarAttributeType,
    },
    Client,
};
use holiday_api::{TableConfig, TableProps, ENV_CONFIG_PATH, ENV_DYNAMODB_ENDPOINT_URL};
use std::env;
use tracing::{error, info};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::new();
    tracing::subscriber::set_global_default(subscriber)?;

    let props = match env::var(ENV_CONFIG_PATH).ok().and_then(TableProps::from_file) {
        Some(props) => props,
        None => TableProps::from_table(&TableConfig::from_env()?),
    };

    let mut builder = ConfigBuilder::from(&aws_config::load_from_env().await);
    if let Ok(url) = env::var(ENV_DYNAMODB_ENDPOINT_URL) {
        builder = builder.endpoint_url(url);
    }
    let client = Client::from_conf(builder.build());

    let mut attributes = vec![props.partition_key.as_str()];
    let mut key_schema = vec![key(&props.partition_key, KeyType::Hash)?];
    if let Some(sort_key) = props.sort_key.as_deref() {
        attributes.push(sort_key);
        key_schema.push(key(sort_key, KeyType::Range)?);
    }

    let mut request = client
        .create_table()
        .table_name(&props.table_name)
        .set_key_schema(Some(key_schema))
        .billing_mode(BillingMode::PayPerRequest);

    let index_name = props.environment().index_name();
    if let (Some(gsi), Some(index_name)) = (props.gsi.as_ref(), index_name) {
        attributes.push(gsi.partition_key.as_str());
        let mut gsi_schema = vec![key(&gsi.partition_key, KeyType::Hash)?];
        if let Some(sort_key) = gsi.sort_key.as_deref() {
            attributes.push(sort_key);
            gsi_schema.push(key(sort_key, KeyType::Range)?);
        }

        request = request.global_secondary_indexes(
            GlobalSecondaryIndex::builder()
                .index_name(index_name)
                .set_key_schema(Some(gsi_schema))
                .projection(
                    Projection::builder()
                        .projection_type(ProjectionType::All)
                        .build(),
                )
                .build()?,
        );
    }

    attributes.sort_unstable();
    attributes.dedup();
    for name in attributes {
        request = request.attribute_definitions(
            AttributeDefinition::builder()
                .attribute_name(name)
                .attribute_type(ScalarAttributeType::S)
                .build()?,
        );
    }

    match request.send().await {
        Ok(output) => {
            if let Some(table_description) = output.table_description {
                info!(
                    "Created table: {}",
                    table_description.table_name.unwrap_or_default()
                );
            }
        }
        Err(err) => {
            error!("{:#?}", err);
        }
    }

    Ok(())
}

fn key(name: &str, key_type: KeyType) -> Result<KeySchemaElement> {
    Ok(KeySchemaElement::builder()
        .attribute_name(name)
        .key_type(key_type)
        .build()?)
}
