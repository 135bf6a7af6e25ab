use crate::{
    error::Result,
    store::Item,
    validation::validate_holiday,
    web::{AppState, Reply},
};

use serde_json::Value;
use tracing::{error, info};

/// Inserts the body as a new record unless one with the same primary key
/// exists.
///
/// Missing required fields reply 403, every other failure (a duplicate key
/// included) replies 500.
pub async fn handle(state: &AppState, body: &str) -> Reply {
    match create(state, body).await {
        Ok(created) => {
            info!("Item created: {created}");
            Reply::ok(format!("Item created: {created}"))
        }
        Err(err) => {
            error!("{err}");
            Reply::ok(format!("{err}")).status(err.status_code())
        }
    }
}

async fn create(state: &AppState, body: &str) -> Result<String> {
    let value: Value = serde_json::from_str(body)?;
    validate_holiday(&value)?;

    let created = value.to_string();
    let item: Item = serde_json::from_value(value)?;

    state
        .store()
        .put_if_absent(item, &state.config().partition_key)
        .await?;

    Ok(created)
}
