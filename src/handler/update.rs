use super::parse_item;
use crate::{
    error::Result,
    web::{AppState, Reply},
};

use tracing::{error, info};

/// Replaces an existing record with the body. Required fields are not
/// checked here.
///
/// Failures are reported in the body only; the status stays 200.
pub async fn handle(state: &AppState, body: &str) -> Reply {
    match update(state, body).await {
        Ok(()) => {
            info!("Item updated");
            Reply::ok("Item updated")
        }
        Err(err) => {
            error!("{err}");
            Reply::ok(format!("{err}"))
        }
    }
}

async fn update(state: &AppState, body: &str) -> Result<()> {
    let item = parse_item(body)?;
    state
        .store()
        .put_if_exists(item, &state.config().partition_key)
        .await
}
