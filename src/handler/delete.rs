use super::{param, Params};
use crate::web::{AppState, Reply};

use tracing::{error, info};

/// Deletes the record named by the partition and sort key parameters.
///
/// Always replies 200. The body only tells whether both key values were
/// given; a failing delete is logged and otherwise ignored.
pub async fn handle(state: &AppState, params: &Params) -> Reply {
    let config = state.config();
    let partition_value = param(params, &config.partition_key);
    let sort_value = config
        .sort_key
        .as_deref()
        .and_then(|sort_key| param(params, sort_key));

    match (partition_value, sort_value) {
        (Some(partition_value), Some(sort_value)) => {
            match state
                .store()
                .delete_by_key(partition_value, sort_value)
                .await
            {
                Ok(()) => info!("Item deleted: {partition_value}/{sort_value}"),
                Err(err) => error!("{err}"),
            }
            Reply::ok("Item deleted")
        }
        _ => Reply::ok("item not found"),
    }
}
