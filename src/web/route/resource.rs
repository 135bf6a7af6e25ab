use crate::{
    config::Operations,
    handler::{self, Params},
    web::{AppState, Reply},
};

use axum::{
    extract::{Query, State},
    routing::MethodRouter,
    Router,
};

async fn read(State(state): State<AppState>, Query(params): Query<Params>) -> Reply {
    handler::read::handle(&state, &params).await
}

async fn create(State(state): State<AppState>, body: String) -> Reply {
    handler::create::handle(&state, &body).await
}

async fn update(State(state): State<AppState>, body: String) -> Reply {
    handler::update::handle(&state, &body).await
}

async fn delete(State(state): State<AppState>, Query(params): Query<Params>) -> Reply {
    handler::delete::handle(&state, &params).await
}

/// Mounts the enabled operations on `/<resource>`. Authorization of the
/// writing methods happens in front of this service.
pub fn router(state: AppState, resource: &str, operations: Operations) -> Router {
    let mut methods: MethodRouter<AppState> = MethodRouter::new();
    if operations.read {
        methods = methods.get(read);
    }
    if operations.create {
        methods = methods.post(create);
    }
    if operations.update {
        methods = methods.put(update);
    }
    if operations.delete {
        methods = methods.delete(delete);
    }

    Router::new()
        .route(&format!("/{resource}"), methods)
        .with_state(state)
}
