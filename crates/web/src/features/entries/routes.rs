use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::{submit_entry, validate_entry};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(submit_entry))
        .route("/:entry_id/validate", post(validate_entry))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
