use axum::{Router, middleware, routing::post};
use storage::Database;

use super::handlers::validate_challenge_submission;
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/:submission_id/validate", post(validate_challenge_submission))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
