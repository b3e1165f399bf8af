use axum::{Router, routing::get};
use storage::Database;

use super::handlers::get_rest_day_stats;

pub fn routes() -> Router<Database> {
    Router::new().route("/:member_id/rest-days", get(get_rest_day_stats))
}
