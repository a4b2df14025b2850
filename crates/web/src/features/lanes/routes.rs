use axum::{
    Router, middleware,
    routing::{delete, post, put},
};
use storage::Database;

use super::handlers::{assign_entry_to_heat, unassign_entry, update_lane_heat};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    Router::new()
        .route("/", post(assign_entry_to_heat))
        .route("/:lane_id", delete(unassign_entry))
        .route("/:lane_id/heat", put(update_lane_heat))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth))
}
