use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};
use storage::Database;

use super::handlers::{
    adjust_heats_for_ticket_type, delete_heat, generate_heats_from_settings, get_heat_board,
};
use crate::middleware::auth::{ApiKeys, require_auth};

pub fn routes(api_keys: ApiKeys) -> Router<Database> {
    let protected = Router::new()
        .route(
            "/competitions/:competition_id/ticket-types/:ticket_type_id/heats",
            put(adjust_heats_for_ticket_type),
        )
        .route(
            "/competitions/:competition_id/heats/generate",
            post(generate_heats_from_settings),
        )
        .route("/heats/:heat_id", delete(delete_heat))
        .route_layer(middleware::from_fn_with_state(api_keys, require_auth));

    Router::new()
        .route("/competitions/:competition_id/heats", get(get_heat_board))
        .merge(protected)
}
