//! Route definitions for the `/pasajes` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::tickets;
use crate::state::AppState;

/// Routes mounted at `/pasajes`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// PUT    /{id}                -> update
/// DELETE /{id}                -> delete
/// GET    /ruta/{route_id}     -> list_by_route
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(tickets::list).post(tickets::create))
        .route("/{id}", put(tickets::update).delete(tickets::delete))
        .route("/ruta/{route_id}", get(tickets::list_by_route))
}
