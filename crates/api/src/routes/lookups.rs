use axum::routing::get;
use axum::Router;

use crate::handlers::lookups;
use crate::state::AppState;

/// Lookup lists, mounted at the API root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/rutas", get(lookups::routes))
        .route("/unidades", get(lookups::units))
        .route("/tipos", get(lookups::fare_types))
}
