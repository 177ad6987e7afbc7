pub mod health;
pub mod lookups;
pub mod tickets;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /pasajes                     list, create
/// /pasajes/{id}                update, delete
/// /pasajes/ruta/{route_id}     list by route (?desde=&hasta=)
///
/// /exportar                    CSV report download (POST)
///
/// /rutas                       routes lookup
/// /unidades                    units lookup
/// /tipos                       fare types lookup
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/pasajes", tickets::router())
        .route("/exportar", post(handlers::export::export_csv))
        .merge(lookups::router())
}
