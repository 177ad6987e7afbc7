use std::sync::Arc;

use pasajes_db::TicketStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Ticket record store (stored-function calls).
    pub store: Arc<dyn TicketStore>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
