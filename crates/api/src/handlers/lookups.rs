//! Handlers for the route, unit and fare-type lookup lists.

use axum::extract::State;
use axum::Json;
use pasajes_core::ticket::LookupEntry;
use pasajes_db::LookupKind;

use crate::error::AppResult;
use crate::state::AppState;

async fn list(state: &AppState, kind: LookupKind) -> AppResult<Json<Vec<LookupEntry>>> {
    let entries = state.store.list_lookup(kind).await?;
    Ok(Json(entries))
}

/// GET /api/rutas
pub async fn routes(State(state): State<AppState>) -> AppResult<Json<Vec<LookupEntry>>> {
    list(&state, LookupKind::Routes).await
}

/// GET /api/unidades
pub async fn units(State(state): State<AppState>) -> AppResult<Json<Vec<LookupEntry>>> {
    list(&state, LookupKind::Units).await
}

/// GET /api/tipos
pub async fn fare_types(State(state): State<AppState>) -> AppResult<Json<Vec<LookupEntry>>> {
    list(&state, LookupKind::FareTypes).await
}
