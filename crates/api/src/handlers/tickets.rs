//! Handlers for the `/pasajes` resource.
//!
//! Each handler is one record store call; business rules live in the
//! stored functions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use pasajes_core::ticket::{TicketInput, TicketRecord};
use pasajes_core::types::DbId;
use pasajes_db::DateRange;

use crate::error::{AppError, AppResult};
use crate::response::{CreatedResponse, MessageResponse};
use crate::state::AppState;

/// GET /api/pasajes
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TicketRecord>>> {
    let tickets = state.store.list_all().await?;
    Ok(Json(tickets))
}

/// GET /api/pasajes/ruta/{route_id}?desde=&hasta=
pub async fn list_by_route(
    State(state): State<AppState>,
    Path(route_id): Path<DbId>,
    Query(range): Query<DateRange>,
) -> AppResult<Json<Vec<TicketRecord>>> {
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(AppError::BadRequest(format!(
                "Invalid date range: {from} is after {to}"
            )));
        }
    }
    let tickets = state.store.list_by_route(route_id, range).await?;
    Ok(Json(tickets))
}

/// POST /api/pasajes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<TicketInput>,
) -> AppResult<(StatusCode, Json<CreatedResponse>)> {
    input.validate_input()?;
    tracing::debug!(route_id = input.route_id, seat = input.seat, "Creating ticket");

    let id = state.store.create(&input).await?;
    tracing::info!(ticket_id = id, "Ticket created");

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Guardado correctamente",
            id,
        }),
    ))
}

/// PUT /api/pasajes/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<TicketInput>,
) -> AppResult<Json<MessageResponse>> {
    input.validate_input()?;
    tracing::debug!(ticket_id = id, "Updating ticket");

    state.store.update(id, &input).await?;
    tracing::info!(ticket_id = id, "Ticket updated");

    Ok(Json(MessageResponse {
        message: "Actualizado correctamente",
    }))
}

/// DELETE /api/pasajes/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.store.delete(id).await?;
    tracing::info!(ticket_id = id, "Ticket deleted");

    Ok(Json(MessageResponse {
        message: "Eliminado correctamente",
    }))
}
