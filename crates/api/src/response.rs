//! Response bodies for the write endpoints.

use pasajes_core::types::DbId;
use serde::Serialize;

/// `{ "message": ... }` acknowledgement for update and delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// `{ "message": ..., "id": ... }` returned by create.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: DbId,
}
