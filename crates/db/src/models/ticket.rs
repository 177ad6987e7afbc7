//! Row shapes returned by the ticket and lookup functions.

use pasajes_core::ticket::{LookupEntry, TicketRecord};
use pasajes_core::types::DbId;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, Row};

/// A row from the ticket listing functions, columns aliased by
/// [`TICKET_COLUMNS`](crate::procedures::TICKET_COLUMNS).
#[derive(Debug, Clone, FromRow)]
pub struct TicketRow {
    pub id: DbId,
    pub route_name: String,
    pub unit_name: String,
    pub fare_type: String,
    pub customer_id: String,
    pub customer_name: String,
    pub fare_value: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub observation: Option<String>,
}

impl From<TicketRow> for TicketRecord {
    fn from(row: TicketRow) -> Self {
        Self {
            id: row.id,
            route_name: row.route_name,
            unit_name: row.unit_name,
            fare_type: row.fare_type,
            customer_id: row.customer_id,
            customer_name: row.customer_name,
            fare_value: row.fare_value.unwrap_or_default(),
            date: row.date,
            time: row.time.unwrap_or_default(),
            observation: row.observation,
        }
    }
}

/// A lookup row: first column is the id, second the label.
///
/// Decoded by position so the functions are free to name their columns.
#[derive(Debug, Clone)]
pub struct LookupRow(pub LookupEntry);

impl<'r> FromRow<'r, PgRow> for LookupRow {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self(LookupEntry {
            id: row.try_get(0)?,
            label: row.try_get(1)?,
        }))
    }
}
