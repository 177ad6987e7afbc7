//! The record store contract consumed by the HTTP layer.

use async_trait::async_trait;
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::{Date, DbId};
use serde::Deserialize;

use crate::error::StoreError;
use crate::procedures;

/// Optional travel-date bounds for the by-route listing. `None` bounds are
/// passed to the function as NULL (unbounded).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct DateRange {
    #[serde(default, alias = "desde")]
    pub from: Option<Date>,
    #[serde(default, alias = "hasta")]
    pub to: Option<Date>,
}

/// Which lookup list to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    Routes,
    Units,
    FareTypes,
}

impl LookupKind {
    pub fn procedure(self) -> &'static str {
        match self {
            Self::Routes => procedures::LIST_ROUTES,
            Self::Units => procedures::LIST_UNITS,
            Self::FareTypes => procedures::LIST_FARE_TYPES,
        }
    }
}

/// A generated CSV report ready to be sent as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Ticket persistence. Each method maps to exactly one stored function.
///
/// Implementations hold no per-request state; any connection taken for a
/// call is released before the call returns, on success or failure.
#[async_trait]
pub trait TicketStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, StoreError>;

    async fn list_by_route(
        &self,
        route_id: DbId,
        range: DateRange,
    ) -> Result<Vec<TicketRecord>, StoreError>;

    /// Returns the id assigned by the database.
    async fn create(&self, input: &TicketInput) -> Result<DbId, StoreError>;

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), StoreError>;

    async fn delete(&self, id: DbId) -> Result<(), StoreError>;

    async fn export_csv(&self) -> Result<ExportedFile, StoreError>;

    async fn list_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
