//! The client's view of the server.

use async_trait::async_trait;
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::DbId;

use crate::error::ClientError;

/// One of the three selection lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupList {
    Routes,
    Units,
    FareTypes,
}

impl LookupList {
    pub const ALL: [LookupList; 3] = [Self::Routes, Self::Units, Self::FareTypes];

    /// Path below the API base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Routes => "/rutas",
            Self::Units => "/unidades",
            Self::FareTypes => "/tipos",
        }
    }
}

/// A CSV report returned by the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedReport {
    /// Name suggested by the server, when it sent one.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Remote ticket operations. Every call is one request/response; failures
/// carry the server's message and code.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, ClientError>;

    async fn list_by_route(&self, route_id: DbId) -> Result<Vec<TicketRecord>, ClientError>;

    /// Returns the id assigned by the server.
    async fn create(&self, input: &TicketInput) -> Result<DbId, ClientError>;

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), ClientError>;

    async fn delete(&self, id: DbId) -> Result<(), ClientError>;

    async fn export_csv(&self) -> Result<ExportedReport, ClientError>;

    async fn list_lookup(&self, list: LookupList) -> Result<Vec<LookupEntry>, ClientError>;
}
