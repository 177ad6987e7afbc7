//! [`TicketStore`] backed by PostgreSQL stored functions.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::DbId;

use crate::error::StoreError;
use crate::models::ticket::{LookupRow, TicketRow};
use crate::procedures::{
    DELETE_TICKET, EXPORT_TICKETS_CSV, INSERT_TICKET, LIST_TICKETS, LIST_TICKETS_BY_ROUTE,
    TICKET_COLUMNS, UPDATE_TICKET,
};
use crate::store::{DateRange, ExportedFile, LookupKind, TicketStore};
use crate::DbPool;

/// Calls the ticket functions over a shared pool.
///
/// Every method acquires one pooled connection and holds it only for the
/// single statement it runs; the connection returns to the pool when the
/// guard drops, on every exit path.
#[derive(Clone)]
pub struct PgTicketStore {
    pool: DbPool,
    export_dir: PathBuf,
}

impl PgTicketStore {
    /// `export_dir` is where the export function writes its CSV files, as
    /// seen from this process.
    pub fn new(pool: DbPool, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            pool,
            export_dir: export_dir.into(),
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl TicketStore for PgTicketStore {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!("SELECT {TICKET_COLUMNS} FROM {LIST_TICKETS}()");
        let rows = sqlx::query_as::<_, TicketRow>(&query)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(TicketRecord::from).collect())
    }

    async fn list_by_route(
        &self,
        route_id: DbId,
        range: DateRange,
    ) -> Result<Vec<TicketRecord>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!("SELECT {TICKET_COLUMNS} FROM {LIST_TICKETS_BY_ROUTE}($1, $2, $3)");
        let rows = sqlx::query_as::<_, TicketRow>(&query)
            .bind(route_id)
            .bind(range.from)
            .bind(range.to)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(TicketRecord::from).collect())
    }

    async fn create(&self, input: &TicketInput) -> Result<DbId, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!(
            "SELECT {INSERT_TICKET}($1, $2, $3, $4, $5, $6::numeric, $7, $8, $9, $10)"
        );
        let id = sqlx::query_scalar::<_, DbId>(&query)
            .bind(input.route_id)
            .bind(input.unit_id)
            .bind(input.fare_type_id)
            .bind(&input.customer_id)
            .bind(&input.customer_name)
            .bind(&input.fare_value)
            .bind(input.date)
            .bind(&input.time)
            .bind(input.seat)
            .bind(&input.observation)
            .fetch_one(&mut *conn)
            .await?;
        Ok(id)
    }

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!(
            "SELECT {UPDATE_TICKET}($1, $2, $3, $4, $5, $6, $7::numeric, $8, $9, $10, $11)"
        );
        sqlx::query(&query)
            .bind(id)
            .bind(input.route_id)
            .bind(input.unit_id)
            .bind(input.fare_type_id)
            .bind(&input.customer_id)
            .bind(&input.customer_name)
            .bind(&input.fare_value)
            .bind(input.date)
            .bind(&input.time)
            .bind(input.seat)
            .bind(&input.observation)
            .execute(&mut *conn)
            .await?;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!("SELECT {DELETE_TICKET}($1)");
        sqlx::query(&query).bind(id).execute(&mut *conn).await?;
        Ok(())
    }

    async fn export_csv(&self) -> Result<ExportedFile, StoreError> {
        let file_name = export_file_name(Utc::now());
        {
            let mut conn = self.pool.acquire().await?;
            let query = format!("SELECT {EXPORT_TICKETS_CSV}($1)");
            sqlx::query(&query)
                .bind(&file_name)
                .execute(&mut *conn)
                .await?;
        }
        tracing::debug!(file_name = %file_name, "Export function completed");
        read_export(&self.export_dir, &file_name).await
    }

    async fn list_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let query = format!("SELECT * FROM {}()", kind.procedure());
        let rows = sqlx::query_as::<_, LookupRow>(&query)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows.into_iter().map(|LookupRow(entry)| entry).collect())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }
}

/// `Reporte_<unix-millis>.csv`.
pub fn export_file_name(now: DateTime<Utc>) -> String {
    format!("Reporte_{}.csv", now.timestamp_millis())
}

/// Read a report written by the export function.
pub(crate) async fn read_export(dir: &Path, file_name: &str) -> Result<ExportedFile, StoreError> {
    let path = dir.join(file_name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Ok(ExportedFile {
            file_name: file_name.to_string(),
            bytes,
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(StoreError::ExportMissing(path.display().to_string()))
        }
        Err(e) => Err(StoreError::Io(e)),
    }
}
