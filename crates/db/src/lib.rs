//! PostgreSQL record store for tickets.
//!
//! Every operation is a single call to one stored function. The functions
//! own validation, seat-conflict detection and capacity checks; this crate
//! only binds parameters, decodes rows and classifies errors.

use sqlx::postgres::PgPoolOptions;

pub mod error;
pub mod models;
pub mod pg_store;
pub mod procedures;
pub mod store;

pub use error::StoreError;
pub use pg_store::PgTicketStore;
pub use store::{DateRange, ExportedFile, LookupKind, TicketStore};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
