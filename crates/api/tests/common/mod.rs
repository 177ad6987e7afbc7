#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use pasajes_api::config::ServerConfig;
use pasajes_api::router::build_app_router;
use pasajes_api::state::AppState;
use pasajes_core::fault::FaultCode;
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::DbId;
use pasajes_db::{DateRange, ExportedFile, LookupKind, StoreError, TicketStore};

/// Seats per unit in the in-memory store.
pub const UNIT_CAPACITY: i32 = 40;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
        csv_export_path: PathBuf::from("./exports"),
        static_dir: None,
    }
}

/// Build the full application router (same middleware stack as production)
/// over the given store.
pub fn build_test_app(store: Arc<InMemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// In-memory record store
// ---------------------------------------------------------------------------

struct StoredTicket {
    record: TicketRecord,
    route_id: DbId,
    seat: i32,
}

#[derive(Default)]
struct Inner {
    tickets: Vec<StoredTicket>,
    next_id: DbId,
    export_missing: bool,
    unhealthy: bool,
}

/// Stands in for the stored functions: seat range and seat/trip conflicts
/// are rejected with the same messages the procedures raise.
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

pub fn routes() -> Vec<LookupEntry> {
    vec![
        LookupEntry { id: 1, label: "Quito - Ambato".into() },
        LookupEntry { id: 2, label: "Quito - Loja".into() },
    ]
}

fn label(entries: &[LookupEntry], id: DbId) -> String {
    entries
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.label.clone())
        .unwrap_or_default()
}

fn units() -> Vec<LookupEntry> {
    vec![LookupEntry { id: 1, label: "Bus 01".into() }]
}

fn fare_types() -> Vec<LookupEntry> {
    vec![
        LookupEntry { id: 1, label: "Normal".into() },
        LookupEntry { id: 2, label: "Estudiante".into() },
    ]
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_export_missing(&self) {
        self.inner.lock().unwrap().export_missing = true;
    }

    pub fn set_unhealthy(&self) {
        self.inner.lock().unwrap().unhealthy = true;
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().tickets.len()
    }

    fn to_record(id: DbId, input: &TicketInput) -> TicketRecord {
        TicketRecord {
            id,
            route_name: label(&routes(), input.route_id),
            unit_name: label(&units(), input.unit_id),
            fare_type: label(&fare_types(), input.fare_type_id),
            customer_id: input.customer_id.clone(),
            customer_name: input.customer_name.clone(),
            fare_value: input.fare_value.clone(),
            date: Some(input.date.to_string()),
            time: input.time.clone(),
            observation: input.observation.clone(),
        }
    }

    fn check_seat(inner: &Inner, input: &TicketInput, skip: Option<DbId>) -> Result<(), StoreError> {
        if input.seat > UNIT_CAPACITY {
            return Err(StoreError::Procedure {
                fault: Some(FaultCode::CapacityExceeded),
                message: format!("El asiento {} no existe en la unidad", input.seat),
            });
        }
        let date = Some(input.date.to_string());
        let taken = inner.tickets.iter().any(|t| {
            Some(t.record.id) != skip
                && t.route_id == input.route_id
                && t.seat == input.seat
                && t.record.date == date
                && t.record.time == input.time
        });
        if taken {
            return Err(StoreError::procedure(format!(
                "ORA-20002: Asiento {} ya vendido",
                input.seat
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl TicketStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tickets.iter().map(|t| t.record.clone()).collect())
    }

    async fn list_by_route(
        &self,
        route_id: DbId,
        range: DateRange,
    ) -> Result<Vec<TicketRecord>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tickets
            .iter()
            .filter(|t| t.route_id == route_id)
            .filter(|t| {
                let date = t.record.date.clone().unwrap_or_default();
                range.from.map_or(true, |f| date >= f.to_string())
                    && range.to.map_or(true, |to| date <= to.to_string())
            })
            .map(|t| t.record.clone())
            .collect())
    }

    async fn create(&self, input: &TicketInput) -> Result<DbId, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_seat(&inner, input, None)?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.tickets.push(StoredTicket {
            record: Self::to_record(id, input),
            route_id: input.route_id,
            seat: input.seat,
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check_seat(&inner, input, Some(id))?;
        let ticket = inner
            .tickets
            .iter_mut()
            .find(|t| t.record.id == id)
            .ok_or_else(|| StoreError::procedure(format!("El pasaje {id} no existe")))?;
        ticket.record = Self::to_record(id, input);
        ticket.route_id = input.route_id;
        ticket.seat = input.seat;
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<(), StoreError> {
        self.inner.lock().unwrap().tickets.retain(|t| t.record.id != id);
        Ok(())
    }

    async fn export_csv(&self) -> Result<ExportedFile, StoreError> {
        let inner = self.inner.lock().unwrap();
        if inner.export_missing {
            return Err(StoreError::ExportMissing("exports/Reporte_0.csv".into()));
        }
        let mut csv = String::from("id;ruta;cedula;nombre\n");
        for t in &inner.tickets {
            csv.push_str(&format!(
                "{};{};{};{}\n",
                t.record.id, t.record.route_name, t.record.customer_id, t.record.customer_name
            ));
        }
        Ok(ExportedFile {
            file_name: "Reporte_1717000000000.csv".into(),
            bytes: csv.into_bytes(),
        })
    }

    async fn list_lookup(&self, kind: LookupKind) -> Result<Vec<LookupEntry>, StoreError> {
        Ok(match kind {
            LookupKind::Routes => routes(),
            LookupKind::Units => units(),
            LookupKind::FareTypes => fare_types(),
        })
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        if self.inner.lock().unwrap().unhealthy {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub fn ticket_json(route: i64, seat: i32) -> serde_json::Value {
    serde_json::json!({
        "id_ruta": route.to_string(),
        "id_unidad": "1",
        "id_tipo": "1",
        "cedula": "1712345678",
        "nombre": "Ana Pérez",
        "valor": "3.50",
        "fecha": "2024-05-01",
        "hora": "08:30",
        "asiento": seat.to_string(),
        "obs": ""
    })
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_empty(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

async fn send_json(app: Router, method: Method, uri: &str, body: serde_json::Value) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
