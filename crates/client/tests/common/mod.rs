#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use pasajes_client::config::DeskConfig;
use pasajes_client::desk::TicketDesk;
use pasajes_client::error::ClientError;
use pasajes_client::store::{ExportedReport, LookupList, RecordStore};
use pasajes_core::ticket::{LookupEntry, TicketInput, TicketRecord};
use pasajes_core::types::DbId;
use tokio::sync::Notify;

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
}

pub fn routes() -> Vec<LookupEntry> {
    vec![
        LookupEntry { id: 1, label: "Quito - Ambato".into() },
        LookupEntry { id: 2, label: "Quito - Loja".into() },
    ]
}

pub fn units() -> Vec<LookupEntry> {
    vec![LookupEntry { id: 1, label: "Bus 01".into() }]
}

pub fn fare_types() -> Vec<LookupEntry> {
    vec![
        LookupEntry { id: 1, label: "Normal".into() },
        LookupEntry { id: 2, label: "Estudiante".into() },
    ]
}

fn label(entries: &[LookupEntry], id: DbId) -> String {
    entries
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.label.clone())
        .unwrap_or_default()
}

/// A write call seen by the fake, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(TicketInput),
    Update(DbId, TicketInput),
    Delete(DbId),
}

struct Stored {
    route_id: DbId,
    record: TicketRecord,
}

#[derive(Default)]
struct Inner {
    tickets: Vec<Stored>,
    next_id: DbId,
    calls: Vec<Call>,
    /// `(code, message)` returned by the next write.
    reject_next_write: Option<(Option<String>, String)>,
    reject_export: bool,
    reject_lookups: bool,
    export_body: Vec<u8>,
}

/// In-memory [`RecordStore`]. Route loads can be held on a gate to
/// simulate a slow response.
#[derive(Default)]
pub struct FakeStore {
    inner: Mutex<Inner>,
    route_gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// `per_route[i]` records on route `i + 1`, ids 1, 2, ...
    pub fn with_tickets(per_route: &[usize]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut inner = store.inner.lock().unwrap();
            for (i, count) in per_route.iter().enumerate() {
                for seat in 1..=*count {
                    let ticket = input(i as DbId + 1, seat as i32);
                    inner.next_id += 1;
                    let id = inner.next_id;
                    inner.tickets.push(Stored {
                        route_id: ticket.route_id,
                        record: to_record(id, &ticket),
                    });
                }
            }
        }
        Arc::new(store)
    }

    /// Hold every `list_by_route` until the returned notify fires.
    pub fn gate_route_loads(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.route_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    pub fn reject_next_write(&self, code: Option<&str>, message: &str) {
        self.inner.lock().unwrap().reject_next_write =
            Some((code.map(str::to_string), message.to_string()));
    }

    pub fn reject_export(&self) {
        self.inner.lock().unwrap().reject_export = true;
    }

    pub fn reject_lookups(&self) {
        self.inner.lock().unwrap().reject_lookups = true;
    }

    pub fn set_export_body(&self, body: &str) {
        self.inner.lock().unwrap().export_body = body.as_bytes().to_vec();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.inner.lock().unwrap().calls.clone()
    }

    pub fn ids(&self) -> Vec<DbId> {
        self.inner
            .lock()
            .unwrap()
            .tickets
            .iter()
            .map(|t| t.record.id)
            .collect()
    }

    fn take_rejection(inner: &mut Inner) -> Result<(), ClientError> {
        match inner.reject_next_write.take() {
            Some((code, message)) => Err(ClientError::Remote {
                status: 409,
                code,
                message,
            }),
            None => Ok(()),
        }
    }
}

pub fn input(route_id: DbId, seat: i32) -> TicketInput {
    TicketInput {
        route_id,
        unit_id: 1,
        fare_type_id: 1,
        customer_id: format!("17000000{seat:02}"),
        customer_name: format!("Cliente {seat}"),
        fare_value: "3.50".into(),
        date: today(),
        time: "08:30".into(),
        seat,
        observation: None,
    }
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
        date: Some(format!("{}T00:00:00", input.date)),
        time: input.time.clone(),
        observation: input.observation.clone(),
    }
}

#[async_trait]
impl RecordStore for FakeStore {
    async fn list_all(&self) -> Result<Vec<TicketRecord>, ClientError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.tickets.iter().map(|t| t.record.clone()).collect())
    }

    async fn list_by_route(&self, route_id: DbId) -> Result<Vec<TicketRecord>, ClientError> {
        let gate = self.route_gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .tickets
            .iter()
            .filter(|t| t.route_id == route_id)
            .map(|t| t.record.clone())
            .collect())
    }

    async fn create(&self, input: &TicketInput) -> Result<DbId, ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Create(input.clone()));
        Self::take_rejection(&mut inner)?;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.tickets.push(Stored {
            route_id: input.route_id,
            record: to_record(id, input),
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, input: &TicketInput) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Update(id, input.clone()));
        Self::take_rejection(&mut inner)?;
        if let Some(t) = inner.tickets.iter_mut().find(|t| t.record.id == id) {
            t.route_id = input.route_id;
            t.record = to_record(id, input);
        }
        Ok(())
    }

    async fn delete(&self, id: DbId) -> Result<(), ClientError> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(Call::Delete(id));
        Self::take_rejection(&mut inner)?;
        inner.tickets.retain(|t| t.record.id != id);
        Ok(())
    }

    async fn export_csv(&self) -> Result<ExportedReport, ClientError> {
        let inner = self.inner.lock().unwrap();
        if inner.reject_export {
            return Err(ClientError::Remote {
                status: 404,
                code: Some("EXPORT_NOT_FOUND".into()),
                message: "El archivo no se generó en la ruta esperada.".into(),
            });
        }
        Ok(ExportedReport {
            file_name: Some("Reporte_1717000000000.csv".into()),
            bytes: inner.export_body.clone(),
        })
    }

    async fn list_lookup(&self, list: LookupList) -> Result<Vec<LookupEntry>, ClientError> {
        if self.inner.lock().unwrap().reject_lookups {
            return Err(ClientError::Decode("expected value at line 1".into()));
        }
        Ok(match list {
            LookupList::Routes => routes(),
            LookupList::Units => units(),
            LookupList::FareTypes => fare_types(),
        })
    }
}

/// A started desk over `store` with default configuration.
pub async fn started_desk(store: &Arc<FakeStore>) -> TicketDesk<FakeStore> {
    started_desk_with(store, DeskConfig::default()).await
}

pub async fn started_desk_with(store: &Arc<FakeStore>, config: DeskConfig) -> TicketDesk<FakeStore> {
    let desk = TicketDesk::new(Arc::clone(store), config, today());
    desk.start().await;
    desk.take_notices().await;
    desk
}
