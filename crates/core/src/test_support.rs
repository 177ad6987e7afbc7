//! Record builders shared by unit tests.

use crate::ticket::TicketRecord;
use crate::types::DbId;

pub(crate) fn sample(id: DbId) -> TicketRecord {
    TicketRecord {
        id,
        route_name: format!("Ruta {id}"),
        unit_name: "Bus 1".into(),
        fare_type: "Normal".into(),
        customer_id: format!("17{id:08}"),
        customer_name: format!("Cliente {id}"),
        fare_value: "2.50".into(),
        date: Some("2024-05-01".into()),
        time: "08:00".into(),
        observation: None,
    }
}

/// `n` records with ids 10, 20, 30, ...
pub(crate) fn samples(n: usize) -> Vec<TicketRecord> {
    (1..=n as DbId).map(|id| sample(id * 10)).collect()
}
