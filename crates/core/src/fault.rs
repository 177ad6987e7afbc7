//! Business-rule faults raised by the ticket procedures and their
//! user-facing messages.
//!
//! The procedures signal faults with a custom SQLSTATE. Messages coming from
//! the legacy Oracle procedures carry `ORA-20001` / `ORA-20002` instead, so
//! classification falls back to those markers.

use serde::{Deserialize, Serialize};

/// Shown when the server could not be reached at all.
pub const CONNECTION_FAILURE_MESSAGE: &str = "Fallo de conexión";

/// Shown when an error response carries no message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";

/// A recognised procedure fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FaultCode {
    /// The seat does not exist on the unit.
    CapacityExceeded,
    /// The seat is already sold for that trip.
    ScheduleConflict,
}

impl FaultCode {
    pub const ALL: [FaultCode; 2] = [Self::CapacityExceeded, Self::ScheduleConflict];

    /// Error code used in API error bodies.
    pub fn as_code(self) -> &'static str {
        match self {
            Self::CapacityExceeded => "CAPACITY_EXCEEDED",
            Self::ScheduleConflict => "SCHEDULE_CONFLICT",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_code() == code)
    }

    /// SQLSTATE raised by the PostgreSQL procedures.
    pub fn sqlstate(self) -> &'static str {
        match self {
            Self::CapacityExceeded => "PT001",
            Self::ScheduleConflict => "PT002",
        }
    }

    pub fn from_sqlstate(state: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.sqlstate() == state)
    }

    /// Marker found in messages from the legacy Oracle procedures.
    pub fn legacy_marker(self) -> &'static str {
        match self {
            Self::CapacityExceeded => "ORA-20001",
            Self::ScheduleConflict => "ORA-20002",
        }
    }

    pub fn user_message(self) -> &'static str {
        match self {
            Self::CapacityExceeded => "⚠️ Capacidad excedida: El asiento no existe.",
            Self::ScheduleConflict => "⛔ Choque de horario: Asiento ya vendido.",
        }
    }
}

/// Classify a raw procedure message by its legacy marker.
///
/// When both markers are present capacity wins: the legacy form replaced the
/// whole message on `ORA-20001` before looking for `ORA-20002`.
pub fn classify_message(message: &str) -> Option<FaultCode> {
    [FaultCode::CapacityExceeded, FaultCode::ScheduleConflict]
        .into_iter()
        .find(|f| message.contains(f.legacy_marker()))
}

/// Build the message shown to the user for an error response.
///
/// A structured `code` takes precedence; otherwise the message is scanned
/// for legacy markers; anything else passes through verbatim.
pub fn user_facing_message(code: Option<&str>, message: &str) -> String {
    if let Some(fault) = code.and_then(FaultCode::from_code) {
        return fault.user_message().to_string();
    }
    if let Some(fault) = classify_message(message) {
        return fault.user_message().to_string();
    }
    if message.trim().is_empty() {
        UNKNOWN_ERROR_MESSAGE.to_string()
    } else {
        message.to_string()
    }
}
