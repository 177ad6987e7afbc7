//! Ticket ("pasaje") records, write payloads and lookup entries.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::{Date, DbId};
use crate::wire;

/// Number of leading characters of a stored date shown in the table and form.
pub const DISPLAY_DATE_LEN: usize = 10;

// ---------------------------------------------------------------------------
// TicketRecord
// ---------------------------------------------------------------------------

/// One row of the ticket listing.
///
/// Field order mirrors the positional rows returned by the listing
/// procedures; the record also deserializes from that array form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TicketRecordWire")]
pub struct TicketRecord {
    pub id: DbId,
    pub route_name: String,
    pub unit_name: String,
    pub fare_type: String,
    pub customer_id: String,
    pub customer_name: String,
    /// Decimal text as produced by the database.
    pub fare_value: String,
    pub date: Option<String>,
    pub time: String,
    /// Write-only note; never rendered in the table.
    pub observation: Option<String>,
}

impl TicketRecord {
    /// Date truncated to `YYYY-MM-DD`, or empty when absent.
    pub fn display_date(&self) -> String {
        self.date
            .as_deref()
            .map(|d| d.chars().take(DISPLAY_DATE_LEN).collect())
            .unwrap_or_default()
    }

    /// Fare formatted with two decimals and a `$` prefix.
    ///
    /// Unparsable values are shown as stored.
    pub fn display_fare(&self) -> String {
        match self.fare_value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => format!("${v:.2}"),
            _ => format!("${}", self.fare_value),
        }
    }

    pub fn fare_badge(&self) -> FareBadge {
        FareBadge::for_fare_type(&self.fare_type)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TicketRecordWire {
    Named(NamedTicket),
    Positional(Vec<serde_json::Value>),
}

#[derive(Deserialize)]
struct NamedTicket {
    #[serde(deserialize_with = "wire::id")]
    id: DbId,
    #[serde(deserialize_with = "wire::text")]
    route_name: String,
    #[serde(deserialize_with = "wire::text")]
    unit_name: String,
    #[serde(deserialize_with = "wire::text")]
    fare_type: String,
    #[serde(deserialize_with = "wire::text")]
    customer_id: String,
    #[serde(deserialize_with = "wire::text")]
    customer_name: String,
    #[serde(deserialize_with = "wire::text")]
    fare_value: String,
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    time: Option<String>,
    #[serde(default)]
    observation: Option<String>,
}

/// Minimum number of cells in a positional row (observation may be omitted).
const MIN_POSITIONAL_CELLS: usize = 9;

impl TryFrom<TicketRecordWire> for TicketRecord {
    type Error = String;

    fn try_from(wire: TicketRecordWire) -> Result<Self, Self::Error> {
        match wire {
            TicketRecordWire::Named(t) => Ok(Self {
                id: t.id,
                route_name: t.route_name,
                unit_name: t.unit_name,
                fare_type: t.fare_type,
                customer_id: t.customer_id,
                customer_name: t.customer_name,
                fare_value: t.fare_value,
                date: t.date,
                time: t.time.unwrap_or_default(),
                observation: t.observation,
            }),
            TicketRecordWire::Positional(cells) => {
                if cells.len() < MIN_POSITIONAL_CELLS {
                    return Err(format!(
                        "ticket row has {} cells, expected at least {MIN_POSITIONAL_CELLS}",
                        cells.len()
                    ));
                }
                let id = wire::cell_text(cells.first())
                    .and_then(|s| s.parse::<DbId>().ok())
                    .ok_or_else(|| "ticket row has no numeric id".to_string())?;
                let text = |i: usize| wire::cell_text(cells.get(i)).unwrap_or_default();
                Ok(Self {
                    id,
                    route_name: text(1),
                    unit_name: text(2),
                    fare_type: text(3),
                    customer_id: text(4),
                    customer_name: text(5),
                    fare_value: text(6),
                    date: wire::cell_text(cells.get(7)),
                    time: text(8),
                    observation: wire::cell_text(cells.get(9)),
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Fare badge
// ---------------------------------------------------------------------------

/// Visual category of a fare type label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FareBadge {
    Primary,
    Info,
    Secondary,
}

impl FareBadge {
    pub fn for_fare_type(fare_type: &str) -> Self {
        match fare_type {
            "Normal" => Self::Primary,
            "Estudiante" => Self::Info,
            _ => Self::Secondary,
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Self::Primary => "bg-primary",
            Self::Info => "bg-info",
            Self::Secondary => "bg-secondary",
        }
    }
}

// ---------------------------------------------------------------------------
// TicketInput
// ---------------------------------------------------------------------------

/// Create/update payload. Carries no id: updates address the id in the path.
///
/// Accepts the field names posted by the legacy form as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TicketInput {
    #[serde(alias = "id_ruta", deserialize_with = "wire::id")]
    #[validate(range(min = 1, message = "route is required"))]
    pub route_id: DbId,
    #[serde(alias = "id_unidad", deserialize_with = "wire::id")]
    #[validate(range(min = 1, message = "unit is required"))]
    pub unit_id: DbId,
    #[serde(alias = "id_tipo", deserialize_with = "wire::id")]
    #[validate(range(min = 1, message = "fare type is required"))]
    pub fare_type_id: DbId,
    #[serde(alias = "cedula", deserialize_with = "wire::text")]
    #[validate(length(min = 1, message = "cedula is required"))]
    pub customer_id: String,
    #[serde(alias = "nombre")]
    #[validate(length(min = 1, message = "customer name is required"))]
    pub customer_name: String,
    #[serde(alias = "valor", deserialize_with = "wire::text")]
    pub fare_value: String,
    #[serde(alias = "fecha")]
    pub date: Date,
    #[serde(alias = "hora")]
    #[validate(length(min = 1, message = "time is required"))]
    pub time: String,
    #[serde(alias = "asiento", deserialize_with = "wire::int32")]
    #[validate(range(min = 1, message = "seat must be at least 1"))]
    pub seat: i32,
    #[serde(default, alias = "obs")]
    pub observation: Option<String>,
}

impl TicketInput {
    /// Field-level checks plus the fare value format.
    ///
    /// Business rules (capacity, seat conflicts) are enforced by the store.
    pub fn validate_input(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        parse_fare_value(&self.fare_value)?;
        Ok(())
    }
}

/// Parse a fare amount. Must be a finite, non-negative decimal.
pub fn parse_fare_value(raw: &str) -> Result<f64, CoreError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid fare value '{raw}'")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(CoreError::Validation(format!(
            "Fare value must be a non-negative amount, got '{raw}'"
        )));
    }
    Ok(value)
}

// ---------------------------------------------------------------------------
// Lookups
// ---------------------------------------------------------------------------

/// An `(id, label)` pair used for routes, units and fare types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LookupWire")]
pub struct LookupEntry {
    pub id: DbId,
    pub label: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LookupWire {
    Named {
        #[serde(deserialize_with = "wire::id")]
        id: DbId,
        #[serde(deserialize_with = "wire::text")]
        label: String,
    },
    Pair(Vec<serde_json::Value>),
}

impl TryFrom<LookupWire> for LookupEntry {
    type Error = String;

    fn try_from(wire: LookupWire) -> Result<Self, Self::Error> {
        match wire {
            LookupWire::Named { id, label } => Ok(Self { id, label }),
            LookupWire::Pair(cells) => {
                let id = wire::cell_text(cells.first())
                    .and_then(|s| s.parse::<DbId>().ok())
                    .ok_or_else(|| "lookup row has no numeric id".to_string())?;
                let label = wire::cell_text(cells.get(1)).unwrap_or_default();
                Ok(Self { id, label })
            }
        }
    }
}

/// Find the entry whose label matches exactly.
pub fn find_by_label<'a>(entries: &'a [LookupEntry], label: &str) -> Option<&'a LookupEntry> {
    entries.iter().find(|e| e.label == label)
}

/// The three lookup lists loaded once at desk start-up.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookups {
    pub routes: Vec<LookupEntry>,
    pub units: Vec<LookupEntry>,
    pub fare_types: Vec<LookupEntry>,
}
