//! Create/edit state of the ticket form.
//!
//! The session is either creating a new ticket or editing exactly one
//! existing ticket. It owns the form fields and decides whether a submit
//! becomes a create or an update.

use std::str::FromStr;

use crate::error::CoreError;
use crate::ticket::{find_by_label, Lookups, TicketInput, TicketRecord};
use crate::types::{Date, DbId};

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Create,
    Edit(DbId),
}

// ---------------------------------------------------------------------------
// Form fields
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Route,
    Unit,
    FareType,
    CustomerId,
    CustomerName,
    FareValue,
    Date,
    Time,
    Seat,
    Observation,
}

impl FormField {
    pub const ALL: [FormField; 10] = [
        Self::Route,
        Self::Unit,
        Self::FareType,
        Self::CustomerId,
        Self::CustomerName,
        Self::FareValue,
        Self::Date,
        Self::Time,
        Self::Seat,
        Self::Observation,
    ];

    /// Name used by the form and the desk commands.
    pub fn name(self) -> &'static str {
        match self {
            Self::Route => "ruta",
            Self::Unit => "unidad",
            Self::FareType => "tipo",
            Self::CustomerId => "cedula",
            Self::CustomerName => "nombre",
            Self::FareValue => "valor",
            Self::Date => "fecha",
            Self::Time => "hora",
            Self::Seat => "asiento",
            Self::Observation => "obs",
        }
    }
}

impl FromStr for FormField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|f| f.name()).collect();
                CoreError::Validation(format!(
                    "Unknown field '{s}'. Must be one of: {}",
                    names.join(", ")
                ))
            })
    }
}

/// Raw form contents as typed by the user.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketForm {
    pub route_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    pub fare_type_id: Option<DbId>,
    pub customer_id: String,
    pub customer_name: String,
    pub fare_value: String,
    pub date: String,
    pub time: String,
    pub seat: String,
    pub observation: String,
}

impl TicketForm {
    /// An empty form with the date defaulted to `today`.
    pub fn blank(today: Date) -> Self {
        Self {
            date: today.format(DATE_FORMAT).to_string(),
            ..Self::default()
        }
    }

    pub fn set(&mut self, field: FormField, value: &str) -> Result<(), CoreError> {
        let value = value.trim();
        match field {
            FormField::Route => self.route_id = parse_selection(field, value)?,
            FormField::Unit => self.unit_id = parse_selection(field, value)?,
            FormField::FareType => self.fare_type_id = parse_selection(field, value)?,
            FormField::CustomerId => self.customer_id = value.to_string(),
            FormField::CustomerName => self.customer_name = value.to_string(),
            FormField::FareValue => self.fare_value = value.to_string(),
            FormField::Date => self.date = value.to_string(),
            FormField::Time => self.time = value.to_string(),
            FormField::Seat => self.seat = value.to_string(),
            FormField::Observation => self.observation = value.to_string(),
        }
        Ok(())
    }

    /// Current text of a field, selections rendered as their id.
    pub fn get(&self, field: FormField) -> String {
        let selection = |id: Option<DbId>| id.map(|v| v.to_string()).unwrap_or_default();
        match field {
            FormField::Route => selection(self.route_id),
            FormField::Unit => selection(self.unit_id),
            FormField::FareType => selection(self.fare_type_id),
            FormField::CustomerId => self.customer_id.clone(),
            FormField::CustomerName => self.customer_name.clone(),
            FormField::FareValue => self.fare_value.clone(),
            FormField::Date => self.date.clone(),
            FormField::Time => self.time.clone(),
            FormField::Seat => self.seat.clone(),
            FormField::Observation => self.observation.clone(),
        }
    }

    /// Build a validated write payload.
    pub fn to_input(&self) -> Result<TicketInput, CoreError> {
        let (Some(route_id), Some(unit_id), Some(fare_type_id)) =
            (self.route_id, self.unit_id, self.fare_type_id)
        else {
            return Err(CoreError::Validation(
                "Selecciona la ruta, la unidad y el tipo de pasaje".to_string(),
            ));
        };

        let date = Date::parse_from_str(self.date.trim(), DATE_FORMAT).map_err(|_| {
            CoreError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", self.date))
        })?;
        let seat: i32 = self
            .seat
            .trim()
            .parse()
            .map_err(|_| CoreError::Validation(format!("Invalid seat '{}'", self.seat)))?;
        let observation = Some(self.observation.trim().to_string()).filter(|s| !s.is_empty());

        let input = TicketInput {
            route_id,
            unit_id,
            fare_type_id,
            customer_id: self.customer_id.trim().to_string(),
            customer_name: self.customer_name.trim().to_string(),
            fare_value: self.fare_value.trim().to_string(),
            date,
            time: self.time.trim().to_string(),
            seat,
            observation,
        };
        input.validate_input()?;
        Ok(input)
    }
}

fn parse_selection(field: FormField, value: &str) -> Result<Option<DbId>, CoreError> {
    if value.is_empty() {
        return Ok(None);
    }
    value.parse().map(Some).map_err(|_| {
        CoreError::Validation(format!("Invalid {} '{value}'", field.name()))
    })
}

// ---------------------------------------------------------------------------
// Selection pre-fill
// ---------------------------------------------------------------------------

/// Route/unit/fare-type choices to apply when entering edit mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selections {
    pub route_id: Option<DbId>,
    pub unit_id: Option<DbId>,
    pub fare_type_id: Option<DbId>,
}

impl Selections {
    /// Resolve the record's display labels against the lookup lists.
    /// Labels without an exact match stay unselected.
    pub fn from_labels(record: &TicketRecord, lookups: &Lookups) -> Self {
        Self {
            route_id: find_by_label(&lookups.routes, &record.route_name).map(|e| e.id),
            unit_id: find_by_label(&lookups.units, &record.unit_name).map(|e| e.id),
            fare_type_id: find_by_label(&lookups.fare_types, &record.fare_type).map(|e| e.id),
        }
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// What a submit must send.
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Create(TicketInput),
    Update { id: DbId, input: TicketInput },
}

impl Submission {
    pub fn target_id(&self) -> Option<DbId> {
        match self {
            Self::Create(_) => None,
            Self::Update { id, .. } => Some(*id),
        }
    }

    pub fn input(&self) -> &TicketInput {
        match self {
            Self::Create(input) | Self::Update { input, .. } => input,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EditSession {
    mode: EditMode,
    form: TicketForm,
    today: Date,
}

impl EditSession {
    pub fn new(today: Date) -> Self {
        Self {
            mode: EditMode::Create,
            form: TicketForm::blank(today),
            today,
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn editing_id(&self) -> Option<DbId> {
        match self.mode {
            EditMode::Create => None,
            EditMode::Edit(id) => Some(id),
        }
    }

    pub fn form(&self) -> &TicketForm {
        &self.form
    }

    pub fn set_field(&mut self, field: FormField, value: &str) -> Result<(), CoreError> {
        self.form.set(field, value)
    }

    /// Enter edit mode for `record`, replacing any previous edit target.
    ///
    /// Text fields are copied from the record (date truncated to
    /// `YYYY-MM-DD`); selections come from `selections` and are left empty
    /// when it is the default. Seat and observation are not part of the
    /// listing and start empty.
    pub fn begin_edit(&mut self, record: &TicketRecord, selections: Selections) {
        self.form = TicketForm {
            route_id: selections.route_id,
            unit_id: selections.unit_id,
            fare_type_id: selections.fare_type_id,
            customer_id: record.customer_id.clone(),
            customer_name: record.customer_name.clone(),
            fare_value: record.fare_value.clone(),
            date: record.display_date(),
            time: record.time.clone(),
            seat: String::new(),
            observation: String::new(),
        };
        self.mode = EditMode::Edit(record.id);
    }

    /// Explicit cancel.
    pub fn cancel(&mut self) {
        self.reset();
    }

    /// Successful submit or delete.
    pub fn finish(&mut self) {
        self.reset();
    }

    pub fn submission(&self) -> Result<Submission, CoreError> {
        let input = self.form.to_input()?;
        Ok(match self.mode {
            EditMode::Create => Submission::Create(input),
            EditMode::Edit(id) => Submission::Update { id, input },
        })
    }

    pub fn title(&self) -> String {
        match self.mode {
            EditMode::Create => "Nuevo Pasaje".to_string(),
            EditMode::Edit(id) => format!("Editar Pasaje #{id}"),
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            EditMode::Create => "Guardar",
            EditMode::Edit(_) => "Actualizar",
        }
    }

    fn reset(&mut self) {
        self.mode = EditMode::Create;
        self.form = TicketForm::blank(self.today);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample;
    use crate::ticket::LookupEntry;
    use assert_matches::assert_matches;

    fn today() -> Date {
        Date::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn filled_session() -> EditSession {
        let mut s = EditSession::new(today());
        for (field, value) in [
            ("ruta", "1"),
            ("unidad", "2"),
            ("tipo", "3"),
            ("cedula", "1712345678"),
            ("nombre", "Ana"),
            ("valor", "2.50"),
            ("hora", "08:00"),
            ("asiento", "4"),
        ] {
            s.set_field(field.parse().unwrap(), value).unwrap();
        }
        s
    }

    #[test]
    fn new_session_is_create_with_today() {
        let s = EditSession::new(today());
        assert_eq!(s.mode(), EditMode::Create);
        assert_eq!(s.form().date, "2024-06-15");
        assert_eq!(s.title(), "Nuevo Pasaje");
        assert_eq!(s.submit_label(), "Guardar");
    }

    #[test]
    fn begin_edit_copies_text_fields_and_leaves_selections_empty() {
        let mut s = EditSession::new(today());
        let mut record = sample(42);
        record.date = Some("2024-05-01T00:00:00".into());
        s.begin_edit(&record, Selections::default());

        assert_eq!(s.mode(), EditMode::Edit(42));
        assert_eq!(s.form().customer_id, record.customer_id);
        assert_eq!(s.form().date, "2024-05-01");
        assert_eq!(s.form().route_id, None);
        assert_eq!(s.title(), "Editar Pasaje #42");
        assert_eq!(s.submit_label(), "Actualizar");
    }

    #[test]
    fn cancel_returns_to_clean_create_state() {
        let mut s = EditSession::new(today());
        s.begin_edit(&sample(42), Selections::default());
        s.cancel();
        assert_eq!(s.mode(), EditMode::Create);
        assert_eq!(s.editing_id(), None);
        assert_eq!(s.form(), &TicketForm::blank(today()));
    }

    #[test]
    fn submit_in_edit_mode_is_an_update_for_that_id() {
        let mut s = filled_session();
        let record = sample(42);
        let form = s.form().clone();
        s.begin_edit(&record, Selections { route_id: Some(1), unit_id: Some(2), fare_type_id: Some(3) });
        s.set_field(FormField::Seat, &form.seat).unwrap();
        let submission = s.submission().unwrap();
        assert_eq!(submission.target_id(), Some(42));
        assert_matches!(submission, Submission::Update { id: 42, .. });
    }

    #[test]
    fn submit_in_create_mode_carries_no_id() {
        let s = filled_session();
        let submission = s.submission().unwrap();
        assert_matches!(submission, Submission::Create(_));
        assert_eq!(submission.target_id(), None);
        let body = serde_json::to_value(submission.input()).unwrap();
        assert!(body.get("id").is_none());
    }

    #[test]
    fn missing_selection_is_a_validation_error() {
        let mut s = filled_session();
        s.set_field(FormField::Unit, "").unwrap();
        assert_matches!(s.submission(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn edit_without_reselecting_cannot_submit() {
        let mut s = EditSession::new(today());
        s.begin_edit(&sample(42), Selections::default());
        s.set_field(FormField::Seat, "3").unwrap();
        assert_matches!(s.submission(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn finish_leaves_edit_mode() {
        let mut s = EditSession::new(today());
        s.begin_edit(&sample(42), Selections::default());
        s.finish();
        assert_eq!(s.mode(), EditMode::Create);
        assert_eq!(s.editing_id(), None);
    }

    #[test]
    fn editing_another_row_replaces_target() {
        let mut s = EditSession::new(today());
        s.begin_edit(&sample(42), Selections::default());
        s.begin_edit(&sample(7), Selections::default());
        assert_eq!(s.editing_id(), Some(7));
    }

    #[test]
    fn selections_resolve_by_label() {
        let record = sample(10);
        let lookups = Lookups {
            routes: vec![LookupEntry { id: 5, label: record.route_name.clone() }],
            units: vec![LookupEntry { id: 8, label: "Bus 2".into() }],
            fare_types: vec![LookupEntry { id: 1, label: "Normal".into() }],
        };
        let sel = Selections::from_labels(&record, &lookups);
        assert_eq!(sel.route_id, Some(5));
        assert_eq!(sel.unit_id, None);
        assert_eq!(sel.fare_type_id, Some(1));
    }

    #[test]
    fn unknown_field_name_is_rejected() {
        assert_matches!("color".parse::<FormField>(), Err(CoreError::Validation(_)));
        assert_eq!("CEDULA".parse::<FormField>().unwrap(), FormField::CustomerId);
    }

    #[test]
    fn bad_selection_value_is_rejected() {
        let mut form = TicketForm::default();
        assert_matches!(form.set(FormField::Route, "norte"), Err(CoreError::Validation(_)));
        form.set(FormField::Route, "4").unwrap();
        assert_eq!(form.get(FormField::Route), "4");
    }
}
