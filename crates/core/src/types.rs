/// Ticket, route, unit and fare-type keys are PostgreSQL BIGINT.
pub type DbId = i64;

/// Calendar dates travel as `YYYY-MM-DD`.
pub type Date = chrono::NaiveDate;
