//! In-memory mirror of the current ticket result set.
//!
//! The cache is always replaced wholesale. Loads are sequenced with a
//! monotonic [`LoadToken`]: only the completion of the most recently issued
//! load may replace the contents, so a slow response can never overwrite
//! the result of a later request.

use crate::ticket::TicketRecord;
use crate::types::DbId;

/// Identifies one issued load. Higher tokens were issued later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadToken(u64);

impl LoadToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListCache {
    records: Vec<TicketRecord>,
    latest_issued: u64,
}

impl ListCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token for a load that is about to be sent.
    pub fn begin_load(&mut self) -> LoadToken {
        self.latest_issued += 1;
        LoadToken(self.latest_issued)
    }

    /// Whether `token` belongs to the most recently issued load.
    pub fn is_current(&self, token: LoadToken) -> bool {
        token.0 == self.latest_issued
    }

    /// Replace the contents if `token` is still current.
    ///
    /// Returns `false` (and leaves the cache untouched) for stale tokens.
    pub fn complete_load(&mut self, token: LoadToken, records: Vec<TicketRecord>) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.records = records;
        true
    }

    /// Unconditionally swap the contents.
    pub fn replace(&mut self, records: Vec<TicketRecord>) {
        self.records = records;
    }

    /// Linear scan by database id.
    pub fn find_by_id(&self, id: DbId) -> Option<&TicketRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn records(&self) -> &[TicketRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
