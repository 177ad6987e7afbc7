//! Client-side pagination over the list cache.
//!
//! [`PageView::derive`] is a pure function of the cached records and the
//! current [`PageState`]; it is recomputed on every render.

use serde::Serialize;

use crate::ticket::TicketRecord;

/// Rows per page used by the desk.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Text rendered in place of the table when a page has no rows.
pub const EMPTY_PLACEHOLDER: &str = "No hay registros encontrados";

/// Number of pages needed for `total` records. Zero when there are none.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    total.div_ceil(page_size.max(1))
}

// ---------------------------------------------------------------------------
// Page state
// ---------------------------------------------------------------------------

/// The current 1-based page and the fixed page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// A page size of zero is treated as one.
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Back to page 1. Called after every accepted load.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Move to `page` if it exists for `total` records.
    ///
    /// Out-of-range requests leave the state unchanged and return `false`.
    /// Page 0 is always rejected; when empty, only page 1 is accepted.
    pub fn set_page(&mut self, page: usize, total: usize) -> bool {
        let last = total_pages(total, self.page_size).max(1);
        if page < 1 || page > last {
            return false;
        }
        self.current = page;
        true
    }

    /// Pull the current page back inside `[1, max(1, total_pages)]`.
    pub fn clamp(&mut self, total: usize) {
        let last = total_pages(total, self.page_size).max(1);
        self.current = self.current.clamp(1, last);
    }
}

// ---------------------------------------------------------------------------
// Derived view
// ---------------------------------------------------------------------------

/// A visible row. `position` counts within the current filter and is never
/// the database id; the id stays on `record` as the action target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageRow {
    pub position: usize,
    pub record: TicketRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub number: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView {
    pub rows: Vec<PageRow>,
    /// True when the page has no rows and the placeholder must be shown.
    pub placeholder: bool,
    pub links: Vec<PageLink>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_records: usize,
}

impl PageView {
    pub fn derive(records: &[TicketRecord], state: &PageState) -> Self {
        let total = records.len();
        let page_size = state.page_size();
        let current = state.current();
        let pages = total_pages(total, page_size);

        let start = (current - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(total);
        let rows: Vec<PageRow> = records
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(i, record)| PageRow {
                position: start + i + 1,
                record: record.clone(),
            })
            .collect();

        let links = (1..=pages)
            .map(|number| PageLink {
                number,
                active: number == current,
            })
            .collect();

        Self {
            placeholder: rows.is_empty(),
            rows,
            links,
            prev_enabled: current > 1,
            next_enabled: current < pages,
            current_page: current,
            total_pages: pages,
            total_records: total,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Mostrando {} de {} registros",
            self.rows.len(),
            self.total_records
        )
    }
}
