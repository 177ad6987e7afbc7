//! The desk orchestrator.
//!
//! [`TicketDesk`] ties the list cache, page state, route filter and edit
//! session to a [`RecordStore`]. The state lock is never held across a
//! remote call: every load takes a [`LoadToken`](pasajes_core::list_cache::LoadToken)
//! before the request and only the newest load may replace the cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use pasajes_core::edit_session::{EditMode, EditSession, FormField, Selections, Submission, TicketForm};
use pasajes_core::filter::RouteFilter;
use pasajes_core::list_cache::ListCache;
use pasajes_core::pagination::{PageState, PageView};
use pasajes_core::ticket::Lookups;
use pasajes_core::types::{Date, DbId};
use tokio::sync::Mutex;

use crate::config::{DeskConfig, ReloadPolicy};
use crate::notice::{self, Notice};
use crate::store::{LookupList, RecordStore};

/// File name used for downloaded reports.
pub const REPORT_FILE_NAME: &str = "Reporte.csv";

#[derive(Debug)]
struct DeskState {
    cache: ListCache,
    page: PageState,
    filter: RouteFilter,
    session: EditSession,
    lookups: Lookups,
    notices: Vec<Notice>,
}

/// Everything a front-end needs to draw the desk.
#[derive(Debug, Clone)]
pub struct DeskSnapshot {
    pub view: PageView,
    pub filter: RouteFilter,
    pub mode: EditMode,
    pub title: String,
    pub submit_label: &'static str,
    pub form: TicketForm,
    pub lookups: Lookups,
}

pub struct TicketDesk<S> {
    store: Arc<S>,
    config: Arc<DeskConfig>,
    state: Arc<Mutex<DeskState>>,
}

impl<S> Clone for TicketDesk<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: Arc::clone(&self.config),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: RecordStore> TicketDesk<S> {
    /// `today` is the date a blank form starts with.
    pub fn new(store: Arc<S>, config: DeskConfig, today: Date) -> Self {
        let state = DeskState {
            cache: ListCache::new(),
            page: PageState::new(config.page_size),
            filter: RouteFilter::All,
            session: EditSession::new(today),
            lookups: Lookups::default(),
            notices: Vec::new(),
        };
        Self {
            store,
            config: Arc::new(config),
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    /// Load the selection lists, then every record.
    pub async fn start(&self) {
        self.load_lookups().await;
        self.load(RouteFilter::All).await;
    }

    /// Reload the selection lists. A failure of any list keeps the
    /// previous lists.
    pub async fn load_lookups(&self) -> bool {
        let (routes, units, fare_types) = tokio::join!(
            self.store.list_lookup(LookupList::Routes),
            self.store.list_lookup(LookupList::Units),
            self.store.list_lookup(LookupList::FareTypes),
        );

        let mut state = self.state.lock().await;
        match (routes, units, fare_types) {
            (Ok(routes), Ok(units), Ok(fare_types)) => {
                tracing::debug!(
                    routes = routes.len(),
                    units = units.len(),
                    fare_types = fare_types.len(),
                    "Lookups loaded"
                );
                state.lookups = Lookups {
                    routes,
                    units,
                    fare_types,
                };
                true
            }
            (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
                tracing::warn!(error = %e, "Failed to load lookups");
                state.notices.push(Notice::error(notice::LOOKUPS_FAILED_TEXT));
                false
            }
        }
    }

    /// Replace the cache with the records matching `filter`.
    pub async fn apply_filter(&self, filter: RouteFilter) -> bool {
        self.load(filter).await
    }

    /// Re-run the active filter.
    pub async fn reload(&self) -> bool {
        let filter = self.state.lock().await.filter;
        self.load(filter).await
    }

    /// Returns `false` when the load failed or a newer load superseded it.
    async fn load(&self, filter: RouteFilter) -> bool {
        let token = self.state.lock().await.cache.begin_load();

        let result = match filter {
            RouteFilter::All => self.store.list_all().await,
            RouteFilter::Route(id) => self.store.list_by_route(id).await,
        };

        let mut state = self.state.lock().await;
        match result {
            Ok(records) => {
                let count = records.len();
                if !state.cache.complete_load(token, records) {
                    tracing::debug!(token = token.value(), %filter, "Discarding stale load");
                    return false;
                }
                state.filter = filter;
                state.page.reset();
                tracing::debug!(token = token.value(), %filter, count, "Records loaded");
                true
            }
            Err(e) => {
                if state.cache.is_current(token) {
                    tracing::warn!(error = %e, %filter, "Failed to load records");
                    state.notices.push(Notice::error(e.user_message()));
                }
                false
            }
        }
    }

    /// Go to page `page`. Pages outside the current range are ignored.
    pub async fn set_page(&self, page: usize) -> bool {
        let mut state = self.state.lock().await;
        let total = state.cache.len();
        state.page.set_page(page, total)
    }

    pub async fn next_page(&self) -> bool {
        let mut state = self.state.lock().await;
        let (next, total) = (state.page.current() + 1, state.cache.len());
        state.page.set_page(next, total)
    }

    pub async fn prev_page(&self) -> bool {
        let mut state = self.state.lock().await;
        let Some(prev) = state.page.current().checked_sub(1) else {
            return false;
        };
        let total = state.cache.len();
        state.page.set_page(prev, total)
    }

    /// Enter edit mode for the cached record `id`.
    ///
    /// An id that is no longer in the cache leaves the session untouched
    /// and reports it.
    pub async fn begin_edit(&self, id: DbId) -> bool {
        let mut state = self.state.lock().await;
        let state = &mut *state;

        let Some(record) = state.cache.find_by_id(id) else {
            tracing::debug!(ticket_id = id, "Edit target not in cache");
            state.notices.push(Notice::error(notice::STALE_EDIT_TEXT));
            return false;
        };

        let (selections, hint) = if self.config.prefill_selections {
            (
                Selections::from_labels(record, &state.lookups),
                notice::PREFILLED_TEXT,
            )
        } else {
            (Selections::default(), notice::RESELECT_TEXT)
        };
        state.session.begin_edit(record, selections);
        state.notices.push(Notice::info(notice::EDIT_MODE_TITLE, hint));
        true
    }

    pub async fn cancel_edit(&self) {
        self.state.lock().await.session.cancel();
    }

    /// Set one form field. Malformed selections are reported, not stored.
    pub async fn update_form(&self, field: FormField, value: &str) -> bool {
        let mut state = self.state.lock().await;
        match state.session.set_field(field, value) {
            Ok(()) => true,
            Err(e) => {
                state.notices.push(Notice::error(e.to_string()));
                false
            }
        }
    }

    /// Create or update from the form, then reload per the reload policy.
    pub async fn submit(&self) -> bool {
        let submission = {
            let mut state = self.state.lock().await;
            match state.session.submission() {
                Ok(submission) => submission,
                Err(e) => {
                    state.notices.push(Notice::error(e.to_string()));
                    return false;
                }
            }
        };

        let (result, title) = match &submission {
            Submission::Create(input) => (
                self.store.create(input).await.map(|id| {
                    tracing::info!(ticket_id = id, "Ticket created");
                }),
                notice::SAVED_TITLE,
            ),
            Submission::Update { id, input } => (
                self.store.update(*id, input).await.map(|()| {
                    tracing::info!(ticket_id = id, "Ticket updated");
                }),
                notice::UPDATED_TITLE,
            ),
        };

        {
            let mut state = self.state.lock().await;
            if let Err(e) = result {
                tracing::warn!(error = %e, target_id = ?submission.target_id(), "Save rejected");
                state.notices.push(Notice::error(e.user_message()));
                return false;
            }
            state.session.finish();
            state
                .notices
                .push(Notice::success(title, notice::SAVE_SUCCESS_TEXT));
        }

        self.reload_after_write().await;
        true
    }

    /// Delete `id` on the server. Confirmation is the caller's job.
    pub async fn delete(&self, id: DbId) -> bool {
        let result = self.store.delete(id).await;

        {
            let mut state = self.state.lock().await;
            if let Err(e) = result {
                tracing::warn!(error = %e, ticket_id = id, "Delete rejected");
                state.notices.push(Notice::error(e.user_message()));
                return false;
            }
            tracing::info!(ticket_id = id, "Ticket deleted");
            state.session.finish();
            state
                .notices
                .push(Notice::success(notice::DELETED_TITLE, notice::DELETED_TEXT));
        }

        self.reload_after_write().await;
        true
    }

    async fn reload_after_write(&self) {
        match self.config.reload_policy {
            ReloadPolicy::AllRecords => {
                self.load(RouteFilter::All).await;
            }
            ReloadPolicy::KeepFilter => {
                self.reload().await;
            }
        }
    }

    /// Download the CSV report into `dest_dir` as [`REPORT_FILE_NAME`].
    pub async fn export_csv(&self, dest_dir: &Path) -> Option<PathBuf> {
        self.push_notice(Notice::loading(notice::EXPORT_LOADING_TEXT)).await;

        let report = match self.store.export_csv().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!(error = %e, "Export failed");
                let text = if e.is_transport() {
                    e.user_message()
                } else {
                    notice::EXPORT_FAILED_TEXT.to_string()
                };
                self.push_notice(Notice::error(text)).await;
                return None;
            }
        };

        let path = dest_dir.join(REPORT_FILE_NAME);
        if let Err(e) = tokio::fs::write(&path, &report.bytes).await {
            tracing::error!(error = %e, path = %path.display(), "Failed to write report");
            self.push_notice(Notice::error(notice::EXPORT_FAILED_TEXT)).await;
            return None;
        }

        tracing::info!(
            server_name = report.file_name.as_deref().unwrap_or(""),
            path = %path.display(),
            bytes = report.bytes.len(),
            "Report downloaded"
        );
        self.push_notice(Notice::success("Éxito", notice::EXPORT_SUCCESS_TEXT)).await;
        Some(path)
    }

    pub async fn page_view(&self) -> PageView {
        let state = self.state.lock().await;
        PageView::derive(state.cache.records(), &state.page)
    }

    pub async fn snapshot(&self) -> DeskSnapshot {
        let state = self.state.lock().await;
        DeskSnapshot {
            view: PageView::derive(state.cache.records(), &state.page),
            filter: state.filter,
            mode: state.session.mode(),
            title: state.session.title(),
            submit_label: state.session.submit_label(),
            form: state.session.form().clone(),
            lookups: state.lookups.clone(),
        }
    }

    /// Notices produced since the last call, oldest first.
    pub async fn take_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().await.notices)
    }

    async fn push_notice(&self, notice: Notice) {
        self.state.lock().await.notices.push(notice);
    }
}
