//! Filter-sync controller for the document listing.
//!
//! The controller is owned by the thread that owns the page. Host events
//! (`on_text_input`, `on_click`, `on_popstate`, …) carry the current time,
//! fetches run on worker threads, and [`FilterSyncController::tick`] applies
//! finished fetches and fires timers. Only the newest grid request may write to
//! the page; older ones are dropped when they land.

mod delegate;
mod hotkeys;
mod jobs;
mod refresh;
mod sequencer;
mod submit;
mod suggestions;
mod timing;

#[cfg(test)]
mod test_support;

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::FilterSyncConfig;
use crate::filter::{FilterField, FilterForm, FilterState, TextParam};
use crate::host::{ElementTarget, HistoryEntry, Page};
use crate::portal::{DocumentCard, GridTransport, PaginationView};

pub use delegate::{ActionDelegate, DelegatedAction, PointerEvent};
pub use hotkeys::{Key, KeyPress};
pub use sequencer::{RequestSequencer, RequestToken};

use jobs::{ControllerJobs, HistoryUpdate, JobMessage};
use timing::{Debouncer, SubmitGuard};

/// Settings the controller reads on every event.
#[derive(Clone, Debug)]
struct ControllerSettings {
    page_path: String,
    text_param: TextParam,
    suggestion_min_chars: usize,
}

/// Cards and pagination currently shown on the page.
#[derive(Clone, Debug, Default)]
struct RenderedGrid {
    cards: Vec<DocumentCard>,
    pagination: Option<PaginationView>,
}

/// Keeps the listing page in sync with the filter form.
pub struct FilterSyncController<P: Page> {
    page: P,
    settings: ControllerSettings,
    form: FilterForm,
    /// Filters of the listing currently on screen.
    current: FilterState,
    rendered: RenderedGrid,
    debounce: Debouncer,
    guard: SubmitGuard,
    pending_submit: Option<FilterState>,
    grid_requests: RequestSequencer,
    suggestion_requests: RequestSequencer,
    grid_in_flight: bool,
    delegate: ActionDelegate,
    jobs: ControllerJobs,
}

impl<P: Page> FilterSyncController<P> {
    pub fn new(page: P, transport: Arc<dyn GridTransport>, config: &FilterSyncConfig) -> Self {
        Self {
            page,
            settings: ControllerSettings {
                page_path: config.page_path.clone(),
                text_param: config.text_param,
                suggestion_min_chars: config.suggestion_min_chars,
            },
            form: FilterForm::default(),
            current: FilterState::new(config.text_param),
            rendered: RenderedGrid::default(),
            debounce: Debouncer::new(config.debounce()),
            guard: SubmitGuard::new(config.submit_guard()),
            pending_submit: None,
            grid_requests: RequestSequencer::default(),
            suggestion_requests: RequestSequencer::default(),
            grid_in_flight: false,
            delegate: ActionDelegate::default(),
            jobs: ControllerJobs::new(transport),
        }
    }

    /// Adopt the filters of a server-rendered page without fetching.
    pub fn load_from_url(&mut self, url: &str) {
        self.current = FilterState::from_url(url, self.settings.text_param);
        self.form = self.current.to_form();
    }

    /// Register cards that were rendered by the server with the initial page.
    pub fn adopt_rendered_grid(&mut self, cards: Vec<DocumentCard>, pagination: Option<PaginationView>) {
        self.rendered = RenderedGrid { cards, pagination };
        self.rewire_dynamic_handlers();
    }

    pub fn page(&self) -> &P {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut P {
        &mut self.page
    }

    pub fn into_page(self) -> P {
        self.page
    }

    pub fn form(&self) -> &FilterForm {
        &self.form
    }

    /// Filters of the listing currently on screen.
    pub fn current_state(&self) -> &FilterState {
        &self.current
    }

    /// URL of the listing currently on screen.
    pub fn current_url(&self) -> String {
        self.current.request_url(&self.settings.page_path)
    }

    pub fn is_refreshing(&self) -> bool {
        self.grid_in_flight
    }

    /// True while a text-input debounce is armed or a guarded submission is held.
    pub fn has_pending_input(&self) -> bool {
        self.debounce.is_armed() || self.pending_submit.is_some()
    }

    /// Set a control's value without triggering anything.
    pub fn set_field(&mut self, field: FilterField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Text typed into the search/query field.
    pub fn on_text_input(&mut self, value: impl Into<String>, now: Instant) {
        self.form.set(FilterField::Text, value);
        self.debounce.arm(now);
        self.request_suggestions();
    }

    /// A select (or the text field, if committed) changed value.
    pub fn on_field_change(&mut self, field: FilterField, value: impl Into<String>, now: Instant) {
        self.form.set(field, value);
        if field.is_debounced() {
            self.debounce.arm(now);
        } else {
            self.submit_filters(now);
        }
    }

    /// Form submitted explicitly; default navigation is suppressed.
    pub fn on_form_submit(&mut self, now: Instant) {
        self.suggestion_requests.invalidate();
        self.page.hide_suggestions();
        self.submit_filters(now);
    }

    /// Advance timers and apply every finished fetch.
    pub fn tick(&mut self, now: Instant) {
        self.poll();
        if self.guard.expire(now)
            && let Some(state) = self.pending_submit.take()
        {
            tracing::debug!("Submit guard closed; sending held filters");
            self.dispatch_submission(state, now);
        }
        if self.debounce.fire_if_due(now) {
            self.submit_filters(now);
        }
    }

    /// Apply every fetch that has already finished.
    pub fn poll(&mut self) {
        while let Some(message) = self.jobs.try_recv() {
            self.handle_job_message(message);
        }
    }

    /// Block until every spawned fetch has reported back or `timeout` passes.
    ///
    /// Returns false on timeout.
    pub fn wait_for_idle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.jobs.outstanding() > 0 {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                return false;
            }
            match self.jobs.recv_timeout(remaining) {
                Some(message) => self.handle_job_message(message),
                None => return false,
            }
        }
        true
    }

    fn handle_job_message(&mut self, message: JobMessage) {
        match message {
            JobMessage::GridFetched(result) => self.handle_grid_fetched(result),
            JobMessage::SuggestionsFetched(result) => self.handle_suggestions_fetched(result),
        }
    }
}
