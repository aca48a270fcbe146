use super::jobs::GridFetchResult;
use super::*;
use crate::host::SurfaceError;
use crate::portal::{FetchError, GridPayload};

/// Why a grid refresh fell back to full navigation.
#[derive(Debug, thiserror::Error)]
pub(crate) enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl<P: Page> FilterSyncController<P> {
    /// Fetch `url` and swap it into the page, recording it in history.
    ///
    /// Bypasses the submit guard. The query is rewritten into canonical order
    /// before fetching, so history and [`Self::current_url`] always agree. A
    /// URL outside the listing path is navigated to directly. Any failure ends
    /// in a full navigation to the canonical URL.
    pub fn refresh_grid(&mut self, url: impl Into<String>) {
        let url = url.into();
        match self.canonical_listing_url(&url) {
            Some(canonical) => self.start_refresh(canonical, HistoryUpdate::Push),
            None => self.leave_listing(&url),
        }
    }

    /// Show a different page of the listing currently on screen.
    pub fn go_to_page(&mut self, page: u32) {
        let url = self
            .current
            .with_page(page)
            .request_url(&self.settings.page_path);
        self.start_refresh(url, HistoryUpdate::Push);
    }

    /// Browser back/forward.
    ///
    /// Entries pushed by the controller are refetched; no listing content is
    /// cached. The initial entry carries no state and is reloaded in full.
    pub fn on_popstate(&mut self, state: Option<&HistoryEntry>) {
        let Some(entry) = state else {
            tracing::debug!("History entry without state; reloading");
            self.grid_requests.invalidate();
            self.grid_in_flight = false;
            self.page.reload();
            return;
        };
        let Some(url) = self.canonical_listing_url(&entry.path) else {
            self.leave_listing(&entry.path);
            return;
        };
        self.debounce.cancel();
        self.pending_submit = None;
        self.suggestion_requests.invalidate();
        self.form = FilterState::from_url(&url, self.settings.text_param).to_form();
        self.page.set_search_text(&self.form.text);
        self.page.hide_suggestions();
        self.start_refresh(url, HistoryUpdate::Keep);
    }

    /// `url` rebuilt from its filters, or `None` when it is not this listing.
    fn canonical_listing_url(&self, url: &str) -> Option<String> {
        let without_fragment = url.split('#').next().unwrap_or_default();
        let path = without_fragment
            .split_once('?')
            .map_or(without_fragment, |(path, _)| path);
        (path == self.settings.page_path).then(|| {
            FilterState::from_url(without_fragment, self.settings.text_param)
                .request_url(&self.settings.page_path)
        })
    }

    fn leave_listing(&mut self, url: &str) {
        tracing::debug!("{url} is outside {}; navigating", self.settings.page_path);
        self.grid_requests.invalidate();
        self.grid_in_flight = false;
        self.page.navigate(url);
    }

    pub(super) fn start_refresh(&mut self, url: String, history: HistoryUpdate) {
        let token = self.grid_requests.issue();
        tracing::debug!("Refreshing grid from {url} ({token:?})");
        self.grid_in_flight = true;
        self.page.show_loading();
        self.jobs.spawn_grid_fetch(token, url, history);
    }

    pub(super) fn handle_grid_fetched(&mut self, message: GridFetchResult) {
        let GridFetchResult {
            token,
            url,
            history,
            result,
        } = message;
        if !self.grid_requests.is_current(token) {
            tracing::debug!("Discarding stale grid response for {url} ({token:?})");
            return;
        }
        self.grid_in_flight = false;
        let applied = result
            .map_err(RefreshError::from)
            .and_then(|payload| self.apply_payload(&url, payload));
        match applied {
            Ok(()) => {
                if history == HistoryUpdate::Push {
                    self.page
                        .push_history(&HistoryEntry { path: url.clone() }, &url);
                }
                self.page.hide_loading();
                tracing::info!("Grid refreshed from {url}");
            }
            Err(err) => self.fall_back_to_navigation(&url, &err),
        }
    }

    fn apply_payload(&mut self, url: &str, payload: GridPayload) -> Result<(), RefreshError> {
        self.page.replace_grid(&payload.cards)?;
        self.page.set_result_count(&payload.count_label())?;
        let pagination = payload
            .pagination
            .as_ref()
            .and_then(PaginationView::from_descriptor);
        match &pagination {
            Some(view) => self.page.replace_pagination(view)?,
            None => self.page.remove_pagination(),
        }
        self.rendered = RenderedGrid {
            cards: payload.cards,
            pagination,
        };
        self.rewire_dynamic_handlers();
        self.current = FilterState::from_url(url, self.settings.text_param);
        Ok(())
    }

    fn fall_back_to_navigation(&mut self, url: &str, err: &RefreshError) {
        tracing::warn!("Grid refresh from {url} failed ({err}); navigating instead");
        self.page.hide_loading();
        self.page.navigate(url);
    }
}
