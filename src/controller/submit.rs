use super::*;

impl<P: Page> FilterSyncController<P> {
    /// Submit the current form as a first-page listing request.
    ///
    /// While the submit guard is open an identical query is dropped and a
    /// different one is held until the guard closes; only the newest held
    /// submission survives.
    pub fn submit_filters(&mut self, now: Instant) {
        self.debounce.cancel();
        let state = FilterState::from_form(&self.form, self.settings.text_param);
        if self.guard.is_open(now) {
            let query = state.to_query();
            if self.guard.guards(&query) {
                tracing::debug!("Dropping duplicate submission {query}");
                self.pending_submit = None;
            } else {
                tracing::debug!("Holding submission {query} until the submit guard closes");
                self.pending_submit = Some(state);
            }
            return;
        }
        self.dispatch_submission(state, now);
    }

    pub(super) fn dispatch_submission(&mut self, state: FilterState, now: Instant) {
        self.pending_submit = None;
        self.guard.open(now, state.to_query());
        let url = state.request_url(&self.settings.page_path);
        self.start_refresh(url, HistoryUpdate::Push);
    }
}
