use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::jobs::SuggestionResult;
use super::*;

/// Order suggestions by fuzzy match against the typed term.
///
/// Duplicates (case-insensitive) are dropped; entries that do not match keep
/// their server order after the matching ones.
pub(crate) fn rank_suggestions(term: &str, items: Vec<String>) -> Vec<String> {
    let matcher = SkimMatcherV2::default().ignore_case();
    let mut seen = HashSet::new();
    let mut scored: Vec<(Option<i64>, usize, String)> = items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .enumerate()
        .map(|(index, item)| (matcher.fuzzy_match(&item, term), index, item))
        .collect();
    scored.sort_by(|a, b| match (a.0, b.0) {
        (Some(left), Some(right)) => right.cmp(&left).then_with(|| a.1.cmp(&b.1)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    });
    scored.into_iter().map(|(_, _, item)| item).collect()
}

impl<P: Page> FilterSyncController<P> {
    pub(super) fn request_suggestions(&mut self) {
        let term = self.form.text.trim().to_string();
        if term.chars().count() < self.settings.suggestion_min_chars {
            self.suggestion_requests.invalidate();
            self.page.hide_suggestions();
            return;
        }
        let token = self.suggestion_requests.issue();
        self.jobs.spawn_suggestions(token, term);
    }

    pub(super) fn handle_suggestions_fetched(&mut self, message: SuggestionResult) {
        if !self.suggestion_requests.is_current(message.token) {
            tracing::debug!("Discarding stale suggestions for {:?}", message.term);
            return;
        }
        match message.result {
            Ok(items) if !items.is_empty() => {
                let ranked = rank_suggestions(&message.term, items);
                self.page.show_suggestions(&ranked);
            }
            Ok(_) => self.page.hide_suggestions(),
            Err(err) => {
                tracing::debug!("Suggestions for {:?} unavailable: {err}", message.term);
                self.page.hide_suggestions();
            }
        }
    }

    /// A suggestion was picked from the panel.
    pub fn choose_suggestion(&mut self, value: &str, now: Instant) {
        self.suggestion_requests.invalidate();
        self.form.set(FilterField::Text, value);
        self.page.set_search_text(value);
        self.page.hide_suggestions();
        self.submit_filters(now);
    }
}
