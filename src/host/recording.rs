//! In-memory page that records every call.

use crate::portal::{DocumentCard, PaginationView};

use super::{HistoryEntry, Page, SurfaceError};

/// Calls observed by a [`RecordingPage`], in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageEvent {
    ShowLoading,
    HideLoading,
    ReplaceGrid(Vec<String>),
    SetResultCount(String),
    ReplacePagination(u32, u32),
    RemovePagination,
    PushHistory(String),
    Navigate(String),
    Reload,
    FocusSearch,
    SetSearchText(String),
    ShowSuggestions(Vec<String>),
    HideSuggestions,
    PlayAudio(String),
    HoverSound,
}

/// Headless page keeping the latest rendered state plus an event log.
#[derive(Clone, Debug)]
pub struct RecordingPage {
    pub url: String,
    pub events: Vec<PageEvent>,
    pub history: Vec<(HistoryEntry, String)>,
    pub grid: Vec<String>,
    pub result_count: String,
    pub pagination: Option<PaginationView>,
    pub loading: bool,
    pub search_text: String,
    pub suggestions: Option<Vec<String>>,
    /// When set, grid replacement fails as a broken container would.
    pub fail_grid_writes: bool,
}

impl RecordingPage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            events: Vec::new(),
            history: Vec::new(),
            grid: Vec::new(),
            result_count: String::new(),
            pagination: None,
            loading: false,
            search_text: String::new(),
            suggestions: None,
            fail_grid_writes: false,
        }
    }

    pub fn navigations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                PageEvent::Navigate(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn reloads(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, PageEvent::Reload))
            .count()
    }

    pub fn clear_events(&mut self) {
        self.events.clear();
    }
}

impl Page for RecordingPage {
    fn show_loading(&mut self) {
        self.loading = true;
        self.events.push(PageEvent::ShowLoading);
    }

    fn hide_loading(&mut self) {
        self.loading = false;
        self.events.push(PageEvent::HideLoading);
    }

    fn replace_grid(&mut self, cards: &[DocumentCard]) -> Result<(), SurfaceError> {
        if self.fail_grid_writes {
            return Err(SurfaceError::MissingElement("result grid"));
        }
        self.grid = cards.iter().map(|card| card.id.clone()).collect();
        self.events.push(PageEvent::ReplaceGrid(self.grid.clone()));
        Ok(())
    }

    fn set_result_count(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.result_count = text.to_string();
        self.events.push(PageEvent::SetResultCount(text.to_string()));
        Ok(())
    }

    fn replace_pagination(&mut self, view: &PaginationView) -> Result<(), SurfaceError> {
        self.pagination = Some(view.clone());
        self.events
            .push(PageEvent::ReplacePagination(view.current_page, view.last_page));
        Ok(())
    }

    fn remove_pagination(&mut self) {
        self.pagination = None;
        self.events.push(PageEvent::RemovePagination);
    }

    fn push_history(&mut self, entry: &HistoryEntry, url: &str) {
        self.url = url.to_string();
        self.history.push((entry.clone(), url.to_string()));
        self.events.push(PageEvent::PushHistory(url.to_string()));
    }

    fn navigate(&mut self, url: &str) {
        self.url = url.to_string();
        self.events.push(PageEvent::Navigate(url.to_string()));
    }

    fn reload(&mut self) {
        self.events.push(PageEvent::Reload);
    }

    fn focus_search(&mut self) {
        self.events.push(PageEvent::FocusSearch);
    }

    fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.events.push(PageEvent::SetSearchText(text.to_string()));
    }

    fn show_suggestions(&mut self, items: &[String]) {
        self.suggestions = Some(items.to_vec());
        self.events.push(PageEvent::ShowSuggestions(items.to_vec()));
    }

    fn hide_suggestions(&mut self) {
        self.suggestions = None;
        self.events.push(PageEvent::HideSuggestions);
    }

    fn play_audio(&mut self, src: &str) {
        self.events.push(PageEvent::PlayAudio(src.to_string()));
    }

    fn play_hover_sound(&mut self) {
        self.events.push(PageEvent::HoverSound);
    }
}
