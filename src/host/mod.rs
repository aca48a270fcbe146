//! The browsing context the controller drives.
//!
//! Embedders implement [`Page`] over whatever owns the listing: a DOM binding,
//! a terminal, or the recording host used in tests.

pub mod console;
pub mod recording;

use std::collections::BTreeMap;

use crate::portal::{DocumentCard, PaginationView};

pub use console::ConsolePage;
pub use recording::{PageEvent, RecordingPage};

/// A write to the page surface could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("Page element missing: {0}")]
    MissingElement(&'static str),
    #[error("Render failed: {0}")]
    Render(String),
}

/// State object stored with each pushed history entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: String,
}

/// Attributes of the element an event landed on.
///
/// Dynamic elements identify themselves with `data-*` attributes so a single
/// container-level listener can serve every render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElementTarget {
    attributes: BTreeMap<String, String>,
}

impl ElementTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Play button of a card.
    pub fn play_button(card_id: &str) -> Self {
        Self::new()
            .with("data-action", "play")
            .with("data-card-id", card_id)
    }

    /// Card surface that chirps on hover.
    pub fn hover_sound(card_id: &str) -> Self {
        Self::new()
            .with("data-hover-sound", "")
            .with("data-card-id", card_id)
    }

    /// Link inside the pagination block.
    pub fn page_link(page: u32) -> Self {
        Self::new()
            .with("data-action", "paginate")
            .with("data-page", page.to_string())
    }
}

/// Surface, history and audio of the listing page.
pub trait Page {
    fn show_loading(&mut self);
    fn hide_loading(&mut self);

    /// Replace every card in the result grid.
    fn replace_grid(&mut self, cards: &[DocumentCard]) -> Result<(), SurfaceError>;
    fn set_result_count(&mut self, text: &str) -> Result<(), SurfaceError>;
    fn replace_pagination(&mut self, view: &PaginationView) -> Result<(), SurfaceError>;
    fn remove_pagination(&mut self);

    /// Record `url` as a new history entry without navigating.
    fn push_history(&mut self, entry: &HistoryEntry, url: &str);
    /// Full navigation to `url`.
    fn navigate(&mut self, url: &str);
    fn reload(&mut self);

    fn focus_search(&mut self);
    fn set_search_text(&mut self, text: &str);
    fn show_suggestions(&mut self, items: &[String]);
    fn hide_suggestions(&mut self);

    fn play_audio(&mut self, src: &str);
    fn play_hover_sound(&mut self);
}
