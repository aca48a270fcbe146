use super::*;

/// Keys the listing page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Character(char),
    Escape,
    Enter,
}

/// A single keypress plus modifier state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    /// Ctrl on Windows/Linux, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyPress {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            command: false,
            shift: false,
            alt: false,
        }
    }

    pub const fn with_command(key: Key) -> Self {
        Self {
            key,
            command: true,
            shift: false,
            alt: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ShortcutAction {
    FocusSearch,
    ClearSearch,
    SubmitNow,
}

fn shortcut_for(press: KeyPress) -> Option<ShortcutAction> {
    if press.shift || press.alt {
        return None;
    }
    match (press.key, press.command) {
        (Key::Character(ch), true) if ch.eq_ignore_ascii_case(&'f') => {
            Some(ShortcutAction::FocusSearch)
        }
        (Key::Escape, false) => Some(ShortcutAction::ClearSearch),
        (Key::Enter, false) => Some(ShortcutAction::SubmitNow),
        _ => None,
    }
}

impl<P: Page> FilterSyncController<P> {
    /// Page-level key handler. Returns true when the key was consumed.
    pub fn on_key(&mut self, press: KeyPress, now: Instant) -> bool {
        match shortcut_for(press) {
            Some(ShortcutAction::FocusSearch) => {
                self.page.focus_search();
                true
            }
            Some(ShortcutAction::ClearSearch) => self.clear_search(now),
            Some(ShortcutAction::SubmitNow) => {
                self.on_form_submit(now);
                true
            }
            None => false,
        }
    }

    /// Empty the search/query field and schedule a debounced refresh.
    fn clear_search(&mut self, now: Instant) -> bool {
        if self.form.text.is_empty() {
            return false;
        }
        self.form.clear(FilterField::Text);
        self.suggestion_requests.invalidate();
        self.page.set_search_text("");
        self.page.hide_suggestions();
        self.debounce.arm(now);
        true
    }
}
