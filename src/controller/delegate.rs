//! Container-level event delegation for cards and pagination links.
//!
//! Rendered elements carry `data-action`, `data-card-id` and `data-page`
//! attributes. One listener on the results container resolves them against the
//! binding table of the latest render, so replacing the grid never leaves
//! stale per-element handlers behind.

use std::collections::HashMap;

use super::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEvent {
    Click,
    Hover,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DelegatedAction {
    PlayAudio { card_id: String, src: String },
    HoverSound { card_id: String },
    Paginate { page: u32 },
}

/// Binding table rebuilt after every render.
#[derive(Debug, Default)]
pub struct ActionDelegate {
    /// Card id to audio source; `None` for cards without audio.
    cards: HashMap<String, Option<String>>,
    pagination: Option<PaginationView>,
}

impl ActionDelegate {
    pub fn rebind(&mut self, cards: &[DocumentCard], pagination: Option<&PaginationView>) {
        self.cards = cards
            .iter()
            .map(|card| (card.id.clone(), card.audio_url.clone()))
            .collect();
        self.pagination = pagination.cloned();
    }

    pub fn resolve(&self, event: PointerEvent, target: &ElementTarget) -> Option<DelegatedAction> {
        match event {
            PointerEvent::Click => self.resolve_click(target),
            PointerEvent::Hover => self.resolve_hover(target),
        }
    }

    fn resolve_click(&self, target: &ElementTarget) -> Option<DelegatedAction> {
        match target.attr("data-action")? {
            "play" => {
                let card_id = target.attr("data-card-id")?;
                let src = self.cards.get(card_id)?.clone()?;
                Some(DelegatedAction::PlayAudio {
                    card_id: card_id.to_string(),
                    src,
                })
            }
            "paginate" => {
                let page = target.attr("data-page")?.trim().parse::<u32>().ok()?;
                self.pagination
                    .as_ref()
                    .is_some_and(|view| view.links_to(page))
                    .then_some(DelegatedAction::Paginate { page })
            }
            _ => None,
        }
    }

    fn resolve_hover(&self, target: &ElementTarget) -> Option<DelegatedAction> {
        target.attr("data-hover-sound")?;
        let card_id = target.attr("data-card-id")?;
        self.cards
            .contains_key(card_id)
            .then(|| DelegatedAction::HoverSound {
                card_id: card_id.to_string(),
            })
    }
}

impl<P: Page> FilterSyncController<P> {
    /// Point the delegated listener at the cards and links now on the page.
    pub fn rewire_dynamic_handlers(&mut self) {
        self.delegate
            .rebind(&self.rendered.cards, self.rendered.pagination.as_ref());
        tracing::debug!(
            "Rebound delegated actions for {} cards",
            self.rendered.cards.len()
        );
    }

    /// Click inside the results container or pagination block.
    ///
    /// Returns true when the event was handled and default navigation must be
    /// suppressed.
    pub fn on_click(&mut self, target: &ElementTarget) -> bool {
        self.dispatch_pointer(PointerEvent::Click, target)
    }

    /// Pointer entered an element inside the results container.
    pub fn on_hover(&mut self, target: &ElementTarget) -> bool {
        self.dispatch_pointer(PointerEvent::Hover, target)
    }

    fn dispatch_pointer(&mut self, event: PointerEvent, target: &ElementTarget) -> bool {
        let Some(action) = self.delegate.resolve(event, target) else {
            return false;
        };
        match action {
            DelegatedAction::PlayAudio { src, .. } => self.page.play_audio(&src),
            DelegatedAction::HoverSound { .. } => self.page.play_hover_sound(),
            DelegatedAction::Paginate { page } => self.go_to_page(page),
        }
        true
    }
}
