//! Client-side pagination links built from the server's page descriptor.

use super::contract::PaginationDescriptor;

/// Pages shown on either side of the current one.
const WINDOW: u32 = 2;

/// One entry of the pagination block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageLink {
    Previous(u32),
    Page { number: u32, current: bool },
    /// Ellipsis between non-adjacent page numbers.
    Gap,
    Next(u32),
}

impl PageLink {
    /// Page a click on this link navigates to; the current page and gaps have none.
    pub fn target(self) -> Option<u32> {
        match self {
            Self::Previous(page) | Self::Next(page) => Some(page),
            Self::Page { number, current } => (!current).then_some(number),
            Self::Gap => None,
        }
    }

    pub fn label(self) -> String {
        match self {
            Self::Previous(_) => "«".to_string(),
            Self::Page { number, .. } => number.to_string(),
            Self::Gap => "…".to_string(),
            Self::Next(_) => "»".to_string(),
        }
    }
}

/// Rendered pagination block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaginationView {
    pub current_page: u32,
    pub last_page: u32,
    pub links: Vec<PageLink>,
}

impl PaginationView {
    /// Build the link list, or `None` when a single page needs no pagination.
    pub fn from_descriptor(descriptor: &PaginationDescriptor) -> Option<Self> {
        let last = descriptor.last_page;
        if last <= 1 {
            return None;
        }
        let current = descriptor.current_page.clamp(1, last);
        let mut links = Vec::new();
        if current > 1 {
            links.push(PageLink::Previous(current - 1));
        }
        let window_start = current.saturating_sub(WINDOW).max(1);
        let window_end = current.saturating_add(WINDOW).min(last);
        let mut shown: Vec<u32> = Vec::with_capacity(2 * WINDOW as usize + 3);
        shown.push(1);
        shown.extend(window_start..=window_end);
        shown.push(last);
        shown.dedup();
        let mut previous_shown = 0;
        for number in shown {
            if previous_shown != 0 && number > previous_shown + 1 {
                links.push(PageLink::Gap);
            }
            links.push(PageLink::Page {
                number,
                current: number == current,
            });
            previous_shown = number;
        }
        if current < last {
            links.push(PageLink::Next(current + 1));
        }
        Some(Self {
            current_page: current,
            last_page: last,
            links,
        })
    }

    /// True when some link in the block leads to `page`.
    pub fn links_to(&self, page: u32) -> bool {
        self.links.iter().any(|link| link.target() == Some(page))
    }
}
