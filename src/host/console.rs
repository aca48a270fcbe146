//! Terminal page used by the command-line driver.

use std::io::Write;

use crate::portal::{DocumentCard, PageLink, PaginationView};

use super::{HistoryEntry, Page, SurfaceError};

/// Prints the listing to a writer and remembers where history and
/// navigation would have gone.
#[derive(Debug)]
pub struct ConsolePage<W: Write> {
    out: W,
    url: Option<String>,
    fallback: Option<String>,
}

impl<W: Write> ConsolePage<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            url: None,
            fallback: None,
        }
    }

    /// URL recorded by the last successful refresh.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Target of a full-navigation fallback, if one happened.
    pub fn fallback(&self) -> Option<&str> {
        self.fallback.as_deref()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_line(&mut self, line: &str) -> Result<(), SurfaceError> {
        writeln!(self.out, "{line}").map_err(|err| SurfaceError::Render(err.to_string()))
    }
}

fn card_line(card: &DocumentCard) -> String {
    let mut line = format!("- [{}] {}", card.id, card.title);
    let details: Vec<&str> = [&card.document_type, &card.year, &card.indicator]
        .into_iter()
        .filter_map(|value| value.as_deref())
        .collect();
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    if card.audio_url.is_some() {
        line.push_str(" ♪");
    }
    line
}

fn pagination_line(view: &PaginationView) -> String {
    let links: Vec<String> = view
        .links
        .iter()
        .map(|link| match link {
            PageLink::Page { current: true, .. } => format!("[{}]", link.label()),
            _ => link.label(),
        })
        .collect();
    format!("Pages: {}", links.join(" "))
}

impl<W: Write> Page for ConsolePage<W> {
    fn show_loading(&mut self) {
        tracing::debug!("Loading results…");
    }

    fn hide_loading(&mut self) {}

    fn replace_grid(&mut self, cards: &[DocumentCard]) -> Result<(), SurfaceError> {
        for card in cards {
            self.write_line(&card_line(card))?;
        }
        Ok(())
    }

    fn set_result_count(&mut self, text: &str) -> Result<(), SurfaceError> {
        self.write_line(text)
    }

    fn replace_pagination(&mut self, view: &PaginationView) -> Result<(), SurfaceError> {
        self.write_line(&pagination_line(view))
    }

    fn remove_pagination(&mut self) {}

    fn push_history(&mut self, _entry: &HistoryEntry, url: &str) {
        self.url = Some(url.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.fallback = Some(url.to_string());
    }

    fn reload(&mut self) {
        tracing::debug!("Reload requested; nothing to reload in the console");
    }

    fn focus_search(&mut self) {}

    fn set_search_text(&mut self, _text: &str) {}

    fn show_suggestions(&mut self, items: &[String]) {
        for item in items {
            if let Err(err) = self.write_line(&format!("  ? {item}")) {
                tracing::debug!("Suggestion output failed: {err}");
                return;
            }
        }
    }

    fn hide_suggestions(&mut self) {}

    fn play_audio(&mut self, src: &str) {
        tracing::info!("Would play {src}");
    }

    fn play_hover_sound(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::portal::PaginationDescriptor;

    #[test]
    fn prints_cards_count_and_pages() {
        let mut page = ConsolePage::new(Vec::new());
        let cards = vec![
            DocumentCard {
                id: "pub-7".to_string(),
                title: "Statistik Pendidikan".to_string(),
                document_type: Some("publikasi".to_string()),
                year: Some("2023".to_string()),
                indicator: None,
                summary: None,
                url: None,
                audio_url: Some("/audio/pub-7.mp3".to_string()),
            },
        ];
        page.replace_grid(&cards).unwrap();
        page.set_result_count("1 document found").unwrap();
        let view = PaginationView::from_descriptor(&PaginationDescriptor {
            current_page: 1,
            last_page: 2,
        })
        .unwrap();
        page.replace_pagination(&view).unwrap();
        page.push_history(
            &HistoryEntry {
                path: "/publikasi?page=1".to_string(),
            },
            "/publikasi?page=1",
        );

        assert_eq!(page.url(), Some("/publikasi?page=1"));
        assert_eq!(page.fallback(), None);
        let text = String::from_utf8(page.into_inner()).unwrap();
        assert_eq!(
            text,
            "- [pub-7] Statistik Pendidikan (publikasi, 2023) ♪\n1 document found\nPages: [1] 2 »\n"
        );
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::from(std::io::ErrorKind::BrokenPipe))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn suggestions_are_listed_and_write_failures_are_contained() {
        let mut page = ConsolePage::new(Vec::new());
        page.show_suggestions(&["inflasi".to_string(), "inflasi tahunan".to_string()]);
        let text = String::from_utf8(page.into_inner()).unwrap();
        assert_eq!(text, "  ? inflasi\n  ? inflasi tahunan\n");

        let mut broken = ConsolePage::new(ClosedPipe);
        broken.show_suggestions(&["ekspor".to_string()]);
        assert!(matches!(
            broken.set_result_count("0 documents found"),
            Err(SurfaceError::Render(_))
        ));
    }
}
