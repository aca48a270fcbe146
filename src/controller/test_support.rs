use super::*;
use crate::host::RecordingPage;
use crate::portal::{FetchError, GridPayload, PaginationDescriptor};
use std::collections::HashMap;
use std::sync::Mutex;

pub(super) const PAGE_PATH: &str = "/publikasi";

#[derive(Clone, Debug)]
pub(super) enum GridScript {
    Payload(GridPayload),
    Status(u16),
    Malformed,
}

#[derive(Clone, Debug)]
pub(super) enum SuggestionScript {
    Items(Vec<String>),
    Status(u16),
}

/// Transport answering from canned responses and logging every request.
#[derive(Default)]
pub(super) struct ScriptedTransport {
    grids: Mutex<HashMap<String, (GridScript, Duration)>>,
    suggestions: Mutex<HashMap<String, SuggestionScript>>,
    grid_requests: Mutex<Vec<String>>,
    suggestion_requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub(super) fn script(&self, url: &str, script: GridScript) {
        self.script_delayed(url, script, Duration::ZERO);
    }

    pub(super) fn script_delayed(&self, url: &str, script: GridScript, delay: Duration) {
        self.grids
            .lock()
            .unwrap()
            .insert(url.to_string(), (script, delay));
    }

    pub(super) fn script_suggestions(&self, term: &str, script: SuggestionScript) {
        self.suggestions
            .lock()
            .unwrap()
            .insert(term.to_string(), script);
    }

    pub(super) fn grid_requests(&self) -> Vec<String> {
        self.grid_requests.lock().unwrap().clone()
    }

    pub(super) fn suggestion_requests(&self) -> Vec<String> {
        self.suggestion_requests.lock().unwrap().clone()
    }
}

impl GridTransport for ScriptedTransport {
    fn fetch_grid(&self, url: &str) -> Result<GridPayload, FetchError> {
        self.grid_requests.lock().unwrap().push(url.to_string());
        let scripted = self.grids.lock().unwrap().get(url).cloned();
        let Some((script, delay)) = scripted else {
            return Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            });
        };
        std::thread::sleep(delay);
        match script {
            GridScript::Payload(payload) => Ok(payload),
            GridScript::Status(status) => Err(FetchError::Status {
                status,
                url: url.to_string(),
            }),
            GridScript::Malformed => Ok(GridPayload::parse("<ul class=\"grid\"></ul>")?),
        }
    }

    fn fetch_suggestions(&self, term: &str) -> Result<Vec<String>, FetchError> {
        self.suggestion_requests.lock().unwrap().push(term.to_string());
        match self.suggestions.lock().unwrap().get(term).cloned() {
            Some(SuggestionScript::Items(items)) => Ok(items),
            Some(SuggestionScript::Status(status)) => Err(FetchError::Status {
                status,
                url: format!("/api/search-suggestions?q={term}"),
            }),
            None => Ok(Vec::new()),
        }
    }
}

pub(super) fn card(id: &str) -> DocumentCard {
    DocumentCard {
        id: id.to_string(),
        title: format!("Publikasi {id}"),
        document_type: Some("publikasi".to_string()),
        year: None,
        indicator: None,
        summary: None,
        url: Some(format!("/publikasi/{id}")),
        audio_url: Some(format!("/audio/{id}.mp3")),
    }
}

pub(super) fn payload(ids: &[&str], pages: Option<(u32, u32)>) -> GridPayload {
    GridPayload {
        cards: ids.iter().map(|id| card(id)).collect(),
        total: ids.len() as u64,
        count_text: None,
        pagination: pages.map(|(current_page, last_page)| PaginationDescriptor {
            current_page,
            last_page,
        }),
    }
}

pub(super) fn test_config() -> FilterSyncConfig {
    FilterSyncConfig {
        page_path: PAGE_PATH.to_string(),
        ..FilterSyncConfig::default()
    }
}

pub(super) fn controller_with(
    transport: &Arc<ScriptedTransport>,
) -> FilterSyncController<RecordingPage> {
    let shared: Arc<dyn GridTransport> = transport.clone();
    FilterSyncController::new(RecordingPage::new(PAGE_PATH), shared, &test_config())
}

pub(super) fn settle(controller: &mut FilterSyncController<RecordingPage>) {
    assert!(
        controller.wait_for_idle(Duration::from_secs(5)),
        "fetches did not finish"
    );
}

pub(super) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}
