//! Fetching listing payloads and suggestions from the portal.

use url::Url;

use crate::config::{ConfigError, FilterSyncConfig};
use crate::http_client;

use super::contract::{self, ContractError, GridPayload};

/// Source of grid payloads and search suggestions.
///
/// Calls block; the controller runs them on worker threads.
pub trait GridTransport: Send + Sync {
    /// Fetch the listing for a request URL such as `/publikasi?year=2023&page=1`.
    fn fetch_grid(&self, url: &str) -> Result<GridPayload, FetchError>;

    /// Fetch suggestion strings for a partial search term.
    fn fetch_suggestions(&self, term: &str) -> Result<Vec<String>, FetchError>;
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid request URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("HTTP transport error: {0}")]
    Transport(String),
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Failed to read response body: {0}")]
    Body(String),
    #[error("Unexpected response shape: {0}")]
    Contract(#[from] ContractError),
}

/// Blocking transport over the shared `ureq` agent.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    base_url: Url,
    suggestions_path: String,
    max_response_bytes: usize,
}

impl HttpTransport {
    pub fn new(config: &FilterSyncConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: config.parsed_base_url()?,
            suggestions_path: config.suggestions_path.clone(),
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Resolve a page-relative request URL against the configured origin.
    pub fn resolve(&self, url: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(url)
            .map_err(|err| FetchError::InvalidUrl {
                url: url.to_string(),
                reason: err.to_string(),
            })
    }

    fn suggestions_url(&self, term: &str) -> Result<Url, FetchError> {
        let mut url = self.resolve(&self.suggestions_path)?;
        url.query_pairs_mut().clear().append_pair("q", term);
        Ok(url)
    }

    fn get_json_text(&self, url: &Url) -> Result<String, FetchError> {
        let request = http_client::agent()
            .get(url.as_str())
            .set("X-Requested-With", "XMLHttpRequest")
            .set("Accept", "application/json");
        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, _)) => {
                return Err(FetchError::Status {
                    status,
                    url: url.to_string(),
                });
            }
            Err(ureq::Error::Transport(err)) => {
                return Err(FetchError::Transport(err.to_string()));
            }
        };
        http_client::read_response_text(response, self.max_response_bytes)
            .map_err(|err| FetchError::Body(err.to_string()))
    }
}

impl GridTransport for HttpTransport {
    fn fetch_grid(&self, url: &str) -> Result<GridPayload, FetchError> {
        let resolved = self.resolve(url)?;
        let body = self.get_json_text(&resolved)?;
        Ok(GridPayload::parse(&body)?)
    }

    fn fetch_suggestions(&self, term: &str) -> Result<Vec<String>, FetchError> {
        let url = self.suggestions_url(term)?;
        let body = self.get_json_text(&url)?;
        Ok(contract::parse_suggestions(&body)?)
    }
}
