//! Controller settings persisted as TOML in the app directory.

mod errors;
mod io;


use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::filter::TextParam;

pub use errors::ConfigError;
pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save_to_path};

const DEFAULT_DEBOUNCE_MS: u64 = 800;
const DEFAULT_SUBMIT_GUARD_MS: u64 = 1000;
const DEFAULT_SUGGESTION_MIN_CHARS: usize = 2;
const DEFAULT_MAX_RESPONSE_BYTES: usize = 4 * 1024 * 1024;
const MIN_RESPONSE_BYTES: usize = 1024;
const MAX_QUIET_PERIOD_MS: u64 = 10_000;

/// Settings for the filter-sync controller and its HTTP transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSyncConfig {
    /// Origin the listing and suggestion endpoints are served from.
    pub base_url: String,
    /// Path of the listing page; filter queries are appended to it.
    pub page_path: String,
    /// Name of the free-text parameter on this listing.
    pub text_param: TextParam,
    /// Quiet period after the last keystroke before the text filter submits.
    pub debounce_ms: u64,
    /// Window during which further user submissions are held back.
    pub submit_guard_ms: u64,
    /// Endpoint returning a JSON array of suggestion strings.
    pub suggestions_path: String,
    /// Minimum trimmed length before suggestions are requested.
    pub suggestion_min_chars: usize,
    pub max_response_bytes: usize,
}

impl Default for FilterSyncConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            page_path: "/publikasi".to_string(),
            text_param: TextParam::Search,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            submit_guard_ms: DEFAULT_SUBMIT_GUARD_MS,
            suggestions_path: "/api/search-suggestions".to_string(),
            suggestion_min_chars: DEFAULT_SUGGESTION_MIN_CHARS,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl FilterSyncConfig {
    /// Clamp out-of-range values and make paths absolute.
    pub fn normalized(mut self) -> Self {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.page_path = absolute_path(&self.page_path);
        self.suggestions_path = absolute_path(&self.suggestions_path);
        self.debounce_ms = self.debounce_ms.min(MAX_QUIET_PERIOD_MS);
        self.submit_guard_ms = self.submit_guard_ms.min(MAX_QUIET_PERIOD_MS);
        self.suggestion_min_chars = self.suggestion_min_chars.max(1);
        self.max_response_bytes = self.max_response_bytes.max(MIN_RESPONSE_BYTES);
        self
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn submit_guard(&self) -> Duration {
        Duration::from_millis(self.submit_guard_ms)
    }

    /// Parse and validate the base URL.
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            source,
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
        }
        Ok(url)
    }
}

fn absolute_path(path: &str) -> String {
    let trimmed = path.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
