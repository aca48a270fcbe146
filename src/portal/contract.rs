//! JSON shapes returned by the listing endpoint and the suggestion endpoint.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// One publication card in the result grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentCard {
    /// Stable identifier; delegated actions are keyed on it.
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indicator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Detail page for the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Spoken abstract played by the card's play button.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationDescriptor {
    pub current_page: u32,
    pub last_page: u32,
}

/// Body of a successful listing response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPayload {
    pub cards: Vec<DocumentCard>,
    /// Number of matching documents across all pages.
    pub total: u64,
    /// Server-localized count line; a plain fallback is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count_text: Option<String>,
    /// Absent when everything fits on one page.
    #[serde(default)]
    pub pagination: Option<PaginationDescriptor>,
}

#[derive(Debug, thiserror::Error)]
pub enum ContractError {
    #[error("Empty response body")]
    Empty,
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Page {current} is outside 1..={last}")]
    InvalidPagination { current: u32, last: u32 },
    #[error("Card id {0:?} appears more than once")]
    DuplicateCardId(String),
    #[error("Card with empty id")]
    EmptyCardId,
}

impl GridPayload {
    /// Decode and validate a listing response body.
    pub fn parse(body: &str) -> Result<Self, ContractError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(ContractError::Empty);
        }
        let payload: Self = serde_json::from_str(trimmed)?;
        payload.validate()?;
        Ok(payload)
    }

    fn validate(&self) -> Result<(), ContractError> {
        if let Some(PaginationDescriptor {
            current_page,
            last_page,
        }) = self.pagination
            && (current_page == 0 || last_page == 0 || current_page > last_page)
        {
            return Err(ContractError::InvalidPagination {
                current: current_page,
                last: last_page,
            });
        }
        let mut seen = HashSet::with_capacity(self.cards.len());
        for card in &self.cards {
            if card.id.trim().is_empty() {
                return Err(ContractError::EmptyCardId);
            }
            if !seen.insert(card.id.as_str()) {
                return Err(ContractError::DuplicateCardId(card.id.clone()));
            }
        }
        Ok(())
    }

    /// Text for the result-count element.
    pub fn count_label(&self) -> String {
        match self.count_text.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ if self.total == 1 => "1 document found".to_string(),
            _ => format!("{} documents found", self.total),
        }
    }
}

/// Decode the suggestion endpoint's JSON array, dropping blank entries.
pub fn parse_suggestions(body: &str) -> Result<Vec<String>, ContractError> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Err(ContractError::Empty);
    }
    let items: Vec<String> = serde_json::from_str(trimmed)?;
    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
