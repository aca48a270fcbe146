use serde::{Deserialize, Serialize};

/// Name of the free-text query parameter.
///
/// The publication listing uses `search`, the indicator listing uses `query`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextParam {
    #[default]
    Search,
    Query,
}

impl TextParam {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Search => "search",
            Self::Query => "query",
        }
    }
}

/// One control on the filter form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterField {
    /// Free-text search/query input.
    Text,
    /// Document type select.
    DocumentType,
    /// Publication year select.
    Year,
    /// Statistical indicator select.
    Indicator,
}

impl FilterField {
    /// Fields in query-string order.
    pub const ALL: [Self; 4] = [Self::Text, Self::DocumentType, Self::Year, Self::Indicator];

    pub fn param_name(self, text_param: TextParam) -> &'static str {
        match self {
            Self::Text => text_param.as_str(),
            Self::DocumentType => "type",
            Self::Year => "year",
            Self::Indicator => "indicator",
        }
    }

    /// Text input waits for a quiet period; selects submit straight away.
    pub fn is_debounced(self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Raw values currently held by the filter controls, untrimmed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterForm {
    pub text: String,
    pub document_type: String,
    pub year: String,
    pub indicator: String,
}

impl FilterForm {
    pub fn value(&self, field: FilterField) -> &str {
        match field {
            FilterField::Text => &self.text,
            FilterField::DocumentType => &self.document_type,
            FilterField::Year => &self.year,
            FilterField::Indicator => &self.indicator,
        }
    }

    pub fn set(&mut self, field: FilterField, value: impl Into<String>) {
        *self.slot(field) = value.into();
    }

    pub fn clear(&mut self, field: FilterField) {
        self.slot(field).clear();
    }

    fn slot(&mut self, field: FilterField) -> &mut String {
        match field {
            FilterField::Text => &mut self.text,
            FilterField::DocumentType => &mut self.document_type,
            FilterField::Year => &mut self.year,
            FilterField::Indicator => &mut self.indicator,
        }
    }
}
