use url::form_urlencoded;

use super::{FilterField, FilterForm, TextParam};

/// Filter values as they appear in the listing URL.
///
/// Blank values are never stored, so serializing always omits them. The page
/// number is always present and never below 1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterState {
    text_param: TextParam,
    values: [Option<String>; 4],
    page: u32,
}

impl FilterState {
    /// Unfiltered first page.
    pub fn new(text_param: TextParam) -> Self {
        Self {
            text_param,
            values: Default::default(),
            page: 1,
        }
    }

    /// Snapshot the form, trimming values and resetting to the first page.
    pub fn from_form(form: &FilterForm, text_param: TextParam) -> Self {
        let mut state = Self::new(text_param);
        for field in FilterField::ALL {
            state.set(field, form.value(field));
        }
        state
    }

    /// Parse a query string (with or without a leading `?`).
    ///
    /// Unknown keys are ignored; a missing or unparsable page becomes 1.
    pub fn from_query(query: &str, text_param: TextParam) -> Self {
        let mut state = Self::new(text_param);
        let query = query.strip_prefix('?').unwrap_or(query);
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            if key == "page" {
                state.page = value.trim().parse::<u32>().unwrap_or(1).max(1);
                continue;
            }
            if let Some(field) = FilterField::ALL
                .into_iter()
                .find(|field| field.param_name(text_param) == key)
            {
                state.set(field, &value);
            }
        }
        state
    }

    /// Parse the query portion of a request URL such as `/publikasi?year=2023&page=2`.
    pub fn from_url(url: &str, text_param: TextParam) -> Self {
        let without_fragment = url.split('#').next().unwrap_or_default();
        match without_fragment.split_once('?') {
            Some((_, query)) => Self::from_query(query, text_param),
            None => Self::new(text_param),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn value(&self, field: FilterField) -> Option<&str> {
        self.values[field_index(field)].as_deref()
    }

    /// Same filters on another page.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page: page.max(1),
            ..self.clone()
        }
    }

    /// Fill a form with these values, clearing controls that have none.
    pub fn to_form(&self) -> FilterForm {
        let mut form = FilterForm::default();
        for field in FilterField::ALL {
            if let Some(value) = self.value(field) {
                form.set(field, value);
            }
        }
        form
    }

    /// Serialize as `key=value` pairs in fixed order, `page` last.
    pub fn to_query(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for field in FilterField::ALL {
            if let Some(value) = self.value(field) {
                serializer.append_pair(field.param_name(self.text_param), value);
            }
        }
        serializer.append_pair("page", &self.page.to_string());
        serializer.finish()
    }

    /// The URL the listing is fetched from and recorded under in history.
    pub fn request_url(&self, page_path: &str) -> String {
        format!("{page_path}?{}", self.to_query())
    }

    fn set(&mut self, field: FilterField, raw: &str) {
        let trimmed = raw.trim();
        self.values[field_index(field)] = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}

fn field_index(field: FilterField) -> usize {
    match field {
        FilterField::Text => 0,
        FilterField::DocumentType => 1,
        FilterField::Year => 2,
        FilterField::Indicator => 3,
    }
}
