//! Filter form values and the query-string state derived from them.

mod form;
mod state;


pub use form::{FilterField, FilterForm, TextParam};
pub use state::FilterState;
