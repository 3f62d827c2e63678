//! Field validation and full-text query building

pub mod fields;
pub mod query;

pub use fields::{SearchField, SearchFields};
pub use query::{build_search_query, full_text_document, search_contacts, TEXT_SEARCH_CONFIG};
