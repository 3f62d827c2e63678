//! Contact search endpoint

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use contactdir_core::{search_contacts, Contact, SearchFields};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Query string of `GET /search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Free text, at least one character
    #[serde(default)]
    pub query: String,
    /// Comma separated field names or aliases; invalid entries are ignored
    #[serde(default)]
    pub fields: String,
}

/// GET /search?query=..&fields=..
async fn search(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    if params.query.is_empty() {
        return Err(ApiError::Validation {
            field: "query",
            reason: "must be at least 1 character",
        });
    }

    let fields = SearchFields::parse(&params.fields);
    let contacts = search_contacts(&state.pool, &params.query, &fields).await?;
    Ok(Json(contacts))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search", get(search))
}
