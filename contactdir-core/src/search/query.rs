//! Full-text search over the contacts table

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use super::fields::SearchFields;
use crate::contact::Contact;
use crate::db::Lease;
use crate::error::Result;

/// Postgres text search configuration used for documents and queries
pub const TEXT_SEARCH_CONFIG: &str = "english";

/// Concatenate the given columns into one text document.
///
/// Each column is NULL-guarded so one missing value does not blank the
/// whole document.
pub fn full_text_document(fields: &SearchFields) -> String {
    fields
        .as_slice()
        .iter()
        .map(|field| format!("COALESCE({}, '')", field.column()))
        .collect::<Vec<_>>()
        .join(" || ' ' || ")
}

/// Build the search statement with the query text as `$1`.
///
/// Column names come from the validated allow-list and are written into the
/// statement text; only the user's query is bound.
pub fn build_search_query<'a>(query: &'a str, fields: &SearchFields) -> QueryBuilder<'a, Postgres> {
    let mut builder = QueryBuilder::new("SELECT first_name, last_name, email FROM contacts");
    builder.push(format!(
        " WHERE to_tsvector('{cfg}', {doc}) @@ plainto_tsquery('{cfg}', ",
        cfg = TEXT_SEARCH_CONFIG,
        doc = full_text_document(fields),
    ));
    builder.push_bind(query);
    builder.push(")");
    builder
}

/// Run a full-text search and return every matching contact.
///
/// No ORDER BY is applied; rows come back in whatever order the planner
/// produces.
pub async fn search_contacts(
    pool: &PgPool,
    query: &str,
    fields: &SearchFields,
) -> Result<Vec<Contact>> {
    let mut builder = build_search_query(query, fields);
    let mut lease = Lease::acquire(pool).await?;

    let contacts: Vec<Contact> = builder
        .build_query_as()
        .fetch_all(&mut *lease)
        .await?;

    debug!(
        fields = ?fields.columns(),
        matches = contacts.len(),
        "full-text search complete"
    );
    Ok(contacts)
}
