//! Table and index bootstrap for `contacts`
//!
//! Both statements are idempotent `IF NOT EXISTS` DDL.

use sqlx::PgExecutor;
use tracing::info;

use crate::search::{full_text_document, SearchFields, TEXT_SEARCH_CONFIG};

pub const FULLTEXT_INDEX_NAME: &str = "contacts_fulltext_idx";

/// Create the `contacts` table if it is missing.
pub async fn ensure_contacts_table<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contacts (
            first_name TEXT,
            last_name TEXT,
            email TEXT
        )
        "#,
    )
    .execute(executor)
    .await?;
    Ok(())
}

/// GIN index DDL over the default-field search document.
///
/// The indexed expression is exactly what a default-field search filters
/// on, so those searches can use it.
pub fn fulltext_index_ddl() -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {name} ON contacts USING GIN (to_tsvector('{cfg}', {doc}))",
        name = FULLTEXT_INDEX_NAME,
        cfg = TEXT_SEARCH_CONFIG,
        doc = full_text_document(&SearchFields::default()),
    )
}

/// Create the full-text index if it does not exist yet.
pub async fn ensure_fulltext_index<'e, E>(executor: E) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(&fulltext_index_ddl()).execute(executor).await?;
    info!("Full-text index {} is in place", FULLTEXT_INDEX_NAME);
    Ok(())
}
