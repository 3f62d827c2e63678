//! contactdir-core: searchable contact directory mirrored from a CRM API
//!
//! - Resolve a Postgres pool across several host identities for one database
//! - Replace the `contacts` table from the CRM in a single transaction
//! - Build and run field-validated full-text searches over it

pub mod config;
pub mod contact;
pub mod db;
pub mod error;
pub mod nimble;
pub mod search;
pub mod seed;
pub mod sync;

pub use config::{AppConfig, DatabaseConfig, NimbleApiConfig};
pub use contact::{Contact, NewContact};
pub use error::{Error, Result};
pub use search::{search_contacts, SearchField, SearchFields};
pub use sync::{seed_from_file, SyncOutcome, SyncPipeline};
