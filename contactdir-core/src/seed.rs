//! CSV seed data
//!
//! The seed file has a header row followed by exactly three columns per
//! row: first name, last name, email. Header text is ignored; column order
//! is what matters.

use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::contact::NewContact;
use crate::error::Result;

/// Parse seed rows from any reader.
pub fn parse_seed<R: Read>(reader: R) -> Result<Vec<NewContact>> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        // only the header may differ in width; data rows still need three fields
        .flexible(true)
        .trim(csv::Trim::None)
        .from_reader(reader);

    let mut contacts = Vec::new();
    for record in csv.deserialize::<(String, String, String)>() {
        let (first_name, last_name, email) = record?;
        contacts.push(NewContact::new(first_name, last_name, email));
    }
    Ok(contacts)
}

/// Read and parse a seed file from disk.
pub fn read_seed_file(path: &Path) -> Result<Vec<NewContact>> {
    let file = std::fs::File::open(path)?;
    let contacts = parse_seed(file)?;
    info!("Read {} seed contacts from {}", contacts.len(), path.display());
    Ok(contacts)
}
