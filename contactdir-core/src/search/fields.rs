//! Allow-listed search fields
//!
//! Callers pass a comma separated field list. Anything outside the
//! allow-list is dropped, and an empty result falls back to every field,
//! so a search is never run without columns.

use std::fmt;

/// A searchable column of the `contacts` table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    FirstName,
    LastName,
    Email,
}

impl SearchField {
    /// Default field set, in column order
    pub const ALL: [SearchField; 3] = [Self::FirstName, Self::LastName, Self::Email];

    /// Canonical column name
    pub fn column(&self) -> &'static str {
        match self {
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Email => "email",
        }
    }

    /// Human-readable alias, also the CRM's field name
    pub fn alias(&self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Email => "email",
        }
    }

    /// Match a canonical name or alias exactly.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.column() == name || field.alias() == name)
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Non-empty, ordered, duplicate-free subset of [`SearchField::ALL`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFields(Vec<SearchField>);

impl SearchFields {
    /// Validate a raw `fields` parameter.
    ///
    /// Entries are trimmed and matched against canonical names and aliases;
    /// unknown entries are ignored. Caller order is kept.
    pub fn parse(raw: &str) -> Self {
        let mut fields = Vec::new();
        for field in raw.split(',').filter_map(|entry| SearchField::parse(entry.trim())) {
            if !fields.contains(&field) {
                fields.push(field);
            }
        }

        if fields.is_empty() {
            Self::default()
        } else {
            Self(fields)
        }
    }

    pub fn as_slice(&self) -> &[SearchField] {
        &self.0
    }

    pub fn columns(&self) -> Vec<&'static str> {
        self.0.iter().map(SearchField::column).collect()
    }
}

impl Default for SearchFields {
    fn default() -> Self {
        Self(SearchField::ALL.to_vec())
    }
}
