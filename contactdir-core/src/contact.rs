//! Contact rows as stored and as returned by search

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row of the `contacts` table; every column is nullable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Contact {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

/// A row about to be inserted by sync or seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl NewContact {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_as_field_keyed_object() {
        let contact = Contact {
            first_name: Some("John".into()),
            last_name: None,
            email: Some("john@example.com".into()),
        };
        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            json!({"first_name": "John", "last_name": null, "email": "john@example.com"})
        );
    }
}
