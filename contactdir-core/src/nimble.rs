//! Nimble CRM contacts API client
//!
//! The payload is loosely shaped: fields are usually lists of `{value: ..}`
//! objects, but any record may carry fields of other shapes, and any of
//! the expected ones may be missing. Records are kept as raw JSON and only
//! the three expected fields of person records are ever extracted, each
//! with an explicit default.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::NimbleApiConfig;
use crate::contact::NewContact;
use crate::error::{Error, Result};
use crate::search::SearchField;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Only records of this type become contacts
pub const PERSON_RECORD_TYPE: &str = "person";

/// Response body of the contacts endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactsPayload {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// One CRM record
///
/// Built from any JSON value, so an unexpected shape in one record never
/// fails the whole payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Value")]
pub struct Resource {
    /// `None` when absent or not a string
    pub record_type: Option<String>,
    /// Human-readable field name to its raw value
    pub fields: HashMap<String, Value>,
}

impl From<Value> for Resource {
    fn from(raw: Value) -> Self {
        let Value::Object(mut record) = raw else {
            return Self::default();
        };

        let record_type = match record.remove("record_type") {
            Some(Value::String(kind)) => Some(kind),
            _ => None,
        };
        let fields = match record.remove("fields") {
            Some(Value::Object(fields)) => fields.into_iter().collect(),
            _ => HashMap::new(),
        };

        Self {
            record_type,
            fields,
        }
    }
}

impl Resource {
    pub fn is_person(&self) -> bool {
        self.record_type.as_deref() == Some(PERSON_RECORD_TYPE)
    }

    /// First entry's string `value`, or "" when the field is absent, not a
    /// list, empty, or its first value is missing or not a string.
    pub fn first_value(&self, field: SearchField) -> String {
        self.fields
            .get(field.alias())
            .and_then(Value::as_array)
            .and_then(|entries| entries.first())
            .and_then(|entry| entry.get("value"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    pub fn to_contact(&self) -> NewContact {
        NewContact::new(
            self.first_value(SearchField::FirstName),
            self.first_value(SearchField::LastName),
            self.first_value(SearchField::Email),
        )
    }
}

impl ContactsPayload {
    /// Person records mapped to rows; other record types are skipped.
    pub fn contacts(&self) -> Vec<NewContact> {
        self.resources
            .iter()
            .filter(|resource| resource.is_person())
            .map(Resource::to_contact)
            .collect()
    }
}

/// Something that can produce the full external contact set.
#[async_trait]
pub trait ContactSource: Send + Sync {
    async fn fetch(&self) -> Result<ContactsPayload>;
}

/// HTTP client for the Nimble contacts endpoint
pub struct NimbleClient {
    http: reqwest::Client,
    config: NimbleApiConfig,
}

impl NimbleClient {
    pub fn new(config: NimbleApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }

    /// The `fields` query parameter: aliases joined by ", "
    pub fn requested_fields() -> String {
        SearchField::ALL
            .iter()
            .map(SearchField::alias)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[async_trait]
impl ContactSource for NimbleClient {
    async fn fetch(&self) -> Result<ContactsPayload> {
        let response = self
            .http
            .get(self.config.url.clone())
            .bearer_auth(&self.config.api_key)
            .query(&[("fields", Self::requested_fields())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            error!(
                "Failed to get contacts from Nimble API. Status code: {}",
                status.as_u16()
            );
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let payload: ContactsPayload = response.json().await?;
        debug!(resources = payload.resources.len(), "fetched contacts payload");
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    const API_KEY: &str = "abcdefghijklmnopqrstuvwxyz0123";

    fn payload(json: &str) -> ContactsPayload {
        serde_json::from_str(json).unwrap()
    }

    fn client_for(server: &Server) -> NimbleClient {
        let url = format!("{}/api/v1/contacts", server.url());
        NimbleClient::new(NimbleApiConfig {
            api_key: API_KEY.to_string(),
            url: url::Url::parse(&url).unwrap(),
        })
        .unwrap()
    }

    #[test]
    fn full_person_round_trips() {
        let p = payload(
            r#"{"resources": [{
                "record_type": "person",
                "fields": {
                    "first name": [{"value": "John"}],
                    "last name": [{"value": "Doe"}],
                    "email": [{"value": "john@example.com"}]
                }
            }]}"#,
        );
        assert_eq!(
            p.contacts(),
            vec![NewContact::new("John", "Doe", "john@example.com")]
        );
    }

    #[test]
    fn non_person_records_skipped() {
        let p = payload(
            r#"{"resources": [
                {"record_type": "company", "fields": {"first name": [{"value": "Acme"}]}},
                {"record_type": "person", "fields": {"first name": [{"value": "Jane"}]}},
                {"fields": {"first name": [{"value": "NoType"}]}}
            ]}"#,
        );
        let contacts = p.contacts();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].first_name, "Jane");
    }

    #[test]
    fn missing_values_become_empty_strings() {
        let p = payload(
            r#"{"resources": [{
                "record_type": "person",
                "fields": {
                    "first name": [{"value": "Jane"}],
                    "last name": [],
                    "email": [{"label": "work"}]
                }
            }, {
                "record_type": "person"
            }]}"#,
        );
        assert_eq!(
            p.contacts(),
            vec![NewContact::new("Jane", "", ""), NewContact::new("", "", "")]
        );
    }

    #[test]
    fn only_first_entry_used() {
        let p = payload(
            r#"{"resources": [{
                "record_type": "person",
                "fields": {"email": [{"value": "a@example.com"}, {"value": "b@example.com"}]}
            }]}"#,
        );
        assert_eq!(p.contacts()[0].email, "a@example.com");
    }

    #[test]
    fn odd_shapes_elsewhere_do_not_lose_people() {
        let p = payload(
            r#"{"resources": [
                {"record_type": "company", "fields": {
                    "first name": [{"value": "Acme"}],
                    "employees": [{"value": 50}],
                    "address": {"city": "Berlin"}
                }},
                {"record_type": null, "fields": {"first name": [{"value": "Ghost"}]}},
                {"record_type": 7},
                "not a record",
                {"record_type": "person", "fields": {
                    "first name": [{"value": "John"}],
                    "last name": [{"value": "Doe"}],
                    "email": [{"value": "john@example.com"}],
                    "tags": "vip"
                }}
            ]}"#,
        );
        assert_eq!(p.resources.len(), 5);
        assert_eq!(
            p.contacts(),
            vec![NewContact::new("John", "Doe", "john@example.com")]
        );
    }

    #[test]
    fn non_string_values_become_empty_strings() {
        let p = payload(
            r#"{"resources": [
                {"record_type": "person", "fields": {
                    "first name": [{"value": 42}],
                    "last name": "Doe",
                    "email": [{"value": null}]
                }},
                {"record_type": "person", "fields": "broken"}
            ]}"#,
        );
        assert_eq!(
            p.contacts(),
            vec![NewContact::new("", "", ""), NewContact::new("", "", "")]
        );
    }

    #[tokio::test]
    async fn fetch_tolerates_unexpected_record_shapes() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/contacts")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"resources": [
                    {"record_type": "company", "fields": {"employees": [{"value": 50}]}},
                    {"record_type": "person", "fields": {"first name": [{"value": "John"}]}}
                ]}"#,
            )
            .create_async()
            .await;

        let payload = client_for(&server).fetch().await.unwrap();
        assert_eq!(payload.contacts()[0].first_name, "John");
    }

    #[test]
    fn requested_fields_are_aliases() {
        assert_eq!(NimbleClient::requested_fields(), "first name, last name, email");
    }

    #[tokio::test]
    async fn fetch_sends_auth_and_fields() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/contacts")
            .match_query(Matcher::UrlEncoded(
                "fields".into(),
                "first name, last name, email".into(),
            ))
            .match_header("authorization", format!("Bearer {}", API_KEY).as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"resources": [{"record_type": "person",
                    "fields": {"first name": [{"value": "John"}]}}]}"#,
            )
            .create_async()
            .await;

        let payload = client_for(&server).fetch().await.unwrap();

        mock.assert_async().await;
        assert_eq!(payload.resources.len(), 1);
        assert_eq!(payload.contacts()[0].first_name, "John");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/contacts")
            .match_query(Matcher::Any)
            .with_status(401)
            .with_body(r#"{"error": "unauthorized"}"#)
            .create_async()
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, Error::UpstreamStatus { status: 401 }));
    }

    #[tokio::test]
    async fn malformed_body_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/v1/contacts")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let err = client_for(&server).fetch().await.unwrap_err();
        assert!(matches!(err, Error::Fetch(_)));
    }
}
