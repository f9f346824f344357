//! # Contact form models
//!
//! A contact submission passes through three representations:
//!
//! ## [`ContactForm`]
//!
//! The raw, untrusted payload. Every field is optional and deserialization never
//! fails: missing, `null` and non-string values all become `None`, and a payload
//! that is not a JSON object becomes an empty form. Deciding what is acceptable is
//! left entirely to [`crate::validation::validate_contact`].
//!
//! ## [`SanitizedContact`]
//!
//! The validator's output. Fields are trimmed, the email is lowercased and every
//! free-text field has had `<` and `>` escaped, so the record can be rendered into
//! HTML verbatim. It carries no identifier or timestamp.
//!
//! ## [`ContactSubmission`]
//!
//! What is persisted in the `contact_submissions` collection: the sanitized fields
//! plus the server timestamp and the caller's network address.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::lenient_string;

/// Raw contact form payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub service: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub message: Option<String>,
}

impl ContactForm {
    /// Read a form from an arbitrary JSON value.
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

impl From<&SanitizedContact> for ContactForm {
    fn from(contact: &SanitizedContact) -> Self {
        Self {
            name: Some(contact.name.clone()),
            email: Some(contact.email.clone()),
            company: Some(contact.company.clone()),
            phone: Some(contact.phone.clone()),
            service: Some(contact.service.as_str().to_string()),
            message: Some(contact.message.clone()),
        }
    }
}

/// The service a visitor is enquiring about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Service {
    #[default]
    #[serde(rename = "")]
    Unspecified,
    #[serde(rename = "vr")]
    Vr,
    #[serde(rename = "ar")]
    Ar,
    #[serde(rename = "custom")]
    Custom,
    #[serde(rename = "consulting")]
    Consulting,
    #[serde(rename = "other")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown service: {0}")]
pub struct UnknownService(pub String);

impl Service {
    pub const ALL: [Service; 6] = [
        Service::Unspecified,
        Service::Vr,
        Service::Ar,
        Service::Custom,
        Service::Consulting,
        Service::Other,
    ];

    /// Form value of the service, empty for [`Service::Unspecified`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Unspecified => "",
            Service::Vr => "vr",
            Service::Ar => "ar",
            Service::Custom => "custom",
            Service::Consulting => "consulting",
            Service::Other => "other",
        }
    }

    /// Human-readable label used in notifications.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Service::Unspecified => None,
            Service::Vr => Some("Virtual Reality Development"),
            Service::Ar => Some("Augmented Reality Solutions"),
            Service::Custom => Some("Custom Development"),
            Service::Consulting => Some("Consulting"),
            Service::Other => Some("Other"),
        }
    }
}

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.as_str() == s)
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated and HTML-escaped contact form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedContact {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub service: Service,
    pub message: String,
}

/// Contact submission as stored in the `contact_submissions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub company: String,
    pub phone: String,
    pub service: Service,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub source_address: String,
}

impl ContactSubmission {
    pub fn new(contact: SanitizedContact, created_at: DateTime<Utc>, source_address: String) -> Self {
        let SanitizedContact {
            name,
            email,
            company,
            phone,
            service,
            message,
        } = contact;

        Self {
            name,
            email,
            company,
            phone,
            service,
            message,
            created_at,
            source_address,
        }
    }
}

/// Successful contact form response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_form_is_lenient() {
        let form = ContactForm::from_value(&json!({
            "name": "Jane",
            "email": null,
            "phone": 5551234,
            "service": ["vr"],
            "unexpected": true
        }));
        assert_eq!(form.name.as_deref(), Some("Jane"));
        assert!(form.email.is_none());
        assert!(form.phone.is_none());
        assert!(form.service.is_none());
        assert!(form.message.is_none());

        assert_eq!(ContactForm::from_value(&json!("not a form")), ContactForm::default());
        assert_eq!(ContactForm::from_value(&Value::Null), ContactForm::default());
    }

    #[test]
    fn test_service_parsing_is_exact() {
        assert_eq!("".parse::<Service>(), Ok(Service::Unspecified));
        assert_eq!("consulting".parse::<Service>(), Ok(Service::Consulting));
        assert!("VR".parse::<Service>().is_err());
        assert!("games".parse::<Service>().is_err());
    }

    #[test]
    fn test_service_serializes_as_form_value() {
        assert_eq!(serde_json::to_value(Service::Unspecified).unwrap(), json!(""));
        assert_eq!(serde_json::to_value(Service::Ar).unwrap(), json!("ar"));
        assert_eq!(Service::Other.label(), Some("Other"));
        assert_eq!(Service::Unspecified.label(), None);
    }

    #[test]
    fn test_submission_wire_names() {
        let contact = SanitizedContact {
            name: "Jane Doe".into(),
            email: "jane@example.com".into(),
            company: String::new(),
            phone: String::new(),
            service: Service::Unspecified,
            message: "Hello there, friend.".into(),
        };
        let submission = ContactSubmission::new(contact, Utc::now(), "10.0.0.1".into());
        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(value["sourceAddress"], "10.0.0.1");
        assert_eq!(value["service"], "");
        assert!(value.get("createdAt").is_some());
    }
}
