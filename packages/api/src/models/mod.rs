//! Submission models: raw form input, sanitized records, persisted documents and receipts.

mod contact;
mod newsletter;

use std::net::IpAddr;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub use contact::{
    ContactForm, ContactReceipt, ContactSubmission, SanitizedContact, Service, UnknownService,
};
pub use newsletter::{NewsletterForm, NewsletterSubscription, SubscriptionReceipt};

/// Recorded when the caller's network address cannot be determined.
pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Caller address as stored on records.
///
/// Anything that does not parse as an IP address is recorded as
/// [`UNKNOWN_ADDRESS`].
pub fn source_address(address: Option<&str>) -> String {
    address
        .and_then(|a| a.trim().parse::<IpAddr>().ok())
        .map_or_else(|| UNKNOWN_ADDRESS.to_string(), |ip| ip.to_string())
}

/// Accept any JSON value for a form field; only strings count as present.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}
