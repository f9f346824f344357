//! Newsletter signup models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient_string;

/// Raw newsletter signup payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewsletterForm {
    #[serde(default, deserialize_with = "lenient_string")]
    pub email: Option<String>,
}

impl NewsletterForm {
    pub fn from_value(value: &Value) -> Self {
        Self::deserialize(value).unwrap_or_default()
    }
}

/// Subscription as stored in the `newsletter_subscribers` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscription {
    pub email: String,
    pub subscribed_at: DateTime<Utc>,
    pub source_address: String,
    pub active: bool,
}

impl NewsletterSubscription {
    /// New subscriptions are always active.
    pub fn new(email: String, subscribed_at: DateTime<Utc>, source_address: String) -> Self {
        Self {
            email,
            subscribed_at,
            source_address,
            active: true,
        }
    }
}

/// Successful newsletter response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionReceipt {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub already_subscribed: Option<bool>,
}
