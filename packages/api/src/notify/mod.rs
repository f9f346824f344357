//! # Team notifications
//!
//! Accepted submissions are announced to the team by email. Delivery is a
//! collaborator behind the [`Notifier`] trait; the only production
//! implementation is [`HttpNotifier`], which hands messages to a mail relay over
//! HTTP. Rendering of the message bodies lives in [`render`].
//!
//! Delivery is best effort. A failed send is reported to the caller as an error
//! and nothing is queued for retry.

mod http;
pub mod render;

use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::settings::MailSettings;

pub use http::HttpNotifier;

/// A message ready for delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub from: String,
    pub to: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Sender and recipients shared by every notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub from: String,
    pub to: Vec<String>,
}

impl Envelope {
    pub fn new(settings: &MailSettings) -> Self {
        Self {
            from: settings.from_header(),
            to: settings.recipients.clone(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Mail relay request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Mail relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
}

/// Async trait for delivering notifications.
pub trait Notifier: Send + Sync {
    fn send(
        &self,
        notification: &Notification,
    ) -> impl Future<Output = Result<(), NotifyError>> + Send;
}
