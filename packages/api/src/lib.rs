//! # API crate: form submission handlers for the marketing site
//!
//! The site is static except for two operations: the contact form and the
//! newsletter signup. This crate holds everything behind those two operations;
//! the `web` crate only decodes requests and encodes responses around it.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`validation`] | Field rules, spam blocklist and HTML escaping for contact forms; the email-only check for signups |
//! | [`models`] | Raw forms, sanitized and persisted records, receipts |
//! | [`contact`] | [`ContactHandler`]: validate → persist → notify for the contact form |
//! | [`newsletter`] | [`NewsletterHandler`]: validate → dedupe → persist → notify for signups |
//! | [`notify`] | [`Notifier`] collaborator, the HTTP relay implementation and message rendering |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`error`] | [`ApiError`], the only error callers see, and the internal [`SubmissionError`] |
//!
//! ## Operations
//!
//! - **`submitContactForm`** → [`ContactHandler::submit`]
//! - **`submitNewsletter`** → [`NewsletterHandler::subscribe`]
//!
//! Both handlers are built once at startup from a [`store::DocumentStore`], a
//! [`Notifier`] and the [`MailSettings`](settings::MailSettings), and hold no
//! per-request state.

pub mod contact;
pub mod error;
pub mod models;
pub mod newsletter;
pub mod notify;
pub mod settings;
pub mod validation;

pub use contact::ContactHandler;
pub use error::{ApiError, SubmissionError};
pub use models::{
    ContactForm, ContactReceipt, ContactSubmission, NewsletterForm, NewsletterSubscription,
    SanitizedContact, Service, SubscriptionReceipt,
};
pub use newsletter::NewsletterHandler;
pub use notify::{HttpNotifier, Notification, Notifier, NotifyError};
pub use settings::{MailSettings, Settings};
