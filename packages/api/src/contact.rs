//! # Contact form submissions
//!
//! [`ContactHandler::submit`] runs the whole pipeline for one request:
//!
//! 1. Validate the raw form. Violations are returned as
//!    [`ApiError::InvalidArgument`] with the messages joined by `", "`, before
//!    any side effect.
//! 2. Stamp the sanitized record with the server time and caller address and
//!    append it to the `contact_submissions` collection.
//! 3. Render the team notification and send it, with replies going to the
//!    submitter.
//! 4. Return a receipt carrying the new submission identifier.
//!
//! Any failure in steps 2–3 becomes the same [`ApiError::Internal`] message. A
//! record that was stored before the notification failed stays stored, and the
//! caller cannot tell the two cases apart.

use chrono::Utc;
use store::{DocumentStore, Repository};
use tracing::{error, info, warn};

use crate::error::{ApiError, SubmissionError};
use crate::models::{source_address, ContactForm, ContactReceipt, ContactSubmission};
use crate::notify::{render, Envelope, Notifier};
use crate::settings::MailSettings;
use crate::validation::validate_contact;

pub const CONTACT_COLLECTION: &str = "contact_submissions";
pub const CONTACT_SUCCESS: &str = "Your message has been sent successfully!";
pub const CONTACT_FAILURE: &str =
    "An error occurred while processing your request. Please try again later.";

/// Validates, stores and announces contact form submissions.
pub struct ContactHandler<S: DocumentStore, N: Notifier> {
    repo: Repository<S>,
    notifier: N,
    envelope: Envelope,
}

impl<S: DocumentStore, N: Notifier> ContactHandler<S, N> {
    pub fn new(store: S, notifier: N, settings: &MailSettings) -> Self {
        Self {
            repo: Repository::new(store),
            notifier,
            envelope: Envelope::new(settings),
        }
    }

    /// Handle one contact form submission from `address`.
    pub async fn submit(
        &self,
        form: &ContactForm,
        address: Option<&str>,
    ) -> Result<ContactReceipt, ApiError> {
        let contact = validate_contact(form).map_err(|errors| {
            warn!(%errors, "Rejected contact form submission");
            ApiError::InvalidArgument(errors.to_string())
        })?;

        let submission = ContactSubmission::new(contact, Utc::now(), source_address(address));

        match self.deliver(&submission).await {
            Ok(submission_id) => {
                info!(%submission_id, "Contact form submission accepted");
                Ok(ContactReceipt {
                    success: true,
                    message: CONTACT_SUCCESS.to_string(),
                    submission_id,
                })
            }
            Err(e) => {
                error!("Error processing contact form: {}", e);
                Err(ApiError::Internal(CONTACT_FAILURE))
            }
        }
    }

    async fn deliver(&self, submission: &ContactSubmission) -> Result<String, SubmissionError> {
        let id = self
            .repo
            .add(CONTACT_COLLECTION, submission)
            .await?
            .to_string();

        let notification = render::contact(&self.envelope, &id, submission);
        self.notifier.send(&notification).await?;

        Ok(id)
    }
}
