//! # Newsletter signups
//!
//! [`NewsletterHandler::subscribe`] checks the address with
//! [`validate_email`], looks for an existing subscription with the same
//! normalised address, and only when none exists appends a new active
//! subscription and notifies the team.
//!
//! The existence check and the insert are two separate store calls. Two
//! concurrent signups for the same address can both pass the check and both be
//! stored; the store has no uniqueness constraint to catch this.

use chrono::Utc;
use store::{DocumentStore, Repository};
use tracing::{error, info, warn};

use crate::error::{ApiError, SubmissionError};
use crate::models::{source_address, NewsletterForm, NewsletterSubscription, SubscriptionReceipt};
use crate::notify::{render, Envelope, Notifier};
use crate::settings::MailSettings;
use crate::validation::validate_email;

pub const NEWSLETTER_COLLECTION: &str = "newsletter_subscribers";
pub const SUBSCRIBED: &str = "Thank you for subscribing!";
pub const ALREADY_SUBSCRIBED: &str = "You are already subscribed!";
pub const NEWSLETTER_FAILURE: &str =
    "An error occurred while processing your subscription. Please try again later.";

/// Records newsletter subscriptions.
pub struct NewsletterHandler<S: DocumentStore, N: Notifier> {
    repo: Repository<S>,
    notifier: N,
    envelope: Envelope,
}

impl<S: DocumentStore, N: Notifier> NewsletterHandler<S, N> {
    pub fn new(store: S, notifier: N, settings: &MailSettings) -> Self {
        Self {
            repo: Repository::new(store),
            notifier,
            envelope: Envelope::new(settings),
        }
    }

    /// Handle one signup from `address`.
    pub async fn subscribe(
        &self,
        form: &NewsletterForm,
        address: Option<&str>,
    ) -> Result<SubscriptionReceipt, ApiError> {
        let email = validate_email(form.email.as_deref()).map_err(|message| {
            warn!(reason = message, "Rejected newsletter signup");
            ApiError::InvalidArgument(message.to_string())
        })?;

        match self.register(email, source_address(address)).await {
            Ok(receipt) => Ok(receipt),
            Err(e) => {
                error!("Error processing newsletter subscription: {}", e);
                Err(ApiError::Internal(NEWSLETTER_FAILURE))
            }
        }
    }

    async fn register(
        &self,
        email: String,
        address: String,
    ) -> Result<SubscriptionReceipt, SubmissionError> {
        if self
            .repo
            .exists_eq(NEWSLETTER_COLLECTION, "email", &email)
            .await?
        {
            info!("Newsletter signup for an existing subscriber");
            return Ok(SubscriptionReceipt {
                success: true,
                message: ALREADY_SUBSCRIBED.to_string(),
                subscription_id: None,
                already_subscribed: Some(true),
            });
        }

        let subscription = NewsletterSubscription::new(email, Utc::now(), address);
        let id = self
            .repo
            .add(NEWSLETTER_COLLECTION, &subscription)
            .await?
            .to_string();

        let notification = render::subscription(&self.envelope, &id, &subscription);
        self.notifier.send(&notification).await?;

        info!(subscription_id = %id, "Newsletter subscription recorded");
        Ok(SubscriptionReceipt {
            success: true,
            message: SUBSCRIBED.to_string(),
            subscription_id: Some(id),
            already_subscribed: None,
        })
    }
}
