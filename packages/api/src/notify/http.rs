use reqwest::Client;

use super::{Notification, Notifier, NotifyError};
use crate::settings::MailSettings;

/// Delivers notifications by POSTing them as JSON to a mail relay.
///
/// The relay authenticates the sender account with HTTP basic auth using the
/// configured identity and secret.
#[derive(Clone, Debug)]
pub struct HttpNotifier {
    client: Client,
    endpoint: String,
    identity: String,
    secret: String,
}

impl HttpNotifier {
    pub fn new(settings: &MailSettings) -> Self {
        Self::with_client(Client::new(), settings)
    }

    pub fn with_client(client: Client, settings: &MailSettings) -> Self {
        Self {
            client,
            endpoint: settings.endpoint.clone(),
            identity: settings.identity.clone(),
            secret: settings.secret.clone(),
        }
    }
}

impl Notifier for HttpNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.identity, Some(&self.secret))
            .json(notification)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        tracing::debug!(subject = %notification.subject, "Notification delivered");
        Ok(())
    }
}
