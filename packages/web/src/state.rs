use std::sync::Arc;

use api::{ContactHandler, MailSettings, NewsletterHandler, Notifier};
use store::DocumentStore;

/// Handlers shared by every request, built once at startup.
pub struct State<S: DocumentStore, N: Notifier> {
    pub contact: ContactHandler<S, N>,
    pub newsletter: NewsletterHandler<S, N>,
}

impl<S, N> State<S, N>
where
    S: DocumentStore + Clone,
    N: Notifier + Clone,
{
    pub fn new(store: S, notifier: N, settings: &MailSettings) -> Arc<Self> {
        Arc::new(Self {
            contact: ContactHandler::new(store.clone(), notifier.clone(), settings),
            newsletter: NewsletterHandler::new(store, notifier, settings),
        })
    }
}
