use std::{sync::Arc, time::Duration};

use api::{ContactForm, ContactReceipt, NewsletterForm, Notifier, SubscriptionReceipt};
use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use store::DocumentStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    callable::{request_data, Callable, CallableError, CallerAddress},
    state::State,
};

/// Router serving the two callable operations.
pub fn router<S, N>(state: Arc<State<S, N>>) -> Router
where
    S: DocumentStore + 'static,
    N: Notifier + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        .route("/submitContactForm", post(submit_contact_form::<S, N>))
        .route("/submitNewsletter", post(submit_newsletter::<S, N>))
        .route("/health", get(health))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn submit_contact_form<S: DocumentStore, N: Notifier>(
    AxumState(state): AxumState<Arc<State<S, N>>>,
    CallerAddress(address): CallerAddress,
    body: Bytes,
) -> Result<Callable<ContactReceipt>, CallableError> {
    let form = ContactForm::from_value(&request_data(&body)?);
    let receipt = state.contact.submit(&form, address.as_deref()).await?;
    Ok(Callable::new(receipt))
}

async fn submit_newsletter<S: DocumentStore, N: Notifier>(
    AxumState(state): AxumState<Arc<State<S, N>>>,
    CallerAddress(address): CallerAddress,
    body: Bytes,
) -> Result<Callable<SubscriptionReceipt>, CallableError> {
    let form = NewsletterForm::from_value(&request_data(&body)?);
    let receipt = state.newsletter.subscribe(&form, address.as_deref()).await?;
    Ok(Callable::new(receipt))
}

async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use std::{net::SocketAddr, sync::Mutex};

    use api::{MailSettings, Notification, NotifyError};
    use axum::{
        body::{to_bytes, Body},
        extract::ConnectInfo,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use store::MemoryStore;
    use tower::ServiceExt;

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingNotifier {
        sent: Arc<Mutex<Vec<Notification>>>,
    }

    impl Notifier for RecordingNotifier {
        async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
            self.sent.lock().unwrap().push(notification.clone());
            Ok(())
        }
    }

    fn settings() -> MailSettings {
        MailSettings {
            identity: "site@example.com".into(),
            secret: "secret".into(),
            endpoint: "http://relay.invalid/send".into(),
            sender: "DEV Limited Website".into(),
            recipients: vec!["team@example.com".into()],
        }
    }

    fn app(store: &MemoryStore, notifier: &RecordingNotifier) -> Router {
        router(State::new(store.clone(), notifier.clone(), &settings()))
    }

    async fn call(app: Router, path: &str, body: impl Into<Body>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header(CONTENT_TYPE, "application/json")
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(body.into())
            .unwrap();
        send(app, request).await
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_contact_form_success_envelope() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let (status, body) = call(
            app(&store, &notifier),
            "/submitContactForm",
            json!({
                "data": {
                    "name": "Jane Doe",
                    "email": "JANE@EXAMPLE.COM",
                    "message": "Hello, I would like a quote please."
                }
            })
            .to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["success"], true);
        assert_eq!(body["result"]["message"], "Your message has been sent successfully!");
        let id = body["result"]["submissionId"].as_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());

        let docs = store.documents("contact_submissions");
        assert_eq!(docs[0].body["sourceAddress"], "203.0.113.9");
        assert_eq!(docs[0].body["email"], "jane@example.com");
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }

    /// Submits a valid contact form and returns the stored `sourceAddress`.
    async fn recorded_address(forwarded: Option<&str>, peer: Option<SocketAddr>) -> Value {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let mut request = Request::builder()
            .method("POST")
            .uri("/submitContactForm")
            .header(CONTENT_TYPE, "application/json");
        if let Some(forwarded) = forwarded {
            request = request.header("x-forwarded-for", forwarded);
        }
        if let Some(peer) = peer {
            request = request.extension(ConnectInfo(peer));
        }
        let body = json!({
            "data": {
                "name": "Jane Doe",
                "email": "jane@example.com",
                "message": "Hello, I would like a quote please."
            }
        });

        let (status, _) = send(
            app(&store, &notifier),
            request.body(Body::from(body.to_string())).unwrap(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        store.documents("contact_submissions")[0].body["sourceAddress"].clone()
    }

    #[tokio::test]
    async fn test_caller_address_falls_back_to_peer() {
        let peer: SocketAddr = "198.51.100.20:52000".parse().unwrap();

        assert_eq!(recorded_address(None, Some(peer)).await, "198.51.100.20");
        assert_eq!(
            recorded_address(Some("<b>1.2.3.4</b>"), Some(peer)).await,
            "198.51.100.20"
        );
        assert_eq!(recorded_address(Some(""), Some(peer)).await, "198.51.100.20");
        assert_eq!(
            recorded_address(Some("2001:db8::7"), Some(peer)).await,
            "2001:db8::7"
        );
    }

    #[tokio::test]
    async fn test_caller_address_unknown_without_peer() {
        assert_eq!(recorded_address(None, None).await, "unknown");
        assert_eq!(recorded_address(Some("not-an-ip"), None).await, "unknown");
    }

    #[tokio::test]
    async fn test_contact_form_invalid_argument_envelope() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let (status, body) = call(
            app(&store, &notifier),
            "/submitContactForm",
            json!({ "data": { "name": "J", "email": "a@b.com", "message": "short" } }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
        assert_eq!(
            body["error"]["message"],
            "Name must be between 2 and 100 characters, Message must be at least 10 characters"
        );
        assert!(store.is_empty("contact_submissions"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let (status, body) = call(app(&store, &notifier), "/submitNewsletter", "{not json").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["status"], "INVALID_ARGUMENT");
        assert_eq!(body["error"]["message"], "Bad Request");
    }

    #[tokio::test]
    async fn test_newsletter_envelopes() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let payload = json!({ "data": { "email": "reader@example.com" } }).to_string();

        let (status, first) = call(app(&store, &notifier), "/submitNewsletter", payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["result"]["message"], "Thank you for subscribing!");
        assert!(first["result"]["subscriptionId"].is_string());
        assert!(first["result"].get("alreadySubscribed").is_none());

        let (status, second) = call(app(&store, &notifier), "/submitNewsletter", payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["result"]["alreadySubscribed"], true);
        assert_eq!(second["result"]["message"], "You are already subscribed!");

        assert_eq!(store.len("newsletter_subscribers"), 1);
    }

    #[tokio::test]
    async fn test_newsletter_missing_data_is_invalid_email() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let (status, body) = call(app(&store, &notifier), "/submitNewsletter", "{}").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "Invalid email address");
    }

    #[tokio::test]
    async fn test_health() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();

        let response = app(&store, &notifier)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
