use std::sync::{Arc, Mutex};

use api::{HttpNotifier, MailSettings, Notification, Notifier, NotifyError};
use axum::{
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use tokio::net::TcpListener;

type Received = Arc<Mutex<Vec<(Option<String>, Notification)>>>;

async fn relay(status: StatusCode) -> (String, Received) {
    let received: Received = Arc::default();

    let app = Router::new()
        .route(
            "/send",
            post(
                move |State(received): State<Received>,
                      headers: HeaderMap,
                      Json(notification): Json<Notification>| async move {
                    let auth = headers
                        .get(AUTHORIZATION)
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_string);
                    received.lock().unwrap().push((auth, notification));
                    (status, "relay says no")
                },
            ),
        )
        .with_state(received.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/send"), received)
}

fn settings(endpoint: String) -> MailSettings {
    MailSettings {
        identity: "site@example.com".into(),
        secret: "hunter2".into(),
        endpoint,
        sender: "DEV Limited Website".into(),
        recipients: vec!["team@example.com".into()],
    }
}

fn notification() -> Notification {
    Notification {
        from: "DEV Limited Website <site@example.com>".into(),
        to: vec!["team@example.com".into()],
        reply_to: Some("jane@example.com".into()),
        subject: "New Contact Form: Jane Doe - General Inquiry".into(),
        text: "Hello".into(),
        html: "<p>Hello</p>".into(),
    }
}

#[tokio::test]
async fn test_posts_notification_with_basic_auth() {
    let (endpoint, received) = relay(StatusCode::OK).await;
    let notifier = HttpNotifier::new(&settings(endpoint));

    notifier.send(&notification()).await.unwrap();

    let received = received.lock().unwrap();
    assert_eq!(received.len(), 1);
    // base64("site@example.com:hunter2")
    assert_eq!(
        received[0].0.as_deref(),
        Some("Basic c2l0ZUBleGFtcGxlLmNvbTpodW50ZXIy")
    );
    assert_eq!(received[0].1, notification());
}

#[tokio::test]
async fn test_relay_error_status_is_rejected() {
    let (endpoint, _received) = relay(StatusCode::INTERNAL_SERVER_ERROR).await;
    let notifier = HttpNotifier::new(&settings(endpoint));

    let err = notifier.send(&notification()).await.unwrap_err();

    match err {
        NotifyError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "relay says no");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_unreachable_relay_is_request_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let notifier = HttpNotifier::new(&settings(format!("http://{addr}/send")));
    let err = notifier.send(&notification()).await.unwrap_err();

    assert!(matches!(err, NotifyError::Request(_)));
}
