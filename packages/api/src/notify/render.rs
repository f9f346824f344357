//! Plain-text and HTML bodies for team notifications.
//!
//! Records reaching this module are already sanitized, so their fields are
//! interpolated as-is. The caller address comes from request headers and is
//! escaped here before it lands in HTML.

use crate::models::{ContactSubmission, NewsletterSubscription};
use crate::validation::escape_html;

use super::{Envelope, Notification};

const GENERAL_INQUIRY: &str = "General Inquiry";
const SUBSCRIPTION_SUBJECT: &str = "New Newsletter Subscription";

/// Notification for an accepted contact form. Replies go to the submitter.
pub fn contact(envelope: &Envelope, submission_id: &str, submission: &ContactSubmission) -> Notification {
    let service_label = submission.service.label();

    let mut details = vec![
        ("Name", submission.name.as_str()),
        ("Email", submission.email.as_str()),
    ];
    if !submission.company.is_empty() {
        details.push(("Company", submission.company.as_str()));
    }
    if !submission.phone.is_empty() {
        details.push(("Phone", submission.phone.as_str()));
    }
    if let Some(label) = service_label {
        details.push(("Service Interest", label));
    }

    let mut text = vec![
        "New Contact Form Submission".to_string(),
        String::new(),
        format!("Submission ID: {submission_id}"),
        "---".to_string(),
    ];
    text.extend(details.iter().map(|(key, value)| format!("{key}: {value}")));
    text.extend([
        "---".to_string(),
        "Message:".to_string(),
        submission.message.clone(),
        "---".to_string(),
        format!("Submitted from IP: {}", submission.source_address),
    ]);

    let mut html = vec![
        "<h2>New Contact Form Submission</h2>".to_string(),
        format!("<p><strong>Submission ID:</strong> {submission_id}</p>"),
        "<hr>".to_string(),
    ];
    html.extend(
        details
            .iter()
            .map(|(key, value)| format!("<p><strong>{key}:</strong> {value}</p>")),
    );
    html.extend([
        "<hr>".to_string(),
        "<p><strong>Message:</strong></p>".to_string(),
        format!("<p>{}</p>", submission.message.replace('\n', "<br>")),
        "<hr>".to_string(),
        format!(
            "<p><small>Submitted from IP: {}</small></p>",
            escape_html(&submission.source_address)
        ),
    ]);

    Notification {
        from: envelope.from.clone(),
        to: envelope.to.clone(),
        reply_to: Some(submission.email.clone()),
        subject: format!(
            "New Contact Form: {} - {}",
            submission.name,
            service_label.unwrap_or(GENERAL_INQUIRY)
        ),
        text: text.join("\n"),
        html: html.join("\n"),
    }
}

/// Notification for a new newsletter subscriber.
pub fn subscription(
    envelope: &Envelope,
    subscription_id: &str,
    subscription: &NewsletterSubscription,
) -> Notification {
    Notification {
        from: envelope.from.clone(),
        to: envelope.to.clone(),
        reply_to: None,
        subject: SUBSCRIPTION_SUBJECT.to_string(),
        text: format!(
            "New newsletter subscription:\n\nEmail: {}\nSubscription ID: {}\nIP: {}",
            subscription.email, subscription_id, subscription.source_address
        ),
        html: format!(
            "<h2>New Newsletter Subscription</h2><p><strong>Email:</strong> {}</p><p><strong>Subscription ID:</strong> {}</p><p><small>IP: {}</small></p>",
            escape_html(&subscription.email),
            subscription_id,
            escape_html(&subscription.source_address)
        ),
    }
}
