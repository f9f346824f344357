//! # Validation and sanitization of form input
//!
//! [`validate_contact`] turns a raw [`ContactForm`] into either a
//! [`SanitizedContact`] or the complete list of rules the input violates. Every
//! field is checked independently and all violations are reported together, so a
//! visitor can fix the whole form in one pass. The function is pure: it never
//! panics on malformed input and the same form always yields the same verdict.
//!
//! ## Field rules
//!
//! | Field | Required | Length (chars) | Pattern |
//! |-------|----------|----------------|---------|
//! | name | yes | 2–100 | letters, whitespace, `-`, `'` |
//! | email | yes | ≤ 254 | `local@domain.tld`, lowercased |
//! | company | no | ≤ 100 | |
//! | phone | no | ≤ 20 | digits, whitespace, `-+().` |
//! | service | no | | one of [`Service`] |
//! | message | yes | 10–5000 | |
//!
//! All fields are trimmed first. On top of the per-field rules the combined text
//! of name, email, company and message is matched against a small blocklist
//! (script and iframe tags, `javascript:` URIs, inline event handlers, a few spam
//! keywords). The blocklist is a coarse filter and not an XSS defence; safety of
//! the stored record comes from [`escape_html`], which is applied to every text
//! field of the sanitized output, the email included.
//!
//! [`validate_email`] is the narrower check used by newsletter signups.

use once_cell::sync::Lazy;
use regex::{Regex, RegexSet};
use thiserror::Error;

use crate::models::{ContactForm, SanitizedContact, Service};

pub const NAME_LENGTH: &str = "Name must be between 2 and 100 characters";
pub const NAME_CHARACTERS: &str = "Name contains invalid characters";
pub const EMAIL_INVALID: &str = "Invalid email address";
pub const EMAIL_TOO_LONG: &str = "Email address too long";
pub const COMPANY_TOO_LONG: &str = "Company name too long";
pub const PHONE_FORMAT: &str = "Invalid phone number format";
pub const PHONE_TOO_LONG: &str = "Phone number too long";
pub const SERVICE_INVALID: &str = "Invalid service selection";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";
pub const MESSAGE_TOO_LONG: &str = "Message too long (max 5000 characters)";
pub const PROHIBITED_CONTENT: &str = "Content contains prohibited patterns";

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 100;
const EMAIL_MAX: usize = 254;
const COMPANY_MAX: usize = 100;
const PHONE_MAX: usize = 20;
const MESSAGE_MIN: usize = 10;
const MESSAGE_MAX: usize = 5000;

static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-']+$").expect("name pattern compiles"));
static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));
static PHONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9\s\-+().]+$").expect("phone pattern compiles"));
static SPAM_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        r"(?i)<script",
        r"(?i)javascript:",
        r"(?i)<iframe",
        r"(?i)onclick",
        r"(?i)onerror",
        r"(?i)(viagra|cialis|lottery|winner)",
    ])
    .expect("spam patterns compile")
});

/// Every rule a contact form violated, in field order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .0.join(", "))]
pub struct ValidationErrors(pub Vec<String>);

impl ValidationErrors {
    pub fn messages(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, message: &str) -> bool {
        self.0.iter().any(|m| m == message)
    }
}

/// Escape angle brackets so the text is inert inside HTML.
pub fn escape_html(text: &str) -> String {
    text.replace('<', "&lt;").replace('>', "&gt;")
}

/// Validate and sanitize a contact form.
pub fn validate_contact(form: &ContactForm) -> Result<SanitizedContact, ValidationErrors> {
    let mut errors: Vec<&'static str> = Vec::new();

    let name = trimmed(&form.name);
    let name_len = name.chars().count();
    if !(NAME_MIN..=NAME_MAX).contains(&name_len) {
        errors.push(NAME_LENGTH);
    }
    if !NAME_PATTERN.is_match(name) {
        errors.push(NAME_CHARACTERS);
    }

    let email = trimmed(&form.email).to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        errors.push(EMAIL_INVALID);
    }
    if email.chars().count() > EMAIL_MAX {
        errors.push(EMAIL_TOO_LONG);
    }

    let company = trimmed(&form.company);
    if company.chars().count() > COMPANY_MAX {
        errors.push(COMPANY_TOO_LONG);
    }

    let phone = trimmed(&form.phone);
    if !phone.is_empty() && !PHONE_PATTERN.is_match(phone) {
        errors.push(PHONE_FORMAT);
    }
    if phone.chars().count() > PHONE_MAX {
        errors.push(PHONE_TOO_LONG);
    }

    let service = trimmed(&form.service).parse::<Service>().unwrap_or_else(|_| {
        errors.push(SERVICE_INVALID);
        Service::Unspecified
    });

    let message = trimmed(&form.message);
    let message_len = message.chars().count();
    if message_len < MESSAGE_MIN {
        errors.push(MESSAGE_TOO_SHORT);
    }
    if message_len > MESSAGE_MAX {
        errors.push(MESSAGE_TOO_LONG);
    }

    let all_text = format!("{name} {email} {company} {message}");
    if SPAM_PATTERNS.is_match(&all_text) {
        errors.push(PROHIBITED_CONTENT);
    }

    if !errors.is_empty() {
        return Err(ValidationErrors(
            errors.into_iter().map(str::to_string).collect(),
        ));
    }

    Ok(SanitizedContact {
        name: escape_html(name),
        email: escape_html(&email),
        company: escape_html(company),
        phone: escape_html(phone),
        service,
        message: escape_html(message),
    })
}

/// Normalise and check a newsletter email address.
///
/// Returns the trimmed, lowercased address, or the first rule it breaks.
pub fn validate_email(raw: Option<&str>) -> Result<String, &'static str> {
    let email = raw.unwrap_or_default().trim().to_lowercase();
    if !EMAIL_PATTERN.is_match(&email) {
        return Err(EMAIL_INVALID);
    }
    if email.chars().count() > EMAIL_MAX {
        return Err(EMAIL_TOO_LONG);
    }
    Ok(email)
}

fn trimmed(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or_default().trim()
}
