//! Contact form intake.
//!
//! Validation order: honeypot, field checks, then conditional reCAPTCHA.
//! Only a fully validated submission is persisted; the owner notification
//! that follows is best-effort and cannot change the response.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, FromRequestParts, State},
    http::{HeaderMap, StatusCode, header, request::Parts},
    response::IntoResponse,
};
use serde::Deserialize;
use tracing::instrument;

use portfolio_core::Email;

use crate::db::messages::{MessageRepository, NewContactMessage};
use crate::db::settings::SettingsRepository;
use crate::error::{AppError, FieldErrors, Result};
use crate::services::{notify, recaptcha};
use crate::state::AppState;

/// Contact form submission payload.
///
/// All fields default to empty so that missing fields surface as field-level
/// validation errors instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub recaptcha_token: Option<String>,
    /// Hidden anti-spam field; any value signals an automated submission.
    #[serde(default)]
    pub honeypot: Option<String>,
}

/// A submission that passed field validation.
#[derive(Debug)]
struct ValidContact {
    name: String,
    email: Email,
    subject: String,
    message: String,
}

/// Validate a submission, collecting all field errors at once.
fn validate(form: &ContactForm) -> std::result::Result<ValidContact, FieldErrors> {
    let mut errors = FieldErrors::new();

    if form.honeypot.as_deref().is_some_and(|v| !v.is_empty()) {
        errors.insert("honeypot", "Spam detected".to_string());
        return Err(errors);
    }

    let name = form.name.trim();
    if name.is_empty() {
        errors.insert("name", "This field is required.".to_string());
    }
    let subject = form.subject.trim();
    if subject.is_empty() {
        errors.insert("subject", "This field is required.".to_string());
    }
    let message = form.message.trim();
    if message.is_empty() {
        errors.insert("message", "This field is required.".to_string());
    }

    let email = match Email::parse(&form.email) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.insert("email", e.to_string());
            None
        }
    };

    match (email, errors.is_empty()) {
        (Some(email), true) => Ok(ValidContact {
            name: name.to_string(),
            email,
            subject: subject.to_string(),
            message: message.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Requester IP extractor: first `X-Forwarded-For` entry, falling back to
/// the socket peer address when the header is absent.
#[derive(Debug)]
pub struct ClientIp(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for ClientIp {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip());
        Ok(Self(client_ip(&parts.headers, peer)))
    }
}

fn client_ip(headers: &HeaderMap, peer: Option<std::net::IpAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .or_else(|| peer.map(|ip| ip.to_string()))
}

/// Submit a contact message.
///
/// POST /api/contact
///
/// Returns 201 with a success acknowledgment once the message is persisted;
/// notification delivery never changes the response.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn submit(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    headers: HeaderMap,
    Json(form): Json<ContactForm>,
) -> Result<impl IntoResponse> {
    let valid = validate(&form).map_err(AppError::Validation)?;

    let secret = state.config().recaptcha_secret.as_ref();
    if recaptcha::should_verify(secret, form.recaptcha_token.as_deref()) {
        // Both checked by should_verify
        if let (Some(secret), Some(token)) = (secret, form.recaptcha_token.as_deref()) {
            recaptcha::verify(state.http(), secret, token)
                .await
                .map_err(|e| {
                    tracing::warn!(error = %e, "reCAPTCHA verification did not pass");
                    AppError::BadRequest("reCAPTCHA verification failed".to_string())
                })?;
        }
    }

    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();

    let message = MessageRepository::new(state.pool())
        .create(&NewContactMessage {
            name: valid.name,
            email: valid.email,
            subject: valid.subject,
            message: valid.message,
            ip_address,
            user_agent,
        })
        .await?;

    tracing::info!(message_id = message.id, "Contact message saved");

    // Best-effort owner notification; never affects the response
    match SettingsRepository::new(state.pool()).load().await {
        Ok(settings) => notify::dispatch(&state.config().mail, &settings, &message).await,
        Err(e) => tracing::error!(
            message_id = message.id,
            error = %e,
            "Could not load site settings for notification; message was saved"
        ),
    }

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Your message has been sent successfully!"
        })),
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn valid_form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
            recaptcha_token: None,
            honeypot: Some(String::new()),
        }
    }

    #[test]
    fn test_validate_accepts_well_formed_submission() {
        let valid = validate(&valid_form()).unwrap();
        assert_eq!(valid.name, "Ada");
        assert_eq!(valid.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_validate_trims_fields() {
        let mut form = valid_form();
        form.name = "  Ada  ".to_string();
        form.message = "\nHello\n".to_string();
        let valid = validate(&form).unwrap();
        assert_eq!(valid.name, "Ada");
        assert_eq!(valid.message, "Hello");
    }

    #[test]
    fn test_validate_rejects_filled_honeypot() {
        let mut form = valid_form();
        form.honeypot = Some("spam".to_string());
        let errors = validate(&form).unwrap_err();
        assert_eq!(errors.get("honeypot").unwrap(), "Spam detected");
        // Honeypot short-circuits; no other field errors reported
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_validate_empty_honeypot_is_fine() {
        let mut form = valid_form();
        form.honeypot = Some(String::new());
        assert!(validate(&form).is_ok());
        form.honeypot = None;
        assert!(validate(&form).is_ok());
    }

    #[test]
    fn test_validate_collects_all_missing_fields() {
        let form = ContactForm {
            name: String::new(),
            email: String::new(),
            subject: " ".to_string(),
            message: String::new(),
            recaptcha_token: None,
            honeypot: None,
        };
        let errors = validate(&form).unwrap_err();
        assert!(errors.contains_key("name"));
        assert!(errors.contains_key("email"));
        assert!(errors.contains_key("subject"));
        assert!(errors.contains_key("message"));
    }

    #[test]
    fn test_validate_rejects_malformed_email() {
        let mut form = valid_form();
        form.email = "not-an-email".to_string();
        let errors = validate(&form).unwrap_err();
        assert!(errors.contains_key("email"));
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            "203.0.113.7, 10.0.0.1".parse().unwrap(),
        );
        let peer = Some("192.0.2.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), Some("203.0.113.7".to_string()));
    }

    #[test]
    fn test_client_ip_falls_back_to_peer() {
        let headers = HeaderMap::new();
        let peer = Some("192.0.2.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), Some("192.0.2.1".to_string()));
    }

    #[test]
    fn test_client_ip_empty_header_falls_back() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", "  ".parse().unwrap());
        let peer = Some("192.0.2.1".parse().unwrap());
        assert_eq!(client_ip(&headers, peer), Some("192.0.2.1".to_string()));
    }

    #[test]
    fn test_client_ip_none_when_nothing_known() {
        assert_eq!(client_ip(&HeaderMap::new(), None), None);
    }
}
