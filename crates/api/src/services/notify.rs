//! Owner notification dispatcher.
//!
//! Sends a plaintext email to the site owner after a contact message has
//! been persisted. Strictly best-effort: every unmet precondition and every
//! transport failure is logged and swallowed, so the caller's response never
//! depends on mail delivery.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::header::ContentType,
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::MailConfig;
use crate::models::message::ContactMessage;
use crate::models::settings::SiteSettings;

/// Why a notification was not attempted.
///
/// Preconditions are evaluated in this order, short-circuiting at the first
/// unmet one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// `site_settings.owner_email` is empty or still the placeholder.
    OwnerEmailUnconfigured,
    /// `EMAIL_HOST_USER` is unset.
    SmtpUsernameUnset,
    /// `EMAIL_HOST_PASSWORD` is unset.
    SmtpPasswordUnset,
}

impl SkipReason {
    const fn diagnostic(self) -> &'static str {
        match self {
            Self::OwnerEmailUnconfigured => {
                "owner email is not configured in site settings; set it via the admin surface"
            }
            Self::SmtpUsernameUnset => "EMAIL_HOST_USER is not configured",
            Self::SmtpPasswordUnset => "EMAIL_HOST_PASSWORD is not configured",
        }
    }
}

/// Errors that can occur when building or sending the notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build the email message.
    #[error("failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// A configured address does not parse as a mailbox.
    #[error("invalid email address: {0}")]
    InvalidAddress(String),
}

/// Outcome of a dispatch attempt, for logging.
#[derive(Debug)]
enum Outcome {
    Sent { recipient: String },
    Skipped(SkipReason),
}

/// Check the send preconditions in order.
///
/// Returns the first unmet one, or `None` when sending can be attempted.
#[must_use]
pub fn precondition(mail: &MailConfig, settings: &SiteSettings) -> Option<SkipReason> {
    if !settings.owner_email_configured() {
        return Some(SkipReason::OwnerEmailUnconfigured);
    }
    if mail.username.as_deref().is_none_or(str::is_empty) {
        return Some(SkipReason::SmtpUsernameUnset);
    }
    if mail.password.is_none() {
        return Some(SkipReason::SmtpPasswordUnset);
    }
    None
}

/// Notify the site owner about a new contact message.
///
/// Never fails from the caller's point of view; all outcomes are logged.
pub async fn dispatch(mail: &MailConfig, settings: &SiteSettings, message: &ContactMessage) {
    match send(mail, settings, message).await {
        Ok(Outcome::Sent { recipient }) => {
            tracing::info!(
                message_id = message.id,
                recipient = %recipient,
                "Contact notification sent"
            );
        }
        Ok(Outcome::Skipped(reason)) => {
            tracing::warn!(
                message_id = message.id,
                reason = reason.diagnostic(),
                "Contact notification skipped; message was saved"
            );
        }
        Err(e) => {
            tracing::error!(
                message_id = message.id,
                error = %e,
                "Contact notification failed; message was saved"
            );
        }
    }
}

async fn send(
    mail: &MailConfig,
    settings: &SiteSettings,
    message: &ContactMessage,
) -> Result<Outcome, NotifyError> {
    if let Some(reason) = precondition(mail, settings) {
        return Ok(Outcome::Skipped(reason));
    }

    // precondition() guarantees these are present
    let Some((username, password)) = mail.username.as_deref().zip(mail.password.as_ref()) else {
        return Ok(Outcome::Skipped(SkipReason::SmtpUsernameUnset));
    };
    let sender = mail.sender().unwrap_or(username);

    let email = Message::builder()
        .from(
            sender
                .parse()
                .map_err(|_| NotifyError::InvalidAddress(sender.to_string()))?,
        )
        .to(settings
            .owner_email
            .parse()
            .map_err(|_| NotifyError::InvalidAddress(settings.owner_email.clone()))?)
        .subject(format!("[Portfolio] New message: {}", message.subject))
        .header(ContentType::TEXT_PLAIN)
        .body(notification_body(message))?;

    let credentials = Credentials::new(
        username.to_string(),
        password.expose_secret().to_string(),
    );
    let mailer = if mail.use_tls {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&mail.host)?
            .port(mail.port)
            .credentials(credentials)
            .build()
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&mail.host)
            .port(mail.port)
            .credentials(credentials)
            .build()
    };

    mailer.send(email).await?;

    Ok(Outcome::Sent {
        recipient: settings.owner_email.clone(),
    })
}

/// Plaintext notification body: submitter details, timestamp and origin IP.
fn notification_body(message: &ContactMessage) -> String {
    format!(
        "New contact message received:\n\
         \n\
         Name: {}\n\
         Email: {}\n\
         Subject: {}\n\
         \n\
         Message:\n\
         {}\n\
         \n\
         ---\n\
         Date: {}\n\
         IP: {}\n",
        message.name,
        message.email,
        message.subject,
        message.message,
        message.created_at.format("%Y-%m-%d %H:%M:%S UTC"),
        message.ip_address.as_deref().unwrap_or("unknown"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use secrecy::SecretString;

    use portfolio_core::{Email, MessageStatus};

    use super::*;
    use crate::models::settings::{PLACEHOLDER_OWNER_EMAIL, SINGLETON_ID};

    fn mail_config() -> MailConfig {
        MailConfig {
            host: "smtp.example.com".to_string(),
            port: 587,
            use_tls: true,
            username: Some("mailer@example.com".to_string()),
            password: Some(SecretString::from("app-password")),
            from_address: None,
        }
    }

    fn settings(owner_email: &str) -> SiteSettings {
        SiteSettings {
            id: SINGLETON_ID,
            site_name_fr: "Mon Portfolio".to_string(),
            site_name_en: "My Portfolio".to_string(),
            site_description_fr: String::new(),
            site_description_en: String::new(),
            owner_name: "Owner".to_string(),
            owner_title_fr: "Développeur".to_string(),
            owner_title_en: "Developer".to_string(),
            owner_bio_fr: String::new(),
            owner_bio_en: String::new(),
            owner_photo: None,
            owner_email: owner_email.to_string(),
            owner_phone: String::new(),
            owner_location_fr: String::new(),
            owner_location_en: String::new(),
            cv_file: None,
            github_url: String::new(),
            linkedin_url: String::new(),
            twitter_url: String::new(),
            instagram_url: String::new(),
            portfolio_url: String::new(),
            meta_keywords_fr: String::new(),
            meta_keywords_en: String::new(),
            google_analytics_id: String::new(),
            updated_at: Utc::now(),
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            id: 1,
            name: "Ada".to_string(),
            email: Email::parse("ada@example.com").unwrap(),
            subject: "Hi".to_string(),
            message: "Hello".to_string(),
            status: MessageStatus::New,
            ip_address: Some("203.0.113.7".to_string()),
            user_agent: "curl/8".to_string(),
            created_at: Utc::now(),
            replied_at: None,
        }
    }

    #[test]
    fn test_precondition_owner_email_placeholder() {
        assert_eq!(
            precondition(&mail_config(), &settings(PLACEHOLDER_OWNER_EMAIL)),
            Some(SkipReason::OwnerEmailUnconfigured)
        );
        assert_eq!(
            precondition(&mail_config(), &settings("")),
            Some(SkipReason::OwnerEmailUnconfigured)
        );
    }

    #[test]
    fn test_precondition_username_before_password() {
        let mut mail = mail_config();
        mail.username = None;
        mail.password = None;
        // Username is checked first
        assert_eq!(
            precondition(&mail, &settings("owner@example.com")),
            Some(SkipReason::SmtpUsernameUnset)
        );
    }

    #[test]
    fn test_precondition_password_unset() {
        let mut mail = mail_config();
        mail.password = None;
        assert_eq!(
            precondition(&mail, &settings("owner@example.com")),
            Some(SkipReason::SmtpPasswordUnset)
        );
    }

    #[test]
    fn test_precondition_all_met() {
        assert_eq!(precondition(&mail_config(), &settings("owner@example.com")), None);
    }

    #[test]
    fn test_notification_body_contains_submission_details() {
        let body = notification_body(&message());
        assert!(body.contains("Name: Ada"));
        assert!(body.contains("Email: ada@example.com"));
        assert!(body.contains("Subject: Hi"));
        assert!(body.contains("Hello"));
        assert!(body.contains("IP: 203.0.113.7"));
    }

    #[test]
    fn test_notification_body_unknown_ip() {
        let mut msg = message();
        msg.ip_address = None;
        assert!(notification_body(&msg).contains("IP: unknown"));
    }
}
