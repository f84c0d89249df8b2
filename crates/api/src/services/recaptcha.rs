//! reCAPTCHA verification client.
//!
//! Verification is deliberately fail-open when no deployment secret is
//! configured: the check is skipped entirely. Once a secret exists and the
//! client supplied a token, any negative, malformed or failed verification
//! response rejects the submission.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Google siteverify endpoint.
const VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Errors that can occur during token verification.
#[derive(Debug, Error)]
pub enum RecaptchaError {
    /// The HTTP call to the verification service failed.
    #[error("verification request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered, but did not confirm the token.
    #[error("verification rejected: {}", error_codes.join(", "))]
    Rejected {
        /// `error-codes` reported by the service, may be empty.
        error_codes: Vec<String>,
    },
}

/// Response shape of the siteverify endpoint.
#[derive(Debug, Deserialize)]
struct VerifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(default, rename = "error-codes")]
    error_codes: Vec<String>,
}

/// Whether a verification call should be made at all.
///
/// Both a configured secret and a non-empty client token are required; in
/// every other combination the check is skipped (fail open).
#[must_use]
pub fn should_verify(secret: Option<&SecretString>, token: Option<&str>) -> bool {
    secret.is_some() && token.is_some_and(|t| !t.trim().is_empty())
}

/// Verify a client token against the external verification service.
///
/// # Errors
///
/// Returns `RecaptchaError::Http` if the call fails or the body cannot be
/// parsed, and `RecaptchaError::Rejected` if the service answers without
/// `success: true`.
pub async fn verify(
    client: &reqwest::Client,
    secret: &SecretString,
    token: &str,
) -> Result<(), RecaptchaError> {
    let response: VerifyResponse = client
        .post(VERIFY_URL)
        .form(&[("secret", secret.expose_secret()), ("response", token)])
        .send()
        .await?
        .json()
        .await?;

    if response.success {
        Ok(())
    } else {
        Err(RecaptchaError::Rejected {
            error_codes: response.error_codes,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_should_verify_requires_secret_and_token() {
        let secret = SecretString::from("server-secret");
        assert!(should_verify(Some(&secret), Some("token")));
        assert!(!should_verify(None, Some("token")));
        assert!(!should_verify(Some(&secret), None));
        assert!(!should_verify(Some(&secret), Some("")));
        assert!(!should_verify(Some(&secret), Some("   ")));
        assert!(!should_verify(None, None));
    }

    #[test]
    fn test_verify_response_parses_success() {
        let parsed: VerifyResponse =
            serde_json::from_str(r#"{"success": true, "hostname": "example.com"}"#).unwrap();
        assert!(parsed.success);
        assert!(parsed.error_codes.is_empty());
    }

    #[test]
    fn test_verify_response_parses_failure_with_codes() {
        let parsed: VerifyResponse = serde_json::from_str(
            r#"{"success": false, "error-codes": ["invalid-input-response"]}"#,
        )
        .unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error_codes, vec!["invalid-input-response"]);
    }

    #[test]
    fn test_verify_response_missing_success_is_failure() {
        // A malformed body without a success flag must not verify.
        let parsed: VerifyResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.success);
    }
}
