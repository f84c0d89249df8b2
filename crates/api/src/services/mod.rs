//! Side-effect services: reCAPTCHA verification and owner notification.

pub mod notify;
pub mod recaptcha;
