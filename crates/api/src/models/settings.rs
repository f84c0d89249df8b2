//! Site settings singleton model.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// The owner email placeholder written by the lazy-create path.
///
/// The notification dispatcher treats this value as "not configured" and
/// skips sending rather than mailing a dead address.
pub const PLACEHOLDER_OWNER_EMAIL: &str = "email@example.com";

/// Fixed primary key of the one settings row.
pub const SINGLETON_ID: i64 = 1;

/// Site-wide settings. Exactly one row exists (id pinned to
/// [`SINGLETON_ID`], enforced by a CHECK constraint and upsert-only writes).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SiteSettings {
    #[serde(skip)]
    pub id: i64,
    pub site_name_fr: String,
    pub site_name_en: String,
    pub site_description_fr: String,
    pub site_description_en: String,
    pub owner_name: String,
    pub owner_title_fr: String,
    pub owner_title_en: String,
    pub owner_bio_fr: String,
    pub owner_bio_en: String,
    pub owner_photo: Option<String>,
    pub owner_email: String,
    pub owner_phone: String,
    pub owner_location_fr: String,
    pub owner_location_en: String,
    pub cv_file: Option<String>,
    pub github_url: String,
    pub linkedin_url: String,
    pub twitter_url: String,
    pub instagram_url: String,
    pub portfolio_url: String,
    pub meta_keywords_fr: String,
    pub meta_keywords_en: String,
    pub google_analytics_id: String,
    #[serde(skip)]
    pub updated_at: DateTime<Utc>,
}

impl SiteSettings {
    /// Whether the owner email has been set to a real address.
    #[must_use]
    pub fn owner_email_configured(&self) -> bool {
        !self.owner_email.is_empty() && self.owner_email != PLACEHOLDER_OWNER_EMAIL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_email(email: &str) -> SiteSettings {
        SiteSettings {
            id: SINGLETON_ID,
            site_name_fr: "Mon Portfolio".to_string(),
            site_name_en: "My Portfolio".to_string(),
            site_description_fr: String::new(),
            site_description_en: String::new(),
            owner_name: "Your Name".to_string(),
            owner_title_fr: "Développeur".to_string(),
            owner_title_en: "Developer".to_string(),
            owner_bio_fr: String::new(),
            owner_bio_en: String::new(),
            owner_photo: None,
            owner_email: email.to_string(),
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

    #[test]
    fn test_placeholder_email_is_not_configured() {
        assert!(!settings_with_email(PLACEHOLDER_OWNER_EMAIL).owner_email_configured());
        assert!(!settings_with_email("").owner_email_configured());
    }

    #[test]
    fn test_real_email_is_configured() {
        assert!(settings_with_email("owner@example.com").owner_email_configured());
    }
}
