//! Site settings repository.
//!
//! The settings table holds exactly one row with its id pinned to
//! [`SINGLETON_ID`]. Creation goes through `INSERT ... ON CONFLICT DO
//! NOTHING` keyed on that fixed id rather than check-then-create, so two
//! concurrent `load` calls cannot produce a second row. There is no delete
//! operation.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::settings::{PLACEHOLDER_OWNER_EMAIL, SINGLETON_ID, SiteSettings};

/// Repository for the site settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Return the one settings row, creating it with placeholder defaults
    /// when absent.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn load(&self) -> Result<SiteSettings, RepositoryError> {
        sqlx::query(
            r"
            INSERT INTO site_settings
                (id, owner_name, owner_title_fr, owner_title_en,
                 owner_bio_fr, owner_bio_en, owner_email)
            VALUES ($1, 'Your Name', 'Développeur', 'Developer',
                    'Biographie en français', 'Biography in English', $2)
            ON CONFLICT (id) DO NOTHING
            ",
        )
        .bind(SINGLETON_ID)
        .bind(PLACEHOLDER_OWNER_EMAIL)
        .execute(self.pool)
        .await?;

        let settings = sqlx::query_as::<_, SiteSettings>(
            "SELECT * FROM site_settings WHERE id = $1",
        )
        .bind(SINGLETON_ID)
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Persist the settings, always writing to the pinned id.
    ///
    /// Any would-be insert is converted into an update of the existing row,
    /// so repeated saves can never grow the table.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn save(&self, settings: &SiteSettings) -> Result<SiteSettings, RepositoryError> {
        let saved = sqlx::query_as::<_, SiteSettings>(
            r"
            INSERT INTO site_settings
                (id, site_name_fr, site_name_en, site_description_fr, site_description_en,
                 owner_name, owner_title_fr, owner_title_en, owner_bio_fr, owner_bio_en,
                 owner_photo, owner_email, owner_phone, owner_location_fr, owner_location_en,
                 cv_file, github_url, linkedin_url, twitter_url, instagram_url, portfolio_url,
                 meta_keywords_fr, meta_keywords_en, google_analytics_id, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15,
                    $16, $17, $18, $19, $20, $21, $22, $23, $24, NOW())
            ON CONFLICT (id) DO UPDATE SET
                site_name_fr = EXCLUDED.site_name_fr,
                site_name_en = EXCLUDED.site_name_en,
                site_description_fr = EXCLUDED.site_description_fr,
                site_description_en = EXCLUDED.site_description_en,
                owner_name = EXCLUDED.owner_name,
                owner_title_fr = EXCLUDED.owner_title_fr,
                owner_title_en = EXCLUDED.owner_title_en,
                owner_bio_fr = EXCLUDED.owner_bio_fr,
                owner_bio_en = EXCLUDED.owner_bio_en,
                owner_photo = EXCLUDED.owner_photo,
                owner_email = EXCLUDED.owner_email,
                owner_phone = EXCLUDED.owner_phone,
                owner_location_fr = EXCLUDED.owner_location_fr,
                owner_location_en = EXCLUDED.owner_location_en,
                cv_file = EXCLUDED.cv_file,
                github_url = EXCLUDED.github_url,
                linkedin_url = EXCLUDED.linkedin_url,
                twitter_url = EXCLUDED.twitter_url,
                instagram_url = EXCLUDED.instagram_url,
                portfolio_url = EXCLUDED.portfolio_url,
                meta_keywords_fr = EXCLUDED.meta_keywords_fr,
                meta_keywords_en = EXCLUDED.meta_keywords_en,
                google_analytics_id = EXCLUDED.google_analytics_id,
                updated_at = NOW()
            RETURNING *
            ",
        )
        .bind(SINGLETON_ID)
        .bind(&settings.site_name_fr)
        .bind(&settings.site_name_en)
        .bind(&settings.site_description_fr)
        .bind(&settings.site_description_en)
        .bind(&settings.owner_name)
        .bind(&settings.owner_title_fr)
        .bind(&settings.owner_title_en)
        .bind(&settings.owner_bio_fr)
        .bind(&settings.owner_bio_en)
        .bind(&settings.owner_photo)
        .bind(&settings.owner_email)
        .bind(&settings.owner_phone)
        .bind(&settings.owner_location_fr)
        .bind(&settings.owner_location_en)
        .bind(&settings.cv_file)
        .bind(&settings.github_url)
        .bind(&settings.linkedin_url)
        .bind(&settings.twitter_url)
        .bind(&settings.instagram_url)
        .bind(&settings.portfolio_url)
        .bind(&settings.meta_keywords_fr)
        .bind(&settings.meta_keywords_en)
        .bind(&settings.google_analytics_id)
        .fetch_one(self.pool)
        .await?;

        Ok(saved)
    }
}
