//! Contact message repository.

use sqlx::PgPool;

use portfolio_core::{Email, MessageStatus};

use super::RepositoryError;
use crate::models::message::ContactMessage;

/// Fields captured from a validated contact submission.
#[derive(Debug)]
pub struct NewContactMessage {
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: String,
}

/// Repository for contact message operations.
pub struct MessageRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> MessageRepository<'a> {
    /// Create a new message repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new message with status `new`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new: &NewContactMessage) -> Result<ContactMessage, RepositoryError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r"
            INSERT INTO contact_messages (name, email, subject, message, ip_address, user_agent)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.subject)
        .bind(&new.message)
        .bind(&new.ip_address)
        .bind(&new.user_agent)
        .fetch_one(self.pool)
        .await?;

        Ok(message)
    }

    /// List all messages, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, RepositoryError> {
        let messages = sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages ORDER BY created_at DESC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(messages)
    }

    /// Get a message by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: i64) -> Result<Option<ContactMessage>, RepositoryError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            "SELECT * FROM contact_messages WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(message)
    }

    /// Apply a status transition. `Replied` also stamps `replied_at`.
    ///
    /// Returns `None` when no message with that id exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_status(
        &self,
        id: i64,
        status: MessageStatus,
    ) -> Result<Option<ContactMessage>, RepositoryError> {
        let message = sqlx::query_as::<_, ContactMessage>(
            r"
            UPDATE contact_messages
            SET status = $2,
                replied_at = CASE WHEN $2 = 'replied' THEN NOW() ELSE replied_at END
            WHERE id = $1
            RETURNING *
            ",
        )
        .bind(id)
        .bind(status)
        .fetch_optional(self.pool)
        .await?;

        Ok(message)
    }
}
