//! Contact message model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use portfolio_core::{Email, MessageStatus};

/// A message submitted through the public contact endpoint.
///
/// Created once per submission with status `new`; afterwards mutated only by
/// the administrative status transitions. Never deleted by normal flow.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: Email,
    pub subject: String,
    pub message: String,
    pub status: MessageStatus,
    /// First `X-Forwarded-For` entry, or the socket peer address
    pub ip_address: Option<String>,
    /// Raw `User-Agent` header
    pub user_agent: String,
    pub created_at: DateTime<Utc>,
    pub replied_at: Option<DateTime<Utc>>,
}
