//! Message administration: listing and status transitions.
//!
//! The original system delegated this to a staff-only admin UI; here the
//! endpoints are guarded by a static bearer token and fail closed when no
//! token is configured.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, header},
};
use secrecy::ExposeSecret;
use tracing::instrument;

use portfolio_core::MessageStatus;

use crate::db::messages::MessageRepository;
use crate::error::{AppError, Result};
use crate::models::message::ContactMessage;
use crate::state::AppState;

/// Check the `Authorization: Bearer` header against `ADMIN_API_TOKEN`.
///
/// Fails closed: an unconfigured token disables the endpoints entirely.
fn require_admin(state: &AppState, headers: &HeaderMap) -> Result<()> {
    let Some(expected) = state.config().admin_token.as_ref() else {
        tracing::warn!("ADMIN_API_TOKEN is not configured; message administration is disabled");
        return Err(AppError::Unauthorized);
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    match provided {
        Some(token) if token == expected.expose_secret() => Ok(()),
        _ => Err(AppError::Unauthorized),
    }
}

/// List all messages, newest first.
///
/// GET /api/contact
#[instrument(skip_all)]
pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ContactMessage>>> {
    require_admin(&state, &headers)?;
    let messages = MessageRepository::new(state.pool()).list().await?;
    Ok(Json(messages))
}

/// Message detail.
///
/// GET /api/contact/{id}
#[instrument(skip(state, headers))]
pub async fn detail(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ContactMessage>> {
    require_admin(&state, &headers)?;
    MessageRepository::new(state.pool())
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("contact message {id}")))
}

async fn transition(
    state: &AppState,
    headers: &HeaderMap,
    id: i64,
    status: MessageStatus,
) -> Result<Json<ContactMessage>> {
    require_admin(state, headers)?;
    let message = MessageRepository::new(state.pool())
        .set_status(id, status)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("contact message {id}")))?;
    tracing::info!(message_id = id, status = %status, "Contact message status updated");
    Ok(Json(message))
}

/// Mark a message as read.
///
/// POST /api/contact/{id}/mark-read
#[instrument(skip(state, headers))]
pub async fn mark_read(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ContactMessage>> {
    transition(&state, &headers, id, MessageStatus::Read).await
}

/// Mark a message as replied, stamping `replied_at`.
///
/// POST /api/contact/{id}/mark-replied
#[instrument(skip(state, headers))]
pub async fn mark_replied(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ContactMessage>> {
    transition(&state, &headers, id, MessageStatus::Replied).await
}

/// Archive a message.
///
/// POST /api/contact/{id}/mark-archived
#[instrument(skip(state, headers))]
pub async fn mark_archived(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Json<ContactMessage>> {
    transition(&state, &headers, id, MessageStatus::Archived).await
}
