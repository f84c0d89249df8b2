//! Site settings handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::db::settings::SettingsRepository;
use crate::error::Result;
use crate::models::settings::SiteSettings;
use crate::state::AppState;

/// Return the current site settings.
///
/// GET /api/settings/current
///
/// Lazily creates the singleton row with placeholder defaults on first
/// access, so this endpoint always has something to return.
#[instrument(skip_all)]
pub async fn current(State(state): State<AppState>) -> Result<Json<SiteSettings>> {
    let settings = SettingsRepository::new(state.pool()).load().await?;
    Ok(Json(settings))
}
