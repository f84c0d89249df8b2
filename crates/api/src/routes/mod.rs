//! HTTP route handlers for the portfolio API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (database ping)
//!
//! # Catalog (public, read-only)
//! GET  /api/skill-categories            - Skill category listing
//! GET  /api/skill-categories/{id}
//! GET  /api/skills?skill_type=&category=
//! GET  /api/skills/{id}
//! GET  /api/experiences?experience_type=
//! GET  /api/experiences/{id}
//! GET  /api/project-categories
//! GET  /api/project-categories/{id}
//! GET  /api/technologies
//! GET  /api/technologies/{id}
//! GET  /api/projects?category=&featured=&technology=&search=&ordering=
//! GET  /api/projects/featured
//! GET  /api/projects/{id}
//! GET  /api/article-categories
//! GET  /api/article-categories/{id}
//! GET  /api/tags
//! GET  /api/tags/{id}
//! GET  /api/articles?category=&featured=&tag=&search=&ordering=
//! GET  /api/articles/featured
//! GET  /api/articles/{id}
//! POST /api/articles/{id}/increment-views
//! GET  /api/settings/current            - Site settings singleton
//!
//! # Contact
//! POST /api/contact                     - Submit a contact message
//!
//! # Message administration (bearer token)
//! GET  /api/contact                     - List messages
//! GET  /api/contact/{id}                - Message detail
//! POST /api/contact/{id}/mark-read
//! POST /api/contact/{id}/mark-replied   - Also stamps replied_at
//! POST /api/contact/{id}/mark-archived
//! ```

pub mod catalog;
pub mod contact;
pub mod messages;
pub mod settings;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/skill-categories", get(catalog::skill_categories))
        .route("/skill-categories/{id}", get(catalog::skill_category))
        .route("/skills", get(catalog::skills))
        .route("/skills/{id}", get(catalog::skill))
        .route("/experiences", get(catalog::experiences))
        .route("/experiences/{id}", get(catalog::experience))
        .route("/project-categories", get(catalog::project_categories))
        .route("/project-categories/{id}", get(catalog::project_category))
        .route("/technologies", get(catalog::technologies))
        .route("/technologies/{id}", get(catalog::technology))
        .route("/projects", get(catalog::projects))
        .route("/projects/featured", get(catalog::projects_featured))
        .route("/projects/{id}", get(catalog::project))
        .route("/article-categories", get(catalog::article_categories))
        .route("/article-categories/{id}", get(catalog::article_category))
        .route("/tags", get(catalog::tags))
        .route("/tags/{id}", get(catalog::tag))
        .route("/articles", get(catalog::articles))
        .route("/articles/featured", get(catalog::articles_featured))
        .route("/articles/{id}", get(catalog::article))
        .route("/articles/{id}/increment-views", post(catalog::increment_views))
}

/// Create the contact routes router: public intake plus the token-guarded
/// administrative surface.
pub fn contact_routes() -> Router<AppState> {
    Router::new()
        .route("/contact", post(contact::submit).get(messages::list))
        .route("/contact/{id}", get(messages::detail))
        .route("/contact/{id}/mark-read", post(messages::mark_read))
        .route("/contact/{id}/mark-replied", post(messages::mark_replied))
        .route("/contact/{id}/mark-archived", post(messages::mark_archived))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    let api = Router::new()
        .merge(catalog_routes())
        .merge(contact_routes())
        .route("/settings/current", get(settings::current));

    Router::new().nest("/api", api)
}
