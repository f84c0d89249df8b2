//! Database-backed domain models.
//!
//! These structs mirror the table shapes (`sqlx::FromRow`); response-only
//! shapes that embed related records live next to the route handlers.

pub mod catalog;
pub mod message;
pub mod settings;

pub use catalog::{
    Article, ArticleCategory, Experience, Project, ProjectCategory, Skill, SkillCategory, Tag,
    Technology,
};
pub use message::ContactMessage;
pub use settings::SiteSettings;
