//! Catalog models: skills, experience, projects and articles.
//!
//! All text content is bilingual (`*_fr` / `*_en` columns) and the frontend
//! picks the locale. `sort_order` is an editorially controlled position;
//! ordering rules live in the repositories.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use portfolio_core::{ExperienceType, SkillType};

/// A group of skills (e.g. Frontend, Backend, Design).
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SkillCategory {
    pub id: i64,
    pub name_fr: String,
    pub name_en: String,
    /// Lucide icon name
    pub icon: String,
    pub sort_order: i32,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A technical or soft skill.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i64,
    pub name: String,
    #[serde(skip)]
    pub category_id: Option<i64>,
    pub skill_type: SkillType,
    /// Self-assessed level from 1 to 10
    pub level: i32,
    pub icon: String,
    pub sort_order: i32,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A professional or academic experience entry.
///
/// An open-ended entry (no `end_date`) is the current position; handlers
/// expose that as a computed `is_current` flag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Experience {
    pub id: i64,
    pub title_fr: String,
    pub title_en: String,
    pub company_fr: String,
    pub company_en: String,
    pub description_fr: String,
    pub description_en: String,
    pub experience_type: ExperienceType,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub location_fr: String,
    pub location_en: String,
    pub sort_order: i32,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

impl Experience {
    /// Whether this entry is ongoing.
    #[must_use]
    pub const fn is_current(&self) -> bool {
        self.end_date.is_none()
    }
}

/// A project grouping with a display color.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ProjectCategory {
    pub id: i64,
    pub name_fr: String,
    pub name_en: String,
    pub slug: String,
    /// Hex color code
    pub color: String,
    pub sort_order: i32,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A technology used in projects.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Technology {
    pub id: i64,
    pub name: String,
    pub icon: String,
    pub color: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A portfolio project.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Project {
    pub id: i64,
    pub title_fr: String,
    pub title_en: String,
    pub slug: String,
    pub description_fr: String,
    pub description_en: String,
    pub short_description_fr: String,
    pub short_description_en: String,
    /// Stored media path, served by the frontend's media host
    pub image: Option<String>,
    pub video_url: String,
    pub gif: Option<String>,
    #[serde(skip)]
    pub category_id: Option<i64>,
    pub github_url: String,
    pub demo_url: String,
    pub featured: bool,
    pub sort_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A blog article grouping.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArticleCategory {
    pub id: i64,
    pub name_fr: String,
    pub name_en: String,
    pub slug: String,
    pub description_fr: String,
    pub description_en: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A free-form article tag.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub id: i64,
    pub name: String,
    pub slug: String,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

/// A blog article. Only published articles are exposed by the public API.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Article {
    pub id: i64,
    pub title_fr: String,
    pub title_en: String,
    pub slug: String,
    pub excerpt_fr: String,
    pub excerpt_en: String,
    pub content_fr: String,
    pub content_en: String,
    pub featured_image: Option<String>,
    #[serde(skip)]
    pub category_id: Option<i64>,
    pub author: String,
    pub published: bool,
    pub featured: bool,
    pub views_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}
