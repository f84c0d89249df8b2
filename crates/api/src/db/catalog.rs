//! Read-only catalog repository.
//!
//! Every query here serves a public GET endpoint; nothing in this module
//! writes except the article view counter. Filters use null-or-match binds so
//! the SQL stays static; only the ORDER BY clause varies, and that is taken
//! from a whitelist, never from client input directly.

use std::collections::HashMap;

use sqlx::PgPool;

use portfolio_core::{ExperienceType, SkillType};

use super::RepositoryError;
use crate::models::catalog::{
    Article, ArticleCategory, Experience, Project, ProjectCategory, Skill, SkillCategory, Tag,
    Technology,
};

/// Whitelisted orderings for project listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectOrdering {
    /// featured desc, sort_order desc, created_at desc
    #[default]
    Default,
    CreatedAt {
        descending: bool,
    },
    SortOrder {
        descending: bool,
    },
    TitleFr {
        descending: bool,
    },
}

impl ProjectOrdering {
    /// Parse a client-supplied ordering value; unknown values fall back to
    /// the default ordering.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let (descending, field) = value
            .strip_prefix('-')
            .map_or((false, value), |rest| (true, rest));
        match field {
            "created_at" => Self::CreatedAt { descending },
            "order" | "sort_order" => Self::SortOrder { descending },
            "title_fr" => Self::TitleFr { descending },
            _ => Self::Default,
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Default => "featured DESC, sort_order DESC, created_at DESC",
            Self::CreatedAt { descending: false } => "created_at",
            Self::CreatedAt { descending: true } => "created_at DESC",
            Self::SortOrder { descending: false } => "sort_order",
            Self::SortOrder { descending: true } => "sort_order DESC",
            Self::TitleFr { descending: false } => "title_fr",
            Self::TitleFr { descending: true } => "title_fr DESC",
        }
    }
}

/// Whitelisted orderings for article listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArticleOrdering {
    /// published_at desc nulls last, created_at desc
    #[default]
    Default,
    PublishedAt {
        descending: bool,
    },
    CreatedAt {
        descending: bool,
    },
    ViewsCount {
        descending: bool,
    },
}

impl ArticleOrdering {
    /// Parse a client-supplied ordering value; unknown values fall back to
    /// the default ordering.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let (descending, field) = value
            .strip_prefix('-')
            .map_or((false, value), |rest| (true, rest));
        match field {
            "published_at" => Self::PublishedAt { descending },
            "created_at" => Self::CreatedAt { descending },
            "views_count" => Self::ViewsCount { descending },
            _ => Self::Default,
        }
    }

    const fn sql(self) -> &'static str {
        match self {
            Self::Default => "published_at DESC NULLS LAST, created_at DESC",
            Self::PublishedAt { descending: false } => "published_at NULLS FIRST",
            Self::PublishedAt { descending: true } => "published_at DESC NULLS LAST",
            Self::CreatedAt { descending: false } => "created_at",
            Self::CreatedAt { descending: true } => "created_at DESC",
            Self::ViewsCount { descending: false } => "views_count",
            Self::ViewsCount { descending: true } => "views_count DESC",
        }
    }
}

/// Filters for the project listing.
#[derive(Debug, Default)]
pub struct ProjectFilter {
    pub category: Option<i64>,
    pub featured: Option<bool>,
    pub technology: Option<i64>,
    pub search: Option<String>,
    pub ordering: ProjectOrdering,
}

/// Filters for the article listing.
#[derive(Debug, Default)]
pub struct ArticleFilter {
    pub category: Option<i64>,
    pub featured: Option<bool>,
    pub tag: Option<i64>,
    pub search: Option<String>,
    pub ordering: ArticleOrdering,
}

/// Repository for the read-only catalog.
pub struct CatalogRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CatalogRepository<'a> {
    /// Create a new catalog repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    // -------------------------------------------------------------------------
    // Skills
    // -------------------------------------------------------------------------

    /// List skill categories in editorial order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn skill_categories(&self) -> Result<Vec<SkillCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, SkillCategory>(
            "SELECT * FROM skill_categories ORDER BY sort_order, name_fr",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a skill category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn skill_category(&self, id: i64) -> Result<Option<SkillCategory>, RepositoryError> {
        let row = sqlx::query_as::<_, SkillCategory>("SELECT * FROM skill_categories WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// List skills, optionally filtered by type and category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn skills(
        &self,
        skill_type: Option<SkillType>,
        category: Option<i64>,
    ) -> Result<Vec<Skill>, RepositoryError> {
        let rows = sqlx::query_as::<_, Skill>(
            r"
            SELECT * FROM skills
            WHERE ($1::text IS NULL OR skill_type = $1)
              AND ($2::bigint IS NULL OR category_id = $2)
            ORDER BY category_id NULLS LAST, sort_order, name
            ",
        )
        .bind(skill_type)
        .bind(category)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a skill by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn skill(&self, id: i64) -> Result<Option<Skill>, RepositoryError> {
        let row = sqlx::query_as::<_, Skill>("SELECT * FROM skills WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    // -------------------------------------------------------------------------
    // Experience
    // -------------------------------------------------------------------------

    /// List experience entries, most recent first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn experiences(
        &self,
        experience_type: Option<ExperienceType>,
    ) -> Result<Vec<Experience>, RepositoryError> {
        let rows = sqlx::query_as::<_, Experience>(
            r"
            SELECT * FROM experiences
            WHERE ($1::text IS NULL OR experience_type = $1)
            ORDER BY start_date DESC, sort_order DESC
            ",
        )
        .bind(experience_type)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get an experience entry by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn experience(&self, id: i64) -> Result<Option<Experience>, RepositoryError> {
        let row = sqlx::query_as::<_, Experience>("SELECT * FROM experiences WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    // -------------------------------------------------------------------------
    // Projects
    // -------------------------------------------------------------------------

    /// List project categories in editorial order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn project_categories(&self) -> Result<Vec<ProjectCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProjectCategory>(
            "SELECT * FROM project_categories ORDER BY sort_order, name_fr",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get a project category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn project_category(
        &self,
        id: i64,
    ) -> Result<Option<ProjectCategory>, RepositoryError> {
        let row =
            sqlx::query_as::<_, ProjectCategory>("SELECT * FROM project_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row)
    }

    /// List all technologies by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn technologies(&self) -> Result<Vec<Technology>, RepositoryError> {
        let rows = sqlx::query_as::<_, Technology>("SELECT * FROM technologies ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a technology by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn technology(&self, id: i64) -> Result<Option<Technology>, RepositoryError> {
        let row = sqlx::query_as::<_, Technology>("SELECT * FROM technologies WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// List projects with optional filters, free-text search and ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn projects(&self, filter: &ProjectFilter) -> Result<Vec<Project>, RepositoryError> {
        let sql = format!(
            r"
            SELECT * FROM projects
            WHERE ($1::bigint IS NULL OR category_id = $1)
              AND ($2::boolean IS NULL OR featured = $2)
              AND ($3::bigint IS NULL OR id IN
                   (SELECT project_id FROM project_technologies WHERE technology_id = $3))
              AND ($4::text IS NULL
                   OR title_fr ILIKE '%' || $4 || '%'
                   OR title_en ILIKE '%' || $4 || '%'
                   OR description_fr ILIKE '%' || $4 || '%'
                   OR description_en ILIKE '%' || $4 || '%')
            ORDER BY {}
            ",
            filter.ordering.sql()
        );

        let rows = sqlx::query_as::<_, Project>(&sql)
            .bind(filter.category)
            .bind(filter.featured)
            .bind(filter.technology)
            .bind(filter.search.as_deref())
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a project by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn project(&self, id: i64) -> Result<Option<Project>, RepositoryError> {
        let row = sqlx::query_as::<_, Project>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// Technologies for a set of projects, grouped by project id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn technologies_for_projects(
        &self,
        project_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Technology>>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            project_id: i64,
            #[sqlx(flatten)]
            technology: Technology,
        }

        let rows = sqlx::query_as::<_, Row>(
            r"
            SELECT pt.project_id, t.id, t.name, t.icon, t.color, t.created_at
            FROM project_technologies pt
            JOIN technologies t ON t.id = pt.technology_id
            WHERE pt.project_id = ANY($1)
            ORDER BY t.name
            ",
        )
        .bind(project_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Technology>> = HashMap::new();
        for row in rows {
            grouped.entry(row.project_id).or_default().push(row.technology);
        }
        Ok(grouped)
    }

    // -------------------------------------------------------------------------
    // Articles
    // -------------------------------------------------------------------------

    /// List article categories by French name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn article_categories(&self) -> Result<Vec<ArticleCategory>, RepositoryError> {
        let rows = sqlx::query_as::<_, ArticleCategory>(
            "SELECT * FROM article_categories ORDER BY name_fr",
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Get an article category by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn article_category(
        &self,
        id: i64,
    ) -> Result<Option<ArticleCategory>, RepositoryError> {
        let row =
            sqlx::query_as::<_, ArticleCategory>("SELECT * FROM article_categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;
        Ok(row)
    }

    /// List all tags by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let rows = sqlx::query_as::<_, Tag>("SELECT * FROM tags ORDER BY name")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a tag by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tag(&self, id: i64) -> Result<Option<Tag>, RepositoryError> {
        let row = sqlx::query_as::<_, Tag>("SELECT * FROM tags WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?;
        Ok(row)
    }

    /// List published articles with optional filters, search and ordering.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn articles(&self, filter: &ArticleFilter) -> Result<Vec<Article>, RepositoryError> {
        let sql = format!(
            r"
            SELECT * FROM articles
            WHERE published
              AND ($1::bigint IS NULL OR category_id = $1)
              AND ($2::boolean IS NULL OR featured = $2)
              AND ($3::bigint IS NULL OR id IN
                   (SELECT article_id FROM article_tags WHERE tag_id = $3))
              AND ($4::text IS NULL
                   OR title_fr ILIKE '%' || $4 || '%'
                   OR title_en ILIKE '%' || $4 || '%'
                   OR excerpt_fr ILIKE '%' || $4 || '%'
                   OR excerpt_en ILIKE '%' || $4 || '%'
                   OR content_fr ILIKE '%' || $4 || '%'
                   OR content_en ILIKE '%' || $4 || '%')
            ORDER BY {}
            ",
            filter.ordering.sql()
        );

        let rows = sqlx::query_as::<_, Article>(&sql)
            .bind(filter.category)
            .bind(filter.featured)
            .bind(filter.tag)
            .bind(filter.search.as_deref())
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Get a published article by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn article(&self, id: i64) -> Result<Option<Article>, RepositoryError> {
        let row = sqlx::query_as::<_, Article>(
            "SELECT * FROM articles WHERE id = $1 AND published",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(row)
    }

    /// Atomically bump an article's view counter, returning the new value.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn increment_views(&self, id: i64) -> Result<Option<i32>, RepositoryError> {
        let views = sqlx::query_scalar::<_, i32>(
            r"
            UPDATE articles SET views_count = views_count + 1
            WHERE id = $1 AND published
            RETURNING views_count
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;
        Ok(views)
    }

    /// Tags for a set of articles, grouped by article id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn tags_for_articles(
        &self,
        article_ids: &[i64],
    ) -> Result<HashMap<i64, Vec<Tag>>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct Row {
            article_id: i64,
            #[sqlx(flatten)]
            tag: Tag,
        }

        let rows = sqlx::query_as::<_, Row>(
            r"
            SELECT links.article_id, t.id, t.name, t.slug, t.created_at
            FROM article_tags links
            JOIN tags t ON t.id = links.tag_id
            WHERE links.article_id = ANY($1)
            ORDER BY t.name
            ",
        )
        .bind(article_ids)
        .fetch_all(self.pool)
        .await?;

        let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
        for row in rows {
            grouped.entry(row.article_id).or_default().push(row.tag);
        }
        Ok(grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_ordering_parse() {
        assert_eq!(
            ProjectOrdering::parse("created_at"),
            ProjectOrdering::CreatedAt { descending: false }
        );
        assert_eq!(
            ProjectOrdering::parse("-created_at"),
            ProjectOrdering::CreatedAt { descending: true }
        );
        assert_eq!(
            ProjectOrdering::parse("-order"),
            ProjectOrdering::SortOrder { descending: true }
        );
        assert_eq!(
            ProjectOrdering::parse("title_fr"),
            ProjectOrdering::TitleFr { descending: false }
        );
    }

    #[test]
    fn test_project_ordering_rejects_unknown_fields() {
        // Anything outside the whitelist falls back to the default ordering,
        // so client input can never reach the SQL string.
        assert_eq!(
            ProjectOrdering::parse("id; DROP TABLE projects"),
            ProjectOrdering::Default
        );
        assert_eq!(ProjectOrdering::parse(""), ProjectOrdering::Default);
        assert_eq!(ProjectOrdering::parse("-"), ProjectOrdering::Default);
    }

    #[test]
    fn test_article_ordering_parse() {
        assert_eq!(
            ArticleOrdering::parse("-views_count"),
            ArticleOrdering::ViewsCount { descending: true }
        );
        assert_eq!(
            ArticleOrdering::parse("published_at"),
            ArticleOrdering::PublishedAt { descending: false }
        );
        assert_eq!(ArticleOrdering::parse("title_fr"), ArticleOrdering::Default);
    }

    #[test]
    fn test_ordering_sql_is_static() {
        assert_eq!(
            ProjectOrdering::Default.sql(),
            "featured DESC, sort_order DESC, created_at DESC"
        );
        assert_eq!(
            ArticleOrdering::Default.sql(),
            "published_at DESC NULLS LAST, created_at DESC"
        );
    }
}
