//! Read-only catalog handlers.
//!
//! Listing handlers accept the same filter/search/ordering query parameters
//! the frontend already uses; detail handlers embed related records
//! (category objects, technologies, tags) the way the list responses do.

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use portfolio_core::{ExperienceType, SkillType};

use crate::db::catalog::{
    ArticleFilter, ArticleOrdering, CatalogRepository, ProjectFilter, ProjectOrdering,
};
use crate::error::{AppError, Result};
use crate::models::catalog::{
    Article, ArticleCategory, Experience, Project, ProjectCategory, Skill, SkillCategory, Tag,
    Technology,
};
use crate::state::AppState;

// =============================================================================
// Response shapes
// =============================================================================

/// Skill with its category embedded.
#[derive(Debug, Serialize)]
pub struct SkillOut {
    #[serde(flatten)]
    pub skill: Skill,
    pub category: Option<SkillCategory>,
}

/// Experience with the computed `is_current` flag.
#[derive(Debug, Serialize)]
pub struct ExperienceOut {
    #[serde(flatten)]
    pub experience: Experience,
    pub is_current: bool,
}

impl From<Experience> for ExperienceOut {
    fn from(experience: Experience) -> Self {
        let is_current = experience.is_current();
        Self {
            experience,
            is_current,
        }
    }
}

/// Project with category and technologies embedded.
#[derive(Debug, Serialize)]
pub struct ProjectOut {
    #[serde(flatten)]
    pub project: Project,
    pub category: Option<ProjectCategory>,
    pub technologies: Vec<Technology>,
}

/// Article with category and tags embedded.
#[derive(Debug, Serialize)]
pub struct ArticleOut {
    #[serde(flatten)]
    pub article: Article,
    pub category: Option<ArticleCategory>,
    pub tags: Vec<Tag>,
}

// =============================================================================
// Skills
// =============================================================================

/// List skill categories.
pub async fn skill_categories(State(state): State<AppState>) -> Result<Json<Vec<SkillCategory>>> {
    let rows = CatalogRepository::new(state.pool()).skill_categories().await?;
    Ok(Json(rows))
}

/// Skill category detail.
pub async fn skill_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<SkillCategory>> {
    CatalogRepository::new(state.pool())
        .skill_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("skill category {id}")))
}

/// Query parameters for the skill listing.
#[derive(Debug, Deserialize)]
pub struct SkillListQuery {
    pub skill_type: Option<String>,
    pub category: Option<i64>,
}

/// List skills, optionally filtered by type and category.
#[instrument(skip(state))]
pub async fn skills(
    State(state): State<AppState>,
    Query(query): Query<SkillListQuery>,
) -> Result<Json<Vec<SkillOut>>> {
    let skill_type = query
        .skill_type
        .as_deref()
        .map(str::parse::<SkillType>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let repo = CatalogRepository::new(state.pool());
    let skills = repo.skills(skill_type, query.category).await?;
    let categories: HashMap<i64, SkillCategory> = repo
        .skill_categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let out = skills
        .into_iter()
        .map(|skill| {
            let category = skill.category_id.and_then(|id| categories.get(&id).cloned());
            SkillOut { skill, category }
        })
        .collect();
    Ok(Json(out))
}

/// Skill detail.
pub async fn skill(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<SkillOut>> {
    let repo = CatalogRepository::new(state.pool());
    let skill = repo
        .skill(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("skill {id}")))?;
    let category = match skill.category_id {
        Some(category_id) => repo.skill_category(category_id).await?,
        None => None,
    };
    Ok(Json(SkillOut { skill, category }))
}

// =============================================================================
// Experience
// =============================================================================

/// Query parameters for the experience listing.
#[derive(Debug, Deserialize)]
pub struct ExperienceListQuery {
    pub experience_type: Option<String>,
}

/// List experience entries, most recent first.
#[instrument(skip(state))]
pub async fn experiences(
    State(state): State<AppState>,
    Query(query): Query<ExperienceListQuery>,
) -> Result<Json<Vec<ExperienceOut>>> {
    let experience_type = query
        .experience_type
        .as_deref()
        .map(str::parse::<ExperienceType>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let rows = CatalogRepository::new(state.pool())
        .experiences(experience_type)
        .await?;
    Ok(Json(rows.into_iter().map(ExperienceOut::from).collect()))
}

/// Experience detail.
pub async fn experience(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ExperienceOut>> {
    CatalogRepository::new(state.pool())
        .experience(id)
        .await?
        .map(|e| Json(ExperienceOut::from(e)))
        .ok_or_else(|| AppError::NotFound(format!("experience {id}")))
}

// =============================================================================
// Projects
// =============================================================================

/// List project categories.
pub async fn project_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProjectCategory>>> {
    let rows = CatalogRepository::new(state.pool()).project_categories().await?;
    Ok(Json(rows))
}

/// Project category detail.
pub async fn project_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectCategory>> {
    CatalogRepository::new(state.pool())
        .project_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("project category {id}")))
}

/// List technologies.
pub async fn technologies(State(state): State<AppState>) -> Result<Json<Vec<Technology>>> {
    let rows = CatalogRepository::new(state.pool()).technologies().await?;
    Ok(Json(rows))
}

/// Technology detail.
pub async fn technology(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Technology>> {
    CatalogRepository::new(state.pool())
        .technology(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("technology {id}")))
}

/// Query parameters for the project listing.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub category: Option<i64>,
    pub featured: Option<bool>,
    pub technology: Option<i64>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ProjectListQuery {
    fn into_filter(self) -> ProjectFilter {
        ProjectFilter {
            category: self.category,
            featured: self.featured,
            technology: self.technology,
            search: self.search.filter(|s| !s.trim().is_empty()),
            ordering: self
                .ordering
                .as_deref()
                .map(ProjectOrdering::parse)
                .unwrap_or_default(),
        }
    }
}

/// List projects with filters, search and ordering.
#[instrument(skip(state))]
pub async fn projects(
    State(state): State<AppState>,
    Query(query): Query<ProjectListQuery>,
) -> Result<Json<Vec<ProjectOut>>> {
    let filter = query.into_filter();
    list_projects(&state, &filter).await.map(Json)
}

/// List only featured projects.
pub async fn projects_featured(State(state): State<AppState>) -> Result<Json<Vec<ProjectOut>>> {
    let filter = ProjectFilter {
        featured: Some(true),
        ..ProjectFilter::default()
    };
    list_projects(&state, &filter).await.map(Json)
}

async fn list_projects(state: &AppState, filter: &ProjectFilter) -> Result<Vec<ProjectOut>> {
    let repo = CatalogRepository::new(state.pool());
    let projects = repo.projects(filter).await?;

    let ids: Vec<i64> = projects.iter().map(|p| p.id).collect();
    let mut technologies = repo.technologies_for_projects(&ids).await?;
    let categories: HashMap<i64, ProjectCategory> = repo
        .project_categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(projects
        .into_iter()
        .map(|project| {
            let category = project.category_id.and_then(|id| categories.get(&id).cloned());
            let technologies = technologies.remove(&project.id).unwrap_or_default();
            ProjectOut {
                project,
                category,
                technologies,
            }
        })
        .collect())
}

/// Project detail.
pub async fn project(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProjectOut>> {
    let repo = CatalogRepository::new(state.pool());
    let project = repo
        .project(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("project {id}")))?;

    let category = match project.category_id {
        Some(category_id) => repo.project_category(category_id).await?,
        None => None,
    };
    let technologies = repo
        .technologies_for_projects(&[project.id])
        .await?
        .remove(&project.id)
        .unwrap_or_default();

    Ok(Json(ProjectOut {
        project,
        category,
        technologies,
    }))
}

// =============================================================================
// Articles
// =============================================================================

/// List article categories.
pub async fn article_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<ArticleCategory>>> {
    let rows = CatalogRepository::new(state.pool()).article_categories().await?;
    Ok(Json(rows))
}

/// Article category detail.
pub async fn article_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleCategory>> {
    CatalogRepository::new(state.pool())
        .article_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("article category {id}")))
}

/// List tags.
pub async fn tags(State(state): State<AppState>) -> Result<Json<Vec<Tag>>> {
    let rows = CatalogRepository::new(state.pool()).tags().await?;
    Ok(Json(rows))
}

/// Tag detail.
pub async fn tag(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Tag>> {
    CatalogRepository::new(state.pool())
        .tag(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("tag {id}")))
}

/// Query parameters for the article listing.
#[derive(Debug, Deserialize)]
pub struct ArticleListQuery {
    pub category: Option<i64>,
    pub featured: Option<bool>,
    pub tag: Option<i64>,
    pub search: Option<String>,
    pub ordering: Option<String>,
}

impl ArticleListQuery {
    fn into_filter(self) -> ArticleFilter {
        ArticleFilter {
            category: self.category,
            featured: self.featured,
            tag: self.tag,
            search: self.search.filter(|s| !s.trim().is_empty()),
            ordering: self
                .ordering
                .as_deref()
                .map(ArticleOrdering::parse)
                .unwrap_or_default(),
        }
    }
}

/// List published articles with filters, search and ordering.
#[instrument(skip(state))]
pub async fn articles(
    State(state): State<AppState>,
    Query(query): Query<ArticleListQuery>,
) -> Result<Json<Vec<ArticleOut>>> {
    let filter = query.into_filter();
    list_articles(&state, &filter).await.map(Json)
}

/// List only featured published articles.
pub async fn articles_featured(State(state): State<AppState>) -> Result<Json<Vec<ArticleOut>>> {
    let filter = ArticleFilter {
        featured: Some(true),
        ..ArticleFilter::default()
    };
    list_articles(&state, &filter).await.map(Json)
}

async fn list_articles(state: &AppState, filter: &ArticleFilter) -> Result<Vec<ArticleOut>> {
    let repo = CatalogRepository::new(state.pool());
    let articles = repo.articles(filter).await?;

    let ids: Vec<i64> = articles.iter().map(|a| a.id).collect();
    let mut tags = repo.tags_for_articles(&ids).await?;
    let categories: HashMap<i64, ArticleCategory> = repo
        .article_categories()
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    Ok(articles
        .into_iter()
        .map(|article| {
            let category = article.category_id.and_then(|id| categories.get(&id).cloned());
            let tags = tags.remove(&article.id).unwrap_or_default();
            ArticleOut {
                article,
                category,
                tags,
            }
        })
        .collect())
}

/// Published article detail.
pub async fn article(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ArticleOut>> {
    let repo = CatalogRepository::new(state.pool());
    let article = repo
        .article(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id}")))?;

    let category = match article.category_id {
        Some(category_id) => repo.article_category(category_id).await?,
        None => None,
    };
    let tags = repo
        .tags_for_articles(&[article.id])
        .await?
        .remove(&article.id)
        .unwrap_or_default();

    Ok(Json(ArticleOut {
        article,
        category,
        tags,
    }))
}

/// Bump an article's view counter.
///
/// POST /api/articles/{id}/increment-views
#[instrument(skip(state))]
pub async fn increment_views(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let views = CatalogRepository::new(state.pool())
        .increment_views(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("article {id}")))?;
    Ok(Json(serde_json::json!({ "views_count": views })))
}
