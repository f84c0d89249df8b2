//! Database seeding command.
//!
//! Inserts a small bilingual sample catalog so a fresh instance has
//! something to render. Idempotent: rows are keyed on their unique columns
//! and re-running the command changes nothing.

use sqlx::PgPool;

use portfolio_core::{ExperienceType, SkillType};

use super::{CommandError, connect};

/// Seed the database with sample catalog content.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Seeding sample catalog...");
    seed_skills(&pool).await?;
    seed_experiences(&pool).await?;
    seed_projects(&pool).await?;
    seed_articles(&pool).await?;

    tracing::info!("Seeding complete!");
    Ok(())
}

async fn seed_skills(pool: &PgPool) -> Result<(), CommandError> {
    let category_id: i64 = sqlx::query_scalar(
        r"
        WITH inserted AS (
            INSERT INTO skill_categories (name_fr, name_en, icon, sort_order)
            SELECT 'Développement web', 'Web development', 'code', 0
            WHERE NOT EXISTS (SELECT 1 FROM skill_categories WHERE name_en = 'Web development')
            RETURNING id
        )
        SELECT id FROM inserted
        UNION ALL
        SELECT id FROM skill_categories WHERE name_en = 'Web development'
        LIMIT 1
        ",
    )
    .fetch_one(pool)
    .await?;

    for (name, level, icon) in [("Rust", 8, "cog"), ("PostgreSQL", 7, "database")] {
        sqlx::query(
            r"
            INSERT INTO skills (name, category_id, skill_type, level, icon, sort_order)
            SELECT $1, $2, $3, $4, $5, 0
            WHERE NOT EXISTS (SELECT 1 FROM skills WHERE name = $1)
            ",
        )
        .bind(name)
        .bind(category_id)
        .bind(SkillType::Technical.as_str())
        .bind(level)
        .bind(icon)
        .execute(pool)
        .await?;
    }

    sqlx::query(
        r"
        INSERT INTO skills (name, skill_type, level, icon, sort_order)
        SELECT 'Communication', $1, 8, 'message-circle', 0
        WHERE NOT EXISTS (SELECT 1 FROM skills WHERE name = 'Communication')
        ",
    )
    .bind(SkillType::Soft.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_experiences(pool: &PgPool) -> Result<(), CommandError> {
    sqlx::query(
        r"
        INSERT INTO experiences
            (title_fr, title_en, company_fr, company_en,
             description_fr, description_en, experience_type,
             start_date, end_date, location_fr, location_en, sort_order)
        SELECT
            'Développeur backend', 'Backend developer', 'Acme', 'Acme',
            'Services web en production.', 'Production web services.', $1,
            DATE '2023-01-09', NULL, 'Paris', 'Paris', 0
        WHERE NOT EXISTS (SELECT 1 FROM experiences WHERE title_en = 'Backend developer')
        ",
    )
    .bind(ExperienceType::Professional.as_str())
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_projects(pool: &PgPool) -> Result<(), CommandError> {
    let category_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO project_categories (name_fr, name_en, slug, color, sort_order)
        VALUES ('Applications web', 'Web applications', 'web', '#3B82F6', 0)
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .fetch_one(pool)
    .await?;

    let technology_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO technologies (name, icon, color)
        VALUES ('Rust', 'cog', '#DEA584')
        ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
        RETURNING id
        ",
    )
    .fetch_one(pool)
    .await?;

    let project_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO projects
            (title_fr, title_en, slug, description_fr, description_en,
             short_description_fr, short_description_en, category_id,
             github_url, featured, sort_order)
        VALUES
            ('Portfolio', 'Portfolio', 'portfolio',
             'Backend du portfolio personnel.', 'Personal portfolio backend.',
             'Backend du portfolio.', 'Portfolio backend.', $1,
             'https://github.com/portfolio-backend/portfolio-backend', TRUE, 0)
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .bind(category_id)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO project_technologies (project_id, technology_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(project_id)
    .bind(technology_id)
    .execute(pool)
    .await?;

    Ok(())
}

async fn seed_articles(pool: &PgPool) -> Result<(), CommandError> {
    let category_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO article_categories (name_fr, name_en, slug, description_fr, description_en)
        VALUES ('Tutoriels', 'Tutorials', 'tutorials', '', '')
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .fetch_one(pool)
    .await?;

    let tag_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO tags (name, slug)
        VALUES ('rust', 'rust')
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .fetch_one(pool)
    .await?;

    let article_id: i64 = sqlx::query_scalar(
        r"
        INSERT INTO articles
            (title_fr, title_en, slug, excerpt_fr, excerpt_en,
             content_fr, content_en, category_id, author,
             published, featured, published_at)
        VALUES
            ('Premier article', 'First article', 'first-article',
             'Un premier article.', 'A first article.',
             'Contenu à venir.', 'Content to come.', $1, 'Your Name',
             TRUE, FALSE, NOW())
        ON CONFLICT (slug) DO UPDATE SET slug = EXCLUDED.slug
        RETURNING id
        ",
    )
    .bind(category_id)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r"
        INSERT INTO article_tags (article_id, tag_id)
        VALUES ($1, $2)
        ON CONFLICT DO NOTHING
        ",
    )
    .bind(article_id)
    .bind(tag_id)
    .execute(pool)
    .await?;

    Ok(())
}
