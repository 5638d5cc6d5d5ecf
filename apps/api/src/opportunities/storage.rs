use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use validator::Validate;

use crate::errors::AppError;
use crate::models::opportunity::{Opportunity, OpportunityType};
use crate::opportunities::filters::CatalogQuery;

/// Insert payload for the catalog ingestion path. The public API never
/// writes the catalog; only the seed binary uses this.
#[derive(Debug, Clone, Validate)]
pub struct NewOpportunity {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub organization: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub opportunity_type: OpportunityType,
    pub salary: Option<String>,
    #[validate(range(min = 0.0))]
    pub amount: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    #[validate(url)]
    pub external_url: Option<String>,
}

/// Builds the catalog list query for normalized filters. Only active rows
/// are listed; the free-text search matches title, organization, and
/// description.
fn list_query(filters: &CatalogQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<'static, Postgres> =
        QueryBuilder::new("SELECT * FROM opportunities WHERE is_active = TRUE");

    if let Some(opportunity_type) = filters.opportunity_type {
        qb.push(" AND type = ");
        qb.push_bind(opportunity_type);
    }

    if let Some(location) = &filters.location {
        qb.push(" AND location ILIKE ");
        qb.push_bind(format!("%{location}%"));
    }

    if let Some(search) = &filters.search {
        let pattern = format!("%{search}%");
        qb.push(" AND (title ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR organization ILIKE ");
        qb.push_bind(pattern.clone());
        qb.push(" OR description ILIKE ");
        qb.push_bind(pattern);
        qb.push(")");
    }

    qb.push(" ORDER BY created_at DESC");

    if let Some(limit) = filters.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
    }
    if let Some(offset) = filters.offset {
        qb.push(" OFFSET ");
        qb.push_bind(offset);
    }

    qb
}

/// Lists active catalog entries matching the filters, newest first.
pub async fn list_opportunities(
    pool: &PgPool,
    filters: &CatalogQuery,
) -> Result<Vec<Opportunity>, AppError> {
    let mut query = list_query(filters);
    let rows = query
        .build_query_as::<Opportunity>()
        .fetch_all(pool)
        .await?;

    Ok(rows)
}

/// Fetches one catalog entry by id, active or not.
pub async fn get_opportunity(pool: &PgPool, id: Uuid) -> Result<Option<Opportunity>, AppError> {
    let row = sqlx::query_as::<_, Opportunity>("SELECT * FROM opportunities WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row)
}

/// Most recent active entries. Stands in for profile-aware matching; the
/// user id is accepted so the signature holds when a real ranker lands.
pub async fn recommended_opportunities(
    pool: &PgPool,
    _user_id: &str,
    limit: i64,
) -> Result<Vec<Opportunity>, AppError> {
    let rows = sqlx::query_as::<_, Opportunity>(
        "SELECT * FROM opportunities WHERE is_active = TRUE ORDER BY created_at DESC LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Inserts a catalog entry.
pub async fn create_opportunity(
    pool: &PgPool,
    input: &NewOpportunity,
) -> Result<Opportunity, AppError> {
    input.validate()?;

    let row = sqlx::query_as::<_, Opportunity>(
        r#"
        INSERT INTO opportunities
            (title, organization, description, location, type, salary, amount,
             deadline, requirements, skills, image_url, external_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(&input.title)
    .bind(&input.organization)
    .bind(&input.description)
    .bind(&input.location)
    .bind(input.opportunity_type)
    .bind(&input.salary)
    .bind(input.amount)
    .bind(input.deadline)
    .bind(&input.requirements)
    .bind(&input.skills)
    .bind(&input.image_url)
    .bind(&input.external_url)
    .fetch_one(pool)
    .await?;

    Ok(row)
}
