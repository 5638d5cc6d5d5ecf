use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::applications::handlers::{CreateApplicationRequest, UpdateApplicationRequest};
use crate::applications::transitions::transition_allowed;
use crate::errors::{is_foreign_key_violation, is_unique_violation, AppError};
use crate::models::application::{Application, ApplicationStatus, ApplicationWithOpportunity};
use crate::models::opportunity::{Opportunity, OpportunityType};

const APPLICATIONS_USER_OPPORTUNITY_KEY: &str = "applications_user_opportunity_key";

/// Shared select list for queries that return an application joined with
/// its opportunity. Callers append their own WHERE / ORDER BY clauses.
pub(crate) const JOINED_SELECT: &str = "\
SELECT a.id, a.user_id, a.opportunity_id, a.status, a.notes, a.applied_at, \
a.interview_date, a.completion_percentage, a.created_at, a.updated_at, \
o.id AS opp_id, o.title AS opp_title, o.organization AS opp_organization, \
o.description AS opp_description, o.location AS opp_location, o.type AS opp_type, \
o.salary AS opp_salary, o.amount AS opp_amount, o.deadline AS opp_deadline, \
o.requirements AS opp_requirements, o.skills AS opp_skills, o.image_url AS opp_image_url, \
o.external_url AS opp_external_url, o.is_active AS opp_is_active, \
o.created_at AS opp_created_at, o.updated_at AS opp_updated_at \
FROM applications a JOIN opportunities o ON o.id = a.opportunity_id";

/// Flat row produced by [`JOINED_SELECT`]; opportunity columns are aliased
/// with an `opp_` prefix to keep the two `id`/timestamp sets apart.
#[derive(Debug, FromRow)]
pub(crate) struct JoinedApplicationRow {
    pub id: Uuid,
    pub user_id: String,
    pub opportunity_id: Uuid,
    pub status: ApplicationStatus,
    pub notes: Option<String>,
    pub applied_at: Option<DateTime<Utc>>,
    pub interview_date: Option<DateTime<Utc>>,
    pub completion_percentage: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub opp_id: Uuid,
    pub opp_title: String,
    pub opp_organization: String,
    pub opp_description: Option<String>,
    pub opp_location: Option<String>,
    pub opp_type: OpportunityType,
    pub opp_salary: Option<String>,
    pub opp_amount: Option<f64>,
    pub opp_deadline: Option<DateTime<Utc>>,
    pub opp_requirements: Vec<String>,
    pub opp_skills: Vec<String>,
    pub opp_image_url: Option<String>,
    pub opp_external_url: Option<String>,
    pub opp_is_active: bool,
    pub opp_created_at: DateTime<Utc>,
    pub opp_updated_at: DateTime<Utc>,
}

impl From<JoinedApplicationRow> for ApplicationWithOpportunity {
    fn from(row: JoinedApplicationRow) -> Self {
        Self {
            application: Application {
                id: row.id,
                user_id: row.user_id,
                opportunity_id: row.opportunity_id,
                status: row.status,
                notes: row.notes,
                applied_at: row.applied_at,
                interview_date: row.interview_date,
                completion_percentage: row.completion_percentage,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
            opportunity: Opportunity {
                id: row.opp_id,
                title: row.opp_title,
                organization: row.opp_organization,
                description: row.opp_description,
                location: row.opp_location,
                opportunity_type: row.opp_type,
                salary: row.opp_salary,
                amount: row.opp_amount,
                deadline: row.opp_deadline,
                requirements: row.opp_requirements,
                skills: row.opp_skills,
                image_url: row.opp_image_url,
                external_url: row.opp_external_url,
                is_active: row.opp_is_active,
                created_at: row.opp_created_at,
                updated_at: row.opp_updated_at,
            },
        }
    }
}

/// Lists the user's applications with their opportunities, most recently
/// updated first, optionally narrowed to one status.
pub async fn list_applications(
    pool: &PgPool,
    user_id: &str,
    status: Option<ApplicationStatus>,
) -> Result<Vec<ApplicationWithOpportunity>, AppError> {
    let rows: Vec<JoinedApplicationRow> = match status {
        Some(status) => {
            let sql = format!(
                "{JOINED_SELECT} WHERE a.user_id = $1 AND a.status = $2 ORDER BY a.updated_at DESC"
            );
            sqlx::query_as(&sql)
                .bind(user_id)
                .bind(status)
                .fetch_all(pool)
                .await?
        }
        None => {
            let sql = format!("{JOINED_SELECT} WHERE a.user_id = $1 ORDER BY a.updated_at DESC");
            sqlx::query_as(&sql).bind(user_id).fetch_all(pool).await?
        }
    };

    Ok(rows.into_iter().map(Into::into).collect())
}

/// Inserts a new application for the user. A duplicate (user, opportunity)
/// pair maps to 409 via the unique constraint; an unknown opportunity maps
/// to 400 via the foreign key.
pub async fn create_application(
    pool: &PgPool,
    user_id: &str,
    input: &CreateApplicationRequest,
) -> Result<Application, AppError> {
    let status = input.status.unwrap_or(ApplicationStatus::Saved);
    let completion = input.completion_percentage.unwrap_or(0);

    let result = sqlx::query_as::<_, Application>(
        r#"
        INSERT INTO applications
            (user_id, opportunity_id, status, notes, applied_at, interview_date, completion_percentage)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(input.opportunity_id)
    .bind(status)
    .bind(&input.notes)
    .bind(input.applied_at)
    .bind(input.interview_date)
    .bind(completion)
    .fetch_one(pool)
    .await;

    match result {
        Ok(application) => Ok(application),
        Err(err) if is_unique_violation(&err, APPLICATIONS_USER_OPPORTUNITY_KEY) => Err(
            AppError::Conflict("Application already exists for this opportunity".to_string()),
        ),
        Err(err) if is_foreign_key_violation(&err) => Err(AppError::BadRequest(format!(
            "Opportunity {} does not exist",
            input.opportunity_id
        ))),
        Err(err) => Err(err.into()),
    }
}

/// Applies a partial update inside a transaction. The row is locked and the
/// status transition checked against the current value before anything is
/// written, so concurrent updates cannot race past the lifecycle rules.
/// A row that does not exist or belongs to another user is a 404 either way.
pub async fn update_application(
    pool: &PgPool,
    user_id: &str,
    id: Uuid,
    input: &UpdateApplicationRequest,
) -> Result<Application, AppError> {
    let mut tx = pool.begin().await?;

    let current: Option<Application> =
        sqlx::query_as("SELECT * FROM applications WHERE id = $1 AND user_id = $2 FOR UPDATE")
            .bind(id)
            .bind(user_id)
            .fetch_optional(&mut *tx)
            .await?;

    let current = current.ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    if let Some(next) = input.status {
        if !transition_allowed(current.status, next) {
            return Err(AppError::BadRequest(format!(
                "Cannot move application from {} to {}",
                current.status.as_str(),
                next.as_str()
            )));
        }
    }

    let mut query = update_query(id, user_id, input);
    let updated: Application = query.build_query_as().fetch_one(&mut *tx).await?;

    tx.commit().await?;
    Ok(updated)
}

/// Deletes the user's application. Returns the number of rows removed;
/// deleting a row that is already gone is not an error.
pub async fn delete_application(pool: &PgPool, user_id: &str, id: Uuid) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM applications WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected())
}

/// Builds the partial UPDATE from whichever fields the request carried.
/// An explicit JSON null binds SQL NULL and clears the column; an absent
/// field is left out entirely. `updated_at` is always refreshed.
fn update_query(
    id: Uuid,
    user_id: &str,
    input: &UpdateApplicationRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut qb: QueryBuilder<'static, Postgres> = QueryBuilder::new("UPDATE applications SET ");
    let mut fields = qb.separated(", ");

    if let Some(status) = input.status {
        fields.push("status = ");
        fields.push_bind_unseparated(status);
    }
    if let Some(notes) = &input.notes {
        fields.push("notes = ");
        fields.push_bind_unseparated(notes.clone());
    }
    if let Some(applied_at) = &input.applied_at {
        fields.push("applied_at = ");
        fields.push_bind_unseparated(*applied_at);
    }
    if let Some(interview_date) = &input.interview_date {
        fields.push("interview_date = ");
        fields.push_bind_unseparated(*interview_date);
    }
    if let Some(completion) = input.completion_percentage {
        fields.push("completion_percentage = ");
        fields.push_bind_unseparated(completion);
    }
    fields.push("updated_at = now()");

    qb.push(" WHERE id = ");
    qb.push_bind(id);
    qb.push(" AND user_id = ");
    qb.push_bind(user_id.to_string());
    qb.push(" RETURNING *");
    qb
}
