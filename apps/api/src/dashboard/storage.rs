use serde::Serialize;
use sqlx::PgPool;

use crate::applications::storage::{JoinedApplicationRow, JOINED_SELECT};
use crate::errors::AppError;
use crate::models::application::{ApplicationStatus, ApplicationWithOpportunity};

/// Summary counts for the dashboard header. `upcoming_deadlines` counts
/// applications whose opportunity deadline falls inside the next 30 days.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_applications: i64,
    pub interviews: i64,
    pub upcoming_deadlines: i64,
}

pub async fn user_stats(pool: &PgPool, user_id: &str) -> Result<DashboardStats, AppError> {
    let total_applications: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

    let interviews: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM applications WHERE user_id = $1 AND status = $2")
            .bind(user_id)
            .bind(ApplicationStatus::Interview)
            .fetch_one(pool)
            .await?;

    let upcoming_deadlines: i64 = sqlx::query_scalar(
        r#"
        SELECT COUNT(*)
        FROM applications a
        JOIN opportunities o ON o.id = a.opportunity_id
        WHERE a.user_id = $1
          AND o.deadline > NOW()
          AND o.deadline < NOW() + INTERVAL '30 days'
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;

    Ok(DashboardStats {
        total_applications,
        interviews,
        upcoming_deadlines,
    })
}

/// Applications whose opportunity deadline falls inside the next 30 days,
/// soonest deadline first. Already-passed deadlines never appear.
pub async fn upcoming_deadlines(
    pool: &PgPool,
    user_id: &str,
    limit: i64,
) -> Result<Vec<ApplicationWithOpportunity>, AppError> {
    let sql = format!(
        "{JOINED_SELECT} WHERE a.user_id = $1 \
         AND o.deadline > NOW() AND o.deadline < NOW() + INTERVAL '30 days' \
         ORDER BY o.deadline ASC LIMIT $2"
    );

    let rows: Vec<JoinedApplicationRow> = sqlx::query_as(&sql)
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await?;

    Ok(rows.into_iter().map(Into::into).collect())
}
