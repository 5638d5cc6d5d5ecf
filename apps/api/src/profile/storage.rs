use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::profile::UserProfile;
use crate::profile::handlers::SaveProfileRequest;

/// Full-document upsert keyed on `user_id`. A single statement, so two
/// concurrent first saves collapse onto the one row guarded by the unique
/// constraint instead of racing an existence check.
pub async fn save_profile(
    pool: &PgPool,
    user_id: &str,
    input: &SaveProfileRequest,
    completion: i32,
) -> Result<UserProfile, AppError> {
    let profile = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles
            (user_id, gpa, major, university, graduation_year, skills, experience,
             resume_url, transcript_url, portfolio_url, linkedin_url, github_url,
             bio, completion_percentage)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
        ON CONFLICT (user_id) DO UPDATE SET
            gpa = EXCLUDED.gpa,
            major = EXCLUDED.major,
            university = EXCLUDED.university,
            graduation_year = EXCLUDED.graduation_year,
            skills = EXCLUDED.skills,
            experience = EXCLUDED.experience,
            resume_url = EXCLUDED.resume_url,
            transcript_url = EXCLUDED.transcript_url,
            portfolio_url = EXCLUDED.portfolio_url,
            linkedin_url = EXCLUDED.linkedin_url,
            github_url = EXCLUDED.github_url,
            bio = EXCLUDED.bio,
            completion_percentage = EXCLUDED.completion_percentage,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(user_id)
    .bind(input.gpa)
    .bind(&input.major)
    .bind(&input.university)
    .bind(input.graduation_year)
    .bind(&input.skills)
    .bind(&input.experience)
    .bind(&input.resume_url)
    .bind(&input.transcript_url)
    .bind(&input.portfolio_url)
    .bind(&input.linkedin_url)
    .bind(&input.github_url)
    .bind(&input.bio)
    .bind(completion)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Fetches the user's profile, if one has been saved.
pub async fn get_profile(pool: &PgPool, user_id: &str) -> Result<Option<UserProfile>, AppError> {
    let profile =
        sqlx::query_as::<_, UserProfile>("SELECT * FROM user_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?;

    Ok(profile)
}
