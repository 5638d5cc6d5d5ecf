use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Applies the schema at startup. Every statement is idempotent (guarded
/// CREATE TYPE, CREATE TABLE IF NOT EXISTS), so re-running is safe.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    info!("Running database migrations...");

    sqlx::query(
        r#"
        DO $$ BEGIN
            CREATE TYPE opportunity_type AS ENUM ('job', 'scholarship', 'internship', 'grant');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END $$
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        DO $$ BEGIN
            CREATE TYPE application_status AS ENUM
                ('saved', 'applying', 'applied', 'interview', 'accepted', 'rejected');
        EXCEPTION
            WHEN duplicate_object THEN NULL;
        END $$
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT UNIQUE,
            first_name TEXT,
            last_name TEXT,
            profile_image_url TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS opportunities (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            title TEXT NOT NULL,
            organization TEXT NOT NULL,
            description TEXT,
            location TEXT,
            type opportunity_type NOT NULL,
            salary TEXT,
            amount DOUBLE PRECISION,
            deadline TIMESTAMPTZ,
            requirements TEXT[] NOT NULL DEFAULT '{}',
            skills TEXT[] NOT NULL DEFAULT '{}',
            image_url TEXT,
            external_url TEXT,
            is_active BOOLEAN NOT NULL DEFAULT true,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS applications (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            opportunity_id UUID NOT NULL REFERENCES opportunities(id) ON DELETE CASCADE,
            status application_status NOT NULL DEFAULT 'saved',
            notes TEXT,
            applied_at TIMESTAMPTZ,
            interview_date TIMESTAMPTZ,
            completion_percentage INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            CONSTRAINT applications_user_opportunity_key UNIQUE (user_id, opportunity_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS user_profiles (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            user_id TEXT NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
            gpa DOUBLE PRECISION,
            major TEXT,
            university TEXT,
            graduation_year INTEGER,
            skills TEXT[] NOT NULL DEFAULT '{}',
            experience TEXT,
            resume_url TEXT,
            transcript_url TEXT,
            portfolio_url TEXT,
            linkedin_url TEXT,
            github_url TEXT,
            bio TEXT,
            completion_percentage INTEGER NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_opportunities_active_created
         ON opportunities (is_active, created_at DESC)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_opportunities_deadline
         ON opportunities (deadline)",
    )
    .execute(pool)
    .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_applications_user_updated
         ON applications (user_id, updated_at DESC)",
    )
    .execute(pool)
    .await?;

    info!("Database migrations completed");
    Ok(())
}
