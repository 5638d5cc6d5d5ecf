//! Seeds the opportunity catalog with a development data set.
//!
//! The API itself never writes the catalog; this binary stands in for the
//! ingestion pipeline. It is safe to re-run: a non-empty catalog is left
//! untouched.

use anyhow::Result;
use chrono::{Duration, Utc};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use careersync_api::config::Config;
use careersync_api::db::{create_pool, run_migrations};
use careersync_api::models::opportunity::OpportunityType;
use careersync_api::opportunities::storage::{create_opportunity, NewOpportunity};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = create_pool(&config.database_url).await?;
    run_migrations(&pool).await?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM opportunities")
        .fetch_one(&pool)
        .await?;
    if existing > 0 {
        info!("Catalog already holds {existing} opportunities; nothing to seed");
        return Ok(());
    }

    let records = seed_records();
    for record in &records {
        let row = create_opportunity(&pool, record).await?;
        info!("Seeded \"{}\" at {} ({})", row.title, row.organization, row.id);
    }

    info!("Seeded {} opportunities", records.len());
    Ok(())
}

fn seed_records() -> Vec<NewOpportunity> {
    vec![
        NewOpportunity {
            title: "Backend Engineer, Payments".to_string(),
            organization: "Brightline Labs".to_string(),
            description: Some(
                "Own the settlement services that move money for thousands of \
                 merchants. You will design APIs, tune Postgres, and carry a \
                 pager you rarely hear from."
                    .to_string(),
            ),
            location: Some("Remote (US)".to_string()),
            opportunity_type: OpportunityType::Job,
            salary: Some("$140k - $175k".to_string()),
            amount: None,
            deadline: Some(Utc::now() + Duration::days(21)),
            requirements: vec![
                "3+ years building production services".to_string(),
                "Comfort with SQL performance work".to_string(),
            ],
            skills: vec!["rust".to_string(), "postgres".to_string(), "kubernetes".to_string()],
            image_url: None,
            external_url: Some("https://brightline.example.com/careers/backend-payments".to_string()),
        },
        NewOpportunity {
            title: "Platform Engineering Intern".to_string(),
            organization: "Northwind Data".to_string(),
            description: Some(
                "Twelve-week internship on the infrastructure team. Ship real \
                 changes to the deploy pipeline with a dedicated mentor."
                    .to_string(),
            ),
            location: Some("Seattle, WA".to_string()),
            opportunity_type: OpportunityType::Internship,
            salary: Some("$45/hr".to_string()),
            amount: None,
            deadline: Some(Utc::now() + Duration::days(14)),
            requirements: vec![
                "Enrolled in a CS or related degree".to_string(),
                "One systems or networking course".to_string(),
            ],
            skills: vec!["go".to_string(), "linux".to_string(), "terraform".to_string()],
            image_url: None,
            external_url: Some("https://northwind.example.com/early-careers".to_string()),
        },
        NewOpportunity {
            title: "Women in STEM Merit Scholarship".to_string(),
            organization: "Aster Foundation".to_string(),
            description: Some(
                "Annual award for undergraduate women pursuing science, \
                 technology, engineering, or mathematics degrees."
                    .to_string(),
            ),
            location: Some("United States".to_string()),
            opportunity_type: OpportunityType::Scholarship,
            salary: None,
            amount: Some(10_000.0),
            deadline: Some(Utc::now() + Duration::days(45)),
            requirements: vec![
                "GPA of 3.5 or higher".to_string(),
                "Two letters of recommendation".to_string(),
                "500-word personal statement".to_string(),
            ],
            skills: vec![],
            image_url: None,
            external_url: Some("https://aster.example.org/scholarships/stem".to_string()),
        },
        NewOpportunity {
            title: "First-Generation Student Grant".to_string(),
            organization: "Horizon Trust".to_string(),
            description: Some(
                "Need-based grant for first-generation college students. Funds \
                 tuition, housing, or required course materials."
                    .to_string(),
            ),
            location: None,
            opportunity_type: OpportunityType::Grant,
            salary: None,
            amount: Some(5_000.0),
            deadline: Some(Utc::now() + Duration::days(60)),
            requirements: vec![
                "Demonstrated financial need".to_string(),
                "First in family to attend college".to_string(),
            ],
            skills: vec![],
            image_url: None,
            external_url: Some("https://horizontrust.example.org/grants/first-gen".to_string()),
        },
        NewOpportunity {
            title: "Data Engineer".to_string(),
            organization: "Cobalt Health".to_string(),
            description: Some(
                "Build the pipelines behind our clinical analytics product. \
                 Airflow, dbt, and a warehouse that doubles every year."
                    .to_string(),
            ),
            location: Some("Boston, MA (hybrid)".to_string()),
            opportunity_type: OpportunityType::Job,
            salary: Some("$125k - $155k".to_string()),
            amount: None,
            deadline: None,
            requirements: vec!["2+ years with a modern data stack".to_string()],
            skills: vec!["python".to_string(), "sql".to_string(), "airflow".to_string()],
            image_url: None,
            external_url: Some("https://cobalthealth.example.com/jobs/data-engineer".to_string()),
        },
        NewOpportunity {
            title: "Open Source Research Internship".to_string(),
            organization: "Meridian Institute".to_string(),
            description: Some(
                "Paid summer residency contributing to the institute's open \
                 source scientific computing libraries."
                    .to_string(),
            ),
            location: Some("Remote".to_string()),
            opportunity_type: OpportunityType::Internship,
            salary: Some("$8,000 stipend".to_string()),
            amount: None,
            deadline: Some(Utc::now() + Duration::days(28)),
            requirements: vec![
                "Public repository of prior work".to_string(),
                "Familiarity with numerical computing".to_string(),
            ],
            skills: vec!["rust".to_string(), "python".to_string()],
            image_url: None,
            external_url: Some("https://meridian.example.org/residency".to_string()),
        },
    ]
}
