use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::opportunity::Opportunity;

/// Lifecycle stage of a tracked application. Stored as the Postgres enum
/// `application_status`. `accepted` and `rejected` are terminal outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Saved,
    Applying,
    Applied,
    Interview,
    Accepted,
    Rejected,
}

impl ApplicationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Accepted | Self::Rejected)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Saved => "saved",
            Self::Applying => "applying",
            Self::Applied => "applied",
            Self::Interview => "interview",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }
}

/// A user's tracked application against one catalog entry. The pair
/// (user_id, opportunity_id) is unique.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Application {
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
}

/// An application joined with the opportunity it targets, as returned by
/// the list and deadline endpoints.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithOpportunity {
    #[serde(flatten)]
    pub application: Application,
    pub opportunity: Opportunity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_accepted_and_rejected_are_terminal() {
        assert!(ApplicationStatus::Accepted.is_terminal());
        assert!(ApplicationStatus::Rejected.is_terminal());
        assert!(!ApplicationStatus::Saved.is_terminal());
        assert!(!ApplicationStatus::Applying.is_terminal());
        assert!(!ApplicationStatus::Applied.is_terminal());
        assert!(!ApplicationStatus::Interview.is_terminal());
    }

    #[test]
    fn test_status_parses_from_lowercase_wire_form() {
        let status: ApplicationStatus = serde_json::from_str("\"interview\"").unwrap();
        assert_eq!(status, ApplicationStatus::Interview);
    }

    #[test]
    fn test_status_rejects_unknown_wire_values() {
        assert!(serde_json::from_str::<ApplicationStatus>("\"ghosted\"").is_err());
        assert!(serde_json::from_str::<ApplicationStatus>("\"Saved\"").is_err());
    }
}
