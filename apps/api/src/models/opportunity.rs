use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Kind of catalog entry. Stored as the Postgres enum `opportunity_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "opportunity_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OpportunityType {
    Job,
    Scholarship,
    Internship,
    Grant,
}

impl OpportunityType {
    /// Parses the lowercase wire form used by catalog filters.
    pub fn from_param(value: &str) -> Option<Self> {
        match value {
            "job" => Some(Self::Job),
            "scholarship" => Some(Self::Scholarship),
            "internship" => Some(Self::Internship),
            "grant" => Some(Self::Grant),
            _ => None,
        }
    }
}

/// A catalog entry. `salary` stays free text ("$90k - $120k", "stipend");
/// `amount` carries the numeric value for scholarships and grants.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub id: Uuid,
    pub title: String,
    pub organization: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub opportunity_type: OpportunityType,
    pub salary: Option<String>,
    pub amount: Option<f64>,
    pub deadline: Option<DateTime<Utc>>,
    pub requirements: Vec<String>,
    pub skills: Vec<String>,
    pub image_url: Option<String>,
    pub external_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_param_accepts_all_known_kinds() {
        assert_eq!(OpportunityType::from_param("job"), Some(OpportunityType::Job));
        assert_eq!(
            OpportunityType::from_param("scholarship"),
            Some(OpportunityType::Scholarship)
        );
        assert_eq!(
            OpportunityType::from_param("internship"),
            Some(OpportunityType::Internship)
        );
        assert_eq!(
            OpportunityType::from_param("grant"),
            Some(OpportunityType::Grant)
        );
    }

    #[test]
    fn test_from_param_rejects_unknown_and_cased_values() {
        assert_eq!(OpportunityType::from_param("Job"), None);
        assert_eq!(OpportunityType::from_param("fellowship"), None);
        assert_eq!(OpportunityType::from_param(""), None);
    }

    #[test]
    fn test_wire_form_is_lowercase() {
        let json = serde_json::to_string(&OpportunityType::Internship).unwrap();
        assert_eq!(json, "\"internship\"");
    }
}
