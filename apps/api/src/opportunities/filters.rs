//! Catalog filter normalization.
//!
//! The web client sends `"All Types"` / `"All Locations"` when a dropdown
//! is cleared; both mean "no filter", as do blank strings. Negative limit
//! and offset values behave as absent.

use serde::Deserialize;

use crate::errors::AppError;
use crate::models::opportunity::OpportunityType;

pub const ALL_TYPES: &str = "All Types";
pub const ALL_LOCATIONS: &str = "All Locations";

/// Filters accepted by `GET /api/opportunities`, as sent on the wire.
#[derive(Debug, Default, Deserialize)]
pub struct OpportunityFilters {
    #[serde(rename = "type")]
    pub opportunity_type: Option<String>,
    pub location: Option<String>,
    pub field: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Normalized filters ready to parameterize the catalog query.
#[derive(Debug, Default, PartialEq)]
pub struct CatalogQuery {
    pub opportunity_type: Option<OpportunityType>,
    pub location: Option<String>,
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl OpportunityFilters {
    /// Normalizes wire filters. An unknown `type` value is a 400; sentinel
    /// and blank values mean "no filter".
    pub fn normalize(self) -> Result<CatalogQuery, AppError> {
        let opportunity_type = match clean(self.opportunity_type, ALL_TYPES) {
            Some(raw) => Some(OpportunityType::from_param(&raw).ok_or_else(|| {
                AppError::BadRequest(format!("Unknown opportunity type '{raw}'"))
            })?),
            None => None,
        };

        if let Some(field) = &self.field {
            // Accepted for wire compatibility; catalog rows carry no field tag.
            tracing::debug!("Ignoring unsupported field filter '{field}'");
        }

        Ok(CatalogQuery {
            opportunity_type,
            location: clean(self.location, ALL_LOCATIONS),
            search: self
                .search
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            limit: self.limit.filter(|n| *n >= 0),
            offset: self.offset.filter(|n| *n >= 0),
        })
    }
}

fn clean(value: Option<String>, sentinel: &str) -> Option<String> {
    let trimmed = value?.trim().to_string();
    if trimmed.is_empty() || trimmed == sentinel {
        return None;
    }
    Some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_values_mean_no_filter() {
        let filters = OpportunityFilters {
            opportunity_type: Some(ALL_TYPES.to_string()),
            location: Some(ALL_LOCATIONS.to_string()),
            ..Default::default()
        };
        let query = filters.normalize().unwrap();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_blank_values_mean_no_filter() {
        let filters = OpportunityFilters {
            opportunity_type: Some("   ".to_string()),
            location: Some("".to_string()),
            search: Some("  ".to_string()),
            ..Default::default()
        };
        let query = filters.normalize().unwrap();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_known_type_parses_and_search_is_trimmed() {
        let filters = OpportunityFilters {
            opportunity_type: Some("scholarship".to_string()),
            location: Some("Remote".to_string()),
            search: Some("  rust backend ".to_string()),
            ..Default::default()
        };
        let query = filters.normalize().unwrap();
        assert_eq!(query.opportunity_type, Some(OpportunityType::Scholarship));
        assert_eq!(query.location.as_deref(), Some("Remote"));
        assert_eq!(query.search.as_deref(), Some("rust backend"));
    }

    #[test]
    fn test_unknown_type_is_a_bad_request() {
        let filters = OpportunityFilters {
            opportunity_type: Some("fellowship".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            filters.normalize(),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_negative_paging_values_are_dropped() {
        let filters = OpportunityFilters {
            limit: Some(-5),
            offset: Some(-1),
            ..Default::default()
        };
        let query = filters.normalize().unwrap();
        assert_eq!(query.limit, None);
        assert_eq!(query.offset, None);
    }

    #[test]
    fn test_zero_limit_is_kept_as_an_explicit_empty_page() {
        let filters = OpportunityFilters {
            limit: Some(0),
            offset: Some(0),
            ..Default::default()
        };
        let query = filters.normalize().unwrap();
        assert_eq!(query.limit, Some(0));
        assert_eq!(query.offset, Some(0));
    }
}
