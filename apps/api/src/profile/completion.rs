//! Server-side derivation of the profile completion percentage.
//!
//! Clients may send a `completionPercentage`; it is ignored. The stored
//! value always comes from this module.

use crate::profile::handlers::SaveProfileRequest;

const SECTION_POINTS: i32 = 25;

/// Scores a profile document in four sections worth 25 points each:
/// education (university and major), experience, skills plus bio, and at
/// least one public link. Whitespace-only fields count as empty.
pub fn completion_percentage(profile: &SaveProfileRequest) -> i32 {
    let education = has_text(&profile.university) && has_text(&profile.major);
    let experience = has_text(&profile.experience);
    let skills_and_bio = !profile.skills.is_empty() && has_text(&profile.bio);
    let links = has_text(&profile.portfolio_url)
        || has_text(&profile.linkedin_url)
        || has_text(&profile.github_url);

    [education, experience, skills_and_bio, links]
        .into_iter()
        .filter(|complete| *complete)
        .count() as i32
        * SECTION_POINTS
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_profile() -> SaveProfileRequest {
        SaveProfileRequest::default()
    }

    #[test]
    fn test_empty_profile_scores_zero() {
        assert_eq!(completion_percentage(&empty_profile()), 0);
    }

    #[test]
    fn test_education_needs_both_university_and_major() {
        let mut profile = empty_profile();
        profile.university = Some("MIT".to_string());
        assert_eq!(completion_percentage(&profile), 0);

        profile.major = Some("Computer Science".to_string());
        assert_eq!(completion_percentage(&profile), 25);
    }

    #[test]
    fn test_experience_section_scores_alone() {
        let mut profile = empty_profile();
        profile.experience = Some("Two summers at a research lab".to_string());
        assert_eq!(completion_percentage(&profile), 25);
    }

    #[test]
    fn test_skills_without_bio_do_not_count() {
        let mut profile = empty_profile();
        profile.skills = vec!["rust".to_string()];
        assert_eq!(completion_percentage(&profile), 0);

        profile.bio = Some("Compiler enthusiast".to_string());
        assert_eq!(completion_percentage(&profile), 25);
    }

    #[test]
    fn test_any_single_link_completes_the_links_section() {
        let mut profile = empty_profile();
        profile.github_url = Some("https://github.com/ada".to_string());
        assert_eq!(completion_percentage(&profile), 25);

        let mut profile = empty_profile();
        profile.linkedin_url = Some("https://linkedin.com/in/ada".to_string());
        assert_eq!(completion_percentage(&profile), 25);
    }

    #[test]
    fn test_whitespace_only_fields_count_as_empty() {
        let mut profile = empty_profile();
        profile.university = Some("   ".to_string());
        profile.major = Some("Physics".to_string());
        profile.experience = Some("\t".to_string());
        assert_eq!(completion_percentage(&profile), 0);
    }

    #[test]
    fn test_full_profile_scores_one_hundred() {
        let profile = SaveProfileRequest {
            university: Some("ETH Zurich".to_string()),
            major: Some("Mathematics".to_string()),
            experience: Some("Teaching assistant, two years".to_string()),
            skills: vec!["rust".to_string(), "sql".to_string()],
            bio: Some("Systems and databases".to_string()),
            portfolio_url: Some("https://ada.dev".to_string()),
            ..Default::default()
        };
        assert_eq!(completion_percentage(&profile), 100);
    }
}
