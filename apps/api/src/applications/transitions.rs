//! Status lifecycle for tracked applications.
//!
//! The pipeline runs saved → applying → applied → interview and ends in
//! accepted or rejected. Forward moves may skip stages, backward moves
//! re-open an application, and restating the current status is a no-op.
//! The single forbidden move is flipping a decided application straight
//! to the opposite outcome.

use crate::models::application::ApplicationStatus;

/// True when an application may move from `from` to `to` in one update.
pub fn transition_allowed(from: ApplicationStatus, to: ApplicationStatus) -> bool {
    from == to || !(from.is_terminal() && to.is_terminal())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ApplicationStatus::*;

    const ALL: [ApplicationStatus; 6] = [Saved, Applying, Applied, Interview, Accepted, Rejected];

    #[test]
    fn test_forward_moves_allowed_including_stage_skips() {
        assert!(transition_allowed(Saved, Applying));
        assert!(transition_allowed(Applying, Applied));
        assert!(transition_allowed(Applied, Interview));
        assert!(transition_allowed(Saved, Interview));
        assert!(transition_allowed(Saved, Applied));
        assert!(transition_allowed(Applied, Accepted));
        assert!(transition_allowed(Saved, Rejected));
    }

    #[test]
    fn test_backward_moves_reopen_an_application() {
        assert!(transition_allowed(Interview, Saved));
        assert!(transition_allowed(Applied, Applying));
        assert!(transition_allowed(Accepted, Applying));
        assert!(transition_allowed(Rejected, Interview));
    }

    #[test]
    fn test_decided_outcomes_cannot_flip() {
        assert!(!transition_allowed(Accepted, Rejected));
        assert!(!transition_allowed(Rejected, Accepted));
    }

    #[test]
    fn test_restating_the_current_status_is_allowed() {
        for status in ALL {
            assert!(transition_allowed(status, status), "{status:?} -> {status:?}");
        }
    }

    #[test]
    fn test_terminal_flips_are_the_only_forbidden_pairs() {
        for from in ALL {
            for to in ALL {
                let flip = from != to && from.is_terminal() && to.is_terminal();
                assert_eq!(
                    transition_allowed(from, to),
                    !flip,
                    "{from:?} -> {to:?}"
                );
            }
        }
    }
}
