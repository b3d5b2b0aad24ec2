//! Status constants and transition checks for moderated entities.
//!
//! These must match the CHECK constraints in the corresponding migrations.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Jobs
// ---------------------------------------------------------------------------

/// Awaiting admin moderation; not publicly listed.
pub const JOB_PENDING: &str = "pending";
/// Approved by an admin; publicly listed and open for applications.
pub const JOB_APPROVED: &str = "approved";
/// Rejected by an admin; visible to the owner only.
pub const JOB_REJECTED: &str = "rejected";
/// Closed by the owner; no further applications accepted.
pub const JOB_CLOSED: &str = "closed";

/// Check that a job in `from` may be moderated into `to`.
///
/// Moderation only applies to pending jobs; owners close approved jobs
/// through the dedicated close endpoint.
pub fn check_job_moderation(from: &str, to: &str) -> Result<(), CoreError> {
    match (from, to) {
        (JOB_PENDING, JOB_APPROVED) | (JOB_PENDING, JOB_REJECTED) => Ok(()),
        _ => Err(CoreError::Conflict(format!(
            "Cannot moderate job from '{from}' to '{to}'"
        ))),
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

pub const APPLICATION_SUBMITTED: &str = "submitted";
pub const APPLICATION_REVIEWED: &str = "reviewed";
pub const APPLICATION_ACCEPTED: &str = "accepted";
pub const APPLICATION_REJECTED: &str = "rejected";

/// Check that an application status transition is allowed.
///
/// `submitted -> reviewed -> accepted | rejected`; `submitted` may also go
/// straight to a terminal state. Terminal states never transition.
pub fn check_application_transition(from: &str, to: &str) -> Result<(), CoreError> {
    let allowed = match from {
        APPLICATION_SUBMITTED => matches!(
            to,
            APPLICATION_REVIEWED | APPLICATION_ACCEPTED | APPLICATION_REJECTED
        ),
        APPLICATION_REVIEWED => matches!(to, APPLICATION_ACCEPTED | APPLICATION_REJECTED),
        _ => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Cannot change application status from '{from}' to '{to}'"
        )))
    }
}

// ---------------------------------------------------------------------------
// Chat rooms
// ---------------------------------------------------------------------------

/// Both participants may send messages.
pub const ROOM_OPEN: &str = "open";
/// No further sends accepted.
pub const ROOM_CLOSED: &str = "closed";

/// Reject sends into a closed room.
pub fn check_room_open(status: &str) -> Result<(), CoreError> {
    if status == ROOM_OPEN {
        Ok(())
    } else {
        Err(CoreError::Conflict("Chat room is closed".into()))
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub const REPORT_OPEN: &str = "open";
pub const REPORT_RESOLVED: &str = "resolved";
pub const REPORT_DISMISSED: &str = "dismissed";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_job_can_be_approved_or_rejected() {
        assert!(check_job_moderation(JOB_PENDING, JOB_APPROVED).is_ok());
        assert!(check_job_moderation(JOB_PENDING, JOB_REJECTED).is_ok());
    }

    #[test]
    fn approved_job_cannot_be_moderated_again() {
        assert!(check_job_moderation(JOB_APPROVED, JOB_REJECTED).is_err());
        assert!(check_job_moderation(JOB_CLOSED, JOB_APPROVED).is_err());
    }

    #[test]
    fn application_happy_path() {
        assert!(check_application_transition(APPLICATION_SUBMITTED, APPLICATION_REVIEWED).is_ok());
        assert!(check_application_transition(APPLICATION_REVIEWED, APPLICATION_ACCEPTED).is_ok());
        assert!(check_application_transition(APPLICATION_SUBMITTED, APPLICATION_REJECTED).is_ok());
    }

    #[test]
    fn terminal_application_states_are_final() {
        assert!(check_application_transition(APPLICATION_ACCEPTED, APPLICATION_REVIEWED).is_err());
        assert!(
            check_application_transition(APPLICATION_REJECTED, APPLICATION_SUBMITTED).is_err()
        );
    }

    #[test]
    fn closed_room_rejects_sends() {
        assert!(check_room_open(ROOM_OPEN).is_ok());
        let err = check_room_open(ROOM_CLOSED).unwrap_err();
        assert!(err.to_string().contains("closed"));
    }
}
