//! Administrative enrollment status changes.

use tracing::info;

use crate::{
    error::{Error, Result, validate_id},
    models::{Enrollment, EnrollmentStatus},
    store::EnrollmentStore,
};

/// Moves an enrollment to `status` on behalf of an administrator.
///
/// `Completed` and `Failed` belong to the completion evaluator and cannot be
/// assigned here, and a completed enrollment is frozen.
pub async fn change_status(
    store: &dyn EnrollmentStore,
    enrollment_id: i64,
    status: EnrollmentStatus,
    expected_version: i64,
) -> Result<Enrollment> {
    validate_id("enrollment_id", enrollment_id)?;

    if status.is_completion_outcome() {
        return Err(Error::Validation {
            field: "status",
            reason: format!("{status:?} is assigned by course evaluation"),
        });
    }

    let not_found = || Error::NotFound {
        entity: "enrollment",
        key: enrollment_id.to_string(),
    };

    let current = store.find_by_id(enrollment_id).await?.ok_or_else(not_found)?;

    if current.status == EnrollmentStatus::Completed {
        return Err(Error::InvalidState {
            enrollment_id,
            status: current.status,
        });
    }

    if current.version != expected_version
        || !store
            .update_status(enrollment_id, status, expected_version)
            .await?
    {
        return Err(Error::ConcurrencyConflict { enrollment_id });
    }

    info!(enrollment_id, from = ?current.status, to = ?status, "enrollment status changed");

    store.find_by_id(enrollment_id).await?.ok_or_else(not_found)
}
