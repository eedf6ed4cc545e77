//! Error taxonomy for authorization decisions and access-control mutations.
//!
//! Every variant is terminal for the call that raised it; the engine never
//! retries internally. The calling layer owns the mapping to user-facing
//! outcomes (HTTP status codes and the like). Denials always name the missing
//! right and the scope context that was consulted so audits and tests can
//! assert on them.
use crate::rights::Right;
use crate::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AccessError {
    /// A referenced user, group, role, or resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// A create collided with an existing name or id.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The identity lacks `right` in the consulted scope context.
    #[error("permission denied: requires {right} in {scope}")]
    PermissionDenied { right: Right, scope: String },
    /// Structurally disallowed, e.g. deleting a built-in role or the global group.
    #[error("forbidden: {0}")]
    Forbidden(String),
    /// Malformed input caught at the boundary.
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Store(StoreError),
}

pub type AccessResult<T> = Result<T, AccessError>;

impl AccessError {
    pub fn denied(right: Right, scope: impl Into<String>) -> Self {
        AccessError::PermissionDenied {
            right,
            scope: scope.into(),
        }
    }

    /// Denial raised when a role would grant rights its grantor does not hold.
    /// Names the offending role so batch callers can report precisely.
    pub fn escalation(role: &str, right: Right, group: &str) -> Self {
        AccessError::PermissionDenied {
            right,
            scope: format!("role '{role}' grants it beyond the requester's rights in group '{group}'"),
        }
    }
}

impl From<StoreError> for AccessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(what) => AccessError::NotFound(what),
            StoreError::Conflict(what) => AccessError::Conflict(what),
            other => AccessError::Store(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denial_names_right_and_scope() {
        let err = AccessError::denied(Right::GroupUpdate, "group 'g1' or global");
        let rendered = err.to_string();
        assert!(rendered.contains("group.update"));
        assert!(rendered.contains("g1"));
    }

    #[test]
    fn escalation_names_offending_role() {
        let err = AccessError::escalation("senior_researcher", Right::BenchmarkCreate, "g1");
        assert!(err.to_string().contains("senior_researcher"));
    }

    #[test]
    fn store_errors_map_to_taxonomy() {
        let err: AccessError = StoreError::NotFound("group 'g1'".into()).into();
        assert!(matches!(err, AccessError::NotFound(_)));
        let err: AccessError = StoreError::Conflict("role 'r'".into()).into();
        assert!(matches!(err, AccessError::Conflict(_)));
    }
}
