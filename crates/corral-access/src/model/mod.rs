//! Record shapes shared by the store and the engine.
use crate::error::{AccessError, AccessResult};

pub mod group;
pub mod resource;
pub mod role;
pub mod user;

pub use group::{Group, Membership, GLOBAL_GROUP};
pub use resource::ResourceRecord;
pub use role::{
    builtin_roles, Role, ROLE_ADMIN, ROLE_CONTENT_ADMIN, ROLE_CONTRIBUTOR, ROLE_GLOBAL_MEMBER,
    ROLE_GROUP_ADMIN, ROLE_GUEST, ROLE_MEMBER, ROLE_USER_ADMIN,
};
pub use user::{MembershipView, User, UserView};

/// Validate an identifier (role, group, or user name) at construction time.
///
/// Names are non-empty and restricted to alphanumerics plus `-` and `_`, so a
/// typo fails here rather than as a silent deny at check time.
pub fn validate_name(what: &str, name: &str) -> AccessResult<()> {
    if name.is_empty() {
        return Err(AccessError::Validation(format!(
            "{what} name must not be empty"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(AccessError::Validation(format!(
            "invalid {what} name: {name}"
        )));
    }
    Ok(())
}
