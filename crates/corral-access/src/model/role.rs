//! Role records and the built-in role table.
//!
//! Built-in roles are seeded once at bootstrap and are never mutated or
//! deleted. Custom roles carry `builtin = false` and are managed through the
//! role registry.
use crate::rights::{Right, ALL_RIGHTS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CONTENT_ADMIN: &str = "content_admin";
pub const ROLE_USER_ADMIN: &str = "user_admin";
pub const ROLE_GROUP_ADMIN: &str = "group_admin";
pub const ROLE_CONTRIBUTOR: &str = "contributor";
pub const ROLE_MEMBER: &str = "member";
pub const ROLE_GLOBAL_MEMBER: &str = "global_member";
pub const ROLE_GUEST: &str = "guest";

/// A named bundle of rights.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    pub description: String,
    pub rights: BTreeSet<Right>,
    pub builtin: bool,
}

impl Role {
    pub fn custom(
        name: impl Into<String>,
        description: impl Into<String>,
        rights: BTreeSet<Right>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            rights,
            builtin: false,
        }
    }

    fn builtin(name: &str, description: &str, rights: impl IntoIterator<Item = Right>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            rights: rights.into_iter().collect(),
            builtin: true,
        }
    }
}

const CONTENT_READ: [Right; 3] = [Right::ArtifactRead, Right::BenchmarkRead, Right::EpisodeRead];

const CONTENT_ALL: [Right; 9] = [
    Right::ArtifactCreate,
    Right::ArtifactRead,
    Right::ArtifactDelete,
    Right::BenchmarkCreate,
    Right::BenchmarkRead,
    Right::BenchmarkDelete,
    Right::EpisodeCreate,
    Right::EpisodeRead,
    Right::EpisodeDelete,
];

/// The fixed set of built-in roles seeded at bootstrap.
pub fn builtin_roles() -> Vec<Role> {
    vec![
        Role::builtin("admin", "Full platform administration", ALL_RIGHTS),
        Role::builtin(
            "content_admin",
            "Manage all artifacts, benchmarks, and episodes",
            CONTENT_ALL,
        ),
        Role::builtin(
            "user_admin",
            "Manage user accounts",
            [
                Right::UserCreate,
                Right::UserRead,
                Right::UserUpdate,
                Right::UserDelete,
            ],
        ),
        Role::builtin(
            "group_admin",
            "Manage a group and its memberships",
            [Right::GroupRead, Right::GroupUpdate, Right::GroupDelete],
        ),
        Role::builtin(
            "contributor",
            "Create and read content",
            [
                Right::ArtifactCreate,
                Right::ArtifactRead,
                Right::BenchmarkCreate,
                Right::BenchmarkRead,
                Right::EpisodeCreate,
                Right::EpisodeRead,
            ],
        ),
        Role::builtin("member", "Read content shared with the group", CONTENT_READ),
        Role::builtin(
            "global_member",
            "Baseline rights every signed-in user holds platform-wide",
            CONTENT_READ
                .into_iter()
                .chain([Right::UserRead, Right::GroupCreate]),
        ),
        Role::builtin("guest", "Read publicly shared content", CONTENT_READ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(name: &str) -> Role {
        builtin_roles()
            .into_iter()
            .find(|role| role.name == name)
            .expect("builtin role")
    }

    #[test]
    fn admin_holds_every_right() {
        let admin = find(ROLE_ADMIN);
        assert_eq!(admin.rights.len(), ALL_RIGHTS.len());
        assert!(admin.builtin);
    }

    #[test]
    fn member_is_read_only() {
        let member = find(ROLE_MEMBER);
        assert!(member.rights.contains(&Right::BenchmarkRead));
        assert!(!member.rights.contains(&Right::BenchmarkCreate));
        assert!(!member.rights.contains(&Right::BenchmarkDelete));
    }

    #[test]
    fn global_member_can_reference_users_and_open_groups() {
        let global_member = find(ROLE_GLOBAL_MEMBER);
        assert!(global_member.rights.contains(&Right::UserRead));
        assert!(global_member.rights.contains(&Right::GroupCreate));
        assert!(!global_member.rights.contains(&Right::GroupUpdate));
    }

    #[test]
    fn builtin_names_are_unique() {
        let roles = builtin_roles();
        let names: BTreeSet<_> = roles.iter().map(|role| role.name.clone()).collect();
        assert_eq!(names.len(), roles.len());
        assert_eq!(roles.len(), 8);
    }
}
