//! Group and membership records.
//!
//! A group is a named scope: rights resolution and publication both key on
//! group names. Two groups always exist once bootstrap has run: `global`, and
//! one personal group per user named after the username.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Name of the platform-wide scope.
pub const GLOBAL_GROUP: &str = "global";

/// Assignment of roles to one user within one group.
///
/// There is at most one membership per (user, group) pair; re-adding a member
/// replaces the role set rather than creating a second record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub user: String,
    pub roles: BTreeSet<String>,
}

impl Membership {
    pub fn new(user: impl Into<String>, roles: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            user: user.into(),
            roles: roles.into_iter().map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub description: Option<String>,
    /// Memberships in insertion order; the creator's entry comes first.
    pub memberships: Vec<Membership>,
}

impl Group {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
            memberships: Vec::new(),
        }
    }

    pub fn membership(&self, user: &str) -> Option<&Membership> {
        self.memberships.iter().find(|m| m.user == user)
    }

    /// Usernames of all members, in membership order.
    pub fn members(&self) -> Vec<&str> {
        self.memberships.iter().map(|m| m.user.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_lookup_by_user() {
        let mut group = Group::new("g1", None);
        group
            .memberships
            .push(Membership::new("alice", ["group_admin", "contributor"]));
        group.memberships.push(Membership::new("bob", ["member"]));

        assert_eq!(group.members(), vec!["alice", "bob"]);
        assert!(group.membership("alice").is_some());
        assert!(group.membership("carol").is_none());
        assert!(group
            .membership("bob")
            .expect("bob")
            .roles
            .contains("member"));
    }
}
