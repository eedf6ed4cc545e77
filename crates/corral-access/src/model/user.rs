//! User records.
//!
//! The engine stores no credential material; authentication lives with the
//! identity provider, which hands every call a verified username.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// One group assignment as seen from the user side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipView {
    pub group: String,
    pub roles: BTreeSet<String>,
}

/// A user together with every membership naming it, as returned by listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    pub username: String,
    pub memberships: Vec<MembershipView>,
}
