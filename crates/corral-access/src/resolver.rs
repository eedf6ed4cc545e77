//! Effective-rights resolution.
//!
//! # Purpose
//! Computes the set of rights a user holds within a scope by unioning the
//! rights of every role named in the (user, scope) membership.
//!
//! # Key invariants
//! - Resolution is live: every call re-reads current role and membership
//!   state, so a role edit or a revoked membership is visible on the very
//!   next check. There is no cache to invalidate.
//! - A missing scope, a missing membership, or a membership naming a role
//!   that no longer exists all resolve to "grants nothing" rather than an
//!   error; only backend failures propagate.
use crate::error::AccessResult;
use crate::rights::Right;
use crate::store::{AccessStore, StoreError};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct MembershipResolver {
    store: Arc<dyn AccessStore>,
}

impl MembershipResolver {
    pub fn new(store: Arc<dyn AccessStore>) -> Self {
        Self { store }
    }

    /// Union of the rights of every role assigned to `user` in `scope`.
    pub async fn effective_rights(&self, user: &str, scope: &str) -> AccessResult<BTreeSet<Right>> {
        let group = match self.store.get_group(scope).await {
            Ok(group) => group,
            Err(StoreError::NotFound(_)) => return Ok(BTreeSet::new()),
            Err(err) => return Err(err.into()),
        };
        let Some(membership) = group.membership(user) else {
            return Ok(BTreeSet::new());
        };

        let mut rights = BTreeSet::new();
        for role_name in &membership.roles {
            match self.store.get_role(role_name).await {
                Ok(role) => rights.extend(role.rights.iter().copied()),
                // A stale role name left behind by a concurrent delete grants
                // nothing.
                Err(StoreError::NotFound(_)) => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Ok(rights)
    }

    /// Union across multiple scopes, e.g. a resource's published scopes.
    pub async fn effective_rights_any(
        &self,
        user: &str,
        scopes: &[&str],
    ) -> AccessResult<BTreeSet<Right>> {
        let mut rights = BTreeSet::new();
        for scope in scopes {
            rights.extend(self.effective_rights(user, scope).await?);
        }
        Ok(rights)
    }

    pub async fn holds(&self, user: &str, right: Right, scope: &str) -> AccessResult<bool> {
        Ok(self.effective_rights(user, scope).await?.contains(&right))
    }

    pub async fn holds_any(&self, user: &str, right: Right, scopes: &[&str]) -> AccessResult<bool> {
        for scope in scopes {
            if self.holds(user, right, scope).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, Membership, Role};
    use crate::store::memory::InMemoryStore;

    async fn seeded() -> MembershipResolver {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_role(Role::custom(
                "r1",
                "",
                [Right::ArtifactRead, Right::BenchmarkRead]
                    .into_iter()
                    .collect(),
            ))
            .await
            .expect("role");
        store
            .insert_role(Role::custom(
                "r2",
                "",
                [Right::BenchmarkRead, Right::BenchmarkCreate]
                    .into_iter()
                    .collect(),
            ))
            .await
            .expect("role");
        store
            .insert_group(Group::new("g1", None))
            .await
            .expect("group");
        store
            .apply_memberships("g1", vec![Membership::new("bob", ["r1", "r2"])])
            .await
            .expect("members");
        MembershipResolver::new(store)
    }

    #[tokio::test]
    async fn rights_union_over_assigned_roles() {
        let resolver = seeded().await;
        let rights = resolver.effective_rights("bob", "g1").await.expect("rights");
        let expected: BTreeSet<Right> = [
            Right::ArtifactRead,
            Right::BenchmarkRead,
            Right::BenchmarkCreate,
        ]
        .into_iter()
        .collect();
        assert_eq!(rights, expected);
    }

    #[tokio::test]
    async fn empty_without_membership_or_scope() {
        let resolver = seeded().await;
        assert!(resolver
            .effective_rights("carol", "g1")
            .await
            .expect("rights")
            .is_empty());
        assert!(resolver
            .effective_rights("bob", "no_such_group")
            .await
            .expect("rights")
            .is_empty());
    }

    #[tokio::test]
    async fn union_across_scopes() {
        let resolver = seeded().await;
        assert!(resolver
            .holds_any("bob", Right::BenchmarkCreate, &["other", "g1"])
            .await
            .expect("holds"));
        assert!(!resolver
            .holds_any("bob", Right::BenchmarkDelete, &["other", "g1"])
            .await
            .expect("holds"));
    }
}
