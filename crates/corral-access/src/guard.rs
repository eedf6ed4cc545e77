//! The authorization decision point and the list-query visibility filter.
//!
//! # Purpose
//! Centralizes the decision order so privilege checks cannot drift across
//! call sites. Every privileged operation gates through `require` or
//! `require_in_scopes` (and secondary checks consult `bypass`), so the
//! open-access escape hatch covers all of them. `filter_visible` is applied
//! to every list-style query so unauthorized records are never returned
//! rather than returned-then-denied.
//!
//! # Decision order (first match wins)
//! 1. open-access mode (explicit escape hatch, logged as a bypass)
//! 2. ownership: the creator of a resource always has full rights on it
//! 3. the right held in the `global` scope
//! 4. the right held in any of the resource's published scopes
//! 5. deny, naming the missing right and the consulted scope context
//!
//! Ownership dominating group scopes means owners keep control of their own
//! records even after every standing role has been revoked.
use crate::error::{AccessError, AccessResult};
use crate::model::{ResourceRecord, GLOBAL_GROUP};
use crate::resolver::MembershipResolver;
use crate::rights::Right;

#[derive(Clone)]
pub struct AccessGuard {
    resolver: MembershipResolver,
    open_access: bool,
}

impl AccessGuard {
    pub fn new(resolver: MembershipResolver, open_access: bool) -> Self {
        Self {
            resolver,
            open_access,
        }
    }

    pub fn resolver(&self) -> &MembershipResolver {
        &self.resolver
    }

    /// True in open-access mode. Call sites short-circuit their check on
    /// this; the skipped check is logged as a bypass.
    pub fn bypass(&self, user: &str, right: Right) -> bool {
        if self.open_access {
            tracing::warn!(user, right = %right, "open-access mode: authorization check bypassed");
        }
        self.open_access
    }

    pub fn open_access(&self) -> bool {
        self.open_access
    }

    /// Allow or deny `user` performing an operation that needs `right`,
    /// optionally against a concrete resource.
    ///
    /// # Errors
    /// - [`AccessError::PermissionDenied`] naming the right and scope context.
    pub async fn require(
        &self,
        user: &str,
        right: Right,
        resource: Option<&ResourceRecord>,
    ) -> AccessResult<()> {
        if self.bypass(user, right) {
            return Ok(());
        }

        if let Some(record) = resource {
            if record.created_by == user {
                tracing::debug!(user, right = %right, resource = %record.id, "allowed by ownership");
                return Ok(());
            }
        }

        if self.resolver.holds(user, right, GLOBAL_GROUP).await? {
            tracing::debug!(user, right = %right, "allowed by global scope");
            return Ok(());
        }

        if let Some(record) = resource {
            let scopes: Vec<&str> = record.published_in.iter().map(String::as_str).collect();
            if self.resolver.holds_any(user, right, &scopes).await? {
                tracing::debug!(user, right = %right, resource = %record.id, "allowed by published scope");
                return Ok(());
            }
            let scope = format!(
                "global or the published scopes of {} '{}'",
                record.kind, record.id
            );
            tracing::debug!(user, right = %right, %scope, "denied");
            return Err(AccessError::denied(right, scope));
        }

        tracing::debug!(user, right = %right, scope = GLOBAL_GROUP, "denied");
        Err(AccessError::denied(right, GLOBAL_GROUP))
    }

    /// Allow or deny `user` an operation that needs `right` in any of
    /// `scopes`. Denials name `context` as the consulted scope.
    pub async fn require_in_scopes(
        &self,
        user: &str,
        right: Right,
        scopes: &[&str],
        context: impl Into<String>,
    ) -> AccessResult<()> {
        if self.bypass(user, right) {
            return Ok(());
        }
        if self.resolver.holds_any(user, right, scopes).await? {
            return Ok(());
        }
        let context = context.into();
        tracing::debug!(user, right = %right, scope = %context, "denied");
        Err(AccessError::denied(right, context))
    }

    /// Keep the candidates `user` may see under `right`: own records, plus
    /// everything when the right is held globally, plus records published
    /// into a scope where the right is held. Candidate order is preserved.
    pub async fn filter_visible(
        &self,
        user: &str,
        right: Right,
        candidates: Vec<ResourceRecord>,
    ) -> AccessResult<Vec<ResourceRecord>> {
        if self.open_access {
            tracing::warn!(user, right = %right, "open-access mode: visibility filter bypassed");
            return Ok(candidates);
        }

        // One global resolution serves the whole list.
        if self
            .resolver
            .effective_rights(user, GLOBAL_GROUP)
            .await?
            .contains(&right)
        {
            return Ok(candidates);
        }

        let mut visible = Vec::new();
        for candidate in candidates {
            if candidate.created_by == user {
                visible.push(candidate);
                continue;
            }
            let scopes: Vec<&str> = candidate.published_in.iter().map(String::as_str).collect();
            if self.resolver.holds_any(user, right, &scopes).await? {
                visible.push(candidate);
            }
        }
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, Membership, Role};
    use crate::rights::ResourceKind;
    use crate::store::{memory::InMemoryStore, AccessStore};
    use std::sync::Arc;

    async fn guard(open_access: bool) -> AccessGuard {
        let store = Arc::new(InMemoryStore::new());
        store
            .insert_role(Role::custom(
                "reader",
                "",
                [Right::BenchmarkRead].into_iter().collect(),
            ))
            .await
            .expect("role");
        store
            .insert_group(Group::new(GLOBAL_GROUP, None))
            .await
            .expect("global");
        store
            .insert_group(Group::new("g1", None))
            .await
            .expect("group");
        store
            .apply_memberships("g1", vec![Membership::new("bob", ["reader"])])
            .await
            .expect("members");
        store
            .apply_memberships(GLOBAL_GROUP, vec![Membership::new("root", ["reader"])])
            .await
            .expect("members");
        AccessGuard::new(MembershipResolver::new(store), open_access)
    }

    fn record(published_in: &[&str]) -> ResourceRecord {
        let mut record = ResourceRecord::new(ResourceKind::Benchmark, "b1", "alice");
        record.published_in = published_in.iter().map(|s| s.to_string()).collect();
        record
    }

    #[tokio::test]
    async fn owner_is_always_allowed() {
        let guard = guard(false).await;
        let unpublished = record(&[]);
        for right in [
            Right::BenchmarkRead,
            Right::BenchmarkDelete,
            Right::BenchmarkCreate,
        ] {
            guard
                .require("alice", right, Some(&unpublished))
                .await
                .expect("owner allowed");
        }
    }

    #[tokio::test]
    async fn global_scope_allows_without_resource() {
        let guard = guard(false).await;
        guard
            .require("root", Right::BenchmarkRead, None)
            .await
            .expect("global right");
        let err = guard
            .require("bob", Right::BenchmarkRead, None)
            .await
            .expect_err("group-scoped right does not reach global checks");
        assert!(matches!(err, AccessError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn published_scope_allows_scoped_reader() {
        let guard = guard(false).await;
        let published = record(&["g1"]);
        guard
            .require("bob", Right::BenchmarkRead, Some(&published))
            .await
            .expect("published scope");

        let hidden = record(&[]);
        let err = guard
            .require("bob", Right::BenchmarkRead, Some(&hidden))
            .await
            .expect_err("unpublished record");
        match err {
            AccessError::PermissionDenied { right, scope } => {
                assert_eq!(right, Right::BenchmarkRead);
                assert!(scope.contains("b1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn scoped_requirement_follows_the_bypass() {
        let open = guard(true).await;
        open.require_in_scopes("nobody", Right::GroupUpdate, &["g1"], "group 'g1' or global")
            .await
            .expect("bypass");

        let guard = guard(false).await;
        guard
            .require_in_scopes("bob", Right::BenchmarkRead, &["g1"], "group 'g1' or global")
            .await
            .expect("scoped right");
        let err = guard
            .require_in_scopes("bob", Right::BenchmarkCreate, &["g1"], "group 'g1' or global")
            .await
            .expect_err("right not held");
        match err {
            AccessError::PermissionDenied { right, scope } => {
                assert_eq!(right, Right::BenchmarkCreate);
                assert!(scope.contains("g1"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn open_access_bypasses_every_check() {
        let guard = guard(true).await;
        guard
            .require("nobody", Right::RoleManage, None)
            .await
            .expect("bypass");
    }

    #[tokio::test]
    async fn filter_is_stable_and_selective() {
        let guard = guard(false).await;
        let mut own = ResourceRecord::new(ResourceKind::Benchmark, "own", "bob");
        own.published_in = vec![];
        let candidates = vec![record(&["g1"]), record(&[]), own];

        let visible = guard
            .filter_visible("bob", Right::BenchmarkRead, candidates)
            .await
            .expect("filter");
        // Published-to-g1 record and bob's own record survive, in input order.
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].created_by, "alice");
        assert_eq!(visible[1].id, "own");

        let visible = guard
            .filter_visible("stranger", Right::BenchmarkRead, vec![record(&["g1"])])
            .await
            .expect("filter");
        assert!(visible.is_empty());
    }
}
