//! Persistent-store contract for access-control state.
//!
//! # Purpose
//! Abstracts the backend holding Role, Group (with memberships), User, and
//! ResourceRecord state. The engine is stateless per call; everything it
//! decides on is re-read from here.
//!
//! # Atomicity contract
//! Compound mutations are single trait methods so a backend can make them
//! atomic: membership batches are applied in one call, and every cascade
//! (`delete_role_cascade`, `delete_group_cascade`, `delete_user_cascade`)
//! must complete fully or leave state untouched. A partially applied cascade
//! is a correctness violation, not a recoverable error. Mutations on the same
//! group or on the role table must be serialized; cross-entity reads need no
//! coordination.
use crate::model::{Group, Membership, ResourceRecord, Role, User};
use crate::rights::ResourceKind;
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait AccessStore: Send + Sync {
    async fn get_role(&self, name: &str) -> StoreResult<Role>;
    async fn list_roles(&self) -> StoreResult<Vec<Role>>;
    async fn insert_role(&self, role: Role) -> StoreResult<Role>;
    /// Remove the role and prune its name from every membership; memberships
    /// left without roles are removed. Returns false if the role was absent.
    async fn delete_role_cascade(&self, name: &str) -> StoreResult<bool>;

    async fn get_group(&self, name: &str) -> StoreResult<Group>;
    async fn list_groups(&self) -> StoreResult<Vec<Group>>;
    async fn insert_group(&self, group: Group) -> StoreResult<Group>;
    /// Upsert the given memberships into the group in one step. An existing
    /// (user, group) membership has its role set replaced.
    async fn apply_memberships(&self, group: &str, members: Vec<Membership>) -> StoreResult<Group>;
    /// Remove the named users' memberships outright; unknown users are a no-op.
    async fn remove_memberships(&self, group: &str, users: &[String]) -> StoreResult<Group>;
    /// Remove the group and all its memberships. Returns false if absent.
    async fn delete_group_cascade(&self, name: &str) -> StoreResult<bool>;

    async fn get_user(&self, username: &str) -> StoreResult<User>;
    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn insert_user(&self, user: User) -> StoreResult<User>;
    /// Remove the user record, every membership naming the user, the user's
    /// personal group, and every resource the user created, all-or-nothing.
    /// Returns false if the user was absent.
    async fn delete_user_cascade(&self, username: &str) -> StoreResult<bool>;

    /// Every (group name, membership) pair naming the user.
    async fn memberships_for(&self, user: &str) -> StoreResult<Vec<(String, Membership)>>;

    async fn get_resource(&self, kind: ResourceKind, id: &str) -> StoreResult<ResourceRecord>;
    async fn list_resources(&self, kind: ResourceKind) -> StoreResult<Vec<ResourceRecord>>;
    async fn insert_resource(&self, record: ResourceRecord) -> StoreResult<ResourceRecord>;
    /// Add or remove one group from a record's published scopes. Adding a
    /// present scope or removing an absent one is a no-op.
    async fn set_publication(
        &self,
        kind: ResourceKind,
        id: &str,
        group: &str,
        published: bool,
    ) -> StoreResult<ResourceRecord>;
    /// Returns false if the record was absent.
    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> StoreResult<bool>;

    async fn health_check(&self) -> StoreResult<()>;
    fn is_durable(&self) -> bool;
    fn backend_name(&self) -> &'static str;
}
