//! In-memory implementation of the access store.
//!
//! # Purpose
//! Implements [`AccessStore`] entirely in memory using `BTreeMap`s guarded by
//! a `tokio::sync::RwLock`. It exists for:
//! - local development and tests (no external dependencies)
//! - deployments where durability is not required
//!
//! # Durability and consistency
//! - **Not durable**: all state is lost on process restart.
//! - **Single-process consistency**: one lock guards the whole state, so
//!   mutations are serialized and every cascade commits under a single write
//!   guard; partial application is impossible. Durable backends should get
//!   the same guarantee from transactions.
//! - Reads are concurrent (many readers); `BTreeMap`s give listings a stable
//!   order by key.
use super::{AccessStore, StoreError, StoreResult};
use crate::model::{Group, Membership, ResourceRecord, Role, User};
use crate::rights::ResourceKind;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct State {
    roles: BTreeMap<String, Role>,
    groups: BTreeMap<String, Group>,
    users: BTreeMap<String, User>,
    resources: BTreeMap<(ResourceKind, String), ResourceRecord>,
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccessStore for InMemoryStore {
    async fn get_role(&self, name: &str) -> StoreResult<Role> {
        self.state
            .read()
            .await
            .roles
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("role '{name}'")))
    }

    async fn list_roles(&self) -> StoreResult<Vec<Role>> {
        Ok(self.state.read().await.roles.values().cloned().collect())
    }

    async fn insert_role(&self, role: Role) -> StoreResult<Role> {
        let mut state = self.state.write().await;
        if state.roles.contains_key(&role.name) {
            return Err(StoreError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }
        state.roles.insert(role.name.clone(), role.clone());
        Ok(role)
    }

    async fn delete_role_cascade(&self, name: &str) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.roles.remove(name).is_none() {
            return Ok(false);
        }
        // Prune the role from every membership; memberships emptied by the
        // prune are dropped with it.
        for group in state.groups.values_mut() {
            for membership in group.memberships.iter_mut() {
                membership.roles.remove(name);
            }
            group.memberships.retain(|m| !m.roles.is_empty());
        }
        Ok(true)
    }

    async fn get_group(&self, name: &str) -> StoreResult<Group> {
        self.state
            .read()
            .await
            .groups
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("group '{name}'")))
    }

    async fn list_groups(&self) -> StoreResult<Vec<Group>> {
        Ok(self.state.read().await.groups.values().cloned().collect())
    }

    async fn insert_group(&self, group: Group) -> StoreResult<Group> {
        let mut state = self.state.write().await;
        if state.groups.contains_key(&group.name) {
            return Err(StoreError::Conflict(format!(
                "group '{}' already exists",
                group.name
            )));
        }
        state.groups.insert(group.name.clone(), group.clone());
        Ok(group)
    }

    async fn apply_memberships(&self, group: &str, members: Vec<Membership>) -> StoreResult<Group> {
        let mut state = self.state.write().await;
        let record = state
            .groups
            .get_mut(group)
            .ok_or_else(|| StoreError::NotFound(format!("group '{group}'")))?;
        for member in members {
            match record
                .memberships
                .iter_mut()
                .find(|m| m.user == member.user)
            {
                Some(existing) => existing.roles = member.roles,
                None => record.memberships.push(member),
            }
        }
        Ok(record.clone())
    }

    async fn remove_memberships(&self, group: &str, users: &[String]) -> StoreResult<Group> {
        let mut state = self.state.write().await;
        let record = state
            .groups
            .get_mut(group)
            .ok_or_else(|| StoreError::NotFound(format!("group '{group}'")))?;
        record.memberships.retain(|m| !users.contains(&m.user));
        Ok(record.clone())
    }

    async fn delete_group_cascade(&self, name: &str) -> StoreResult<bool> {
        // Memberships live inside the group record, so removing it drops them.
        Ok(self.state.write().await.groups.remove(name).is_some())
    }

    async fn get_user(&self, username: &str) -> StoreResult<User> {
        self.state
            .read()
            .await
            .users
            .get(username)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("user '{username}'")))
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.state.read().await.users.values().cloned().collect())
    }

    async fn insert_user(&self, user: User) -> StoreResult<User> {
        let mut state = self.state.write().await;
        if state.users.contains_key(&user.username) {
            return Err(StoreError::Conflict(format!(
                "user '{}' already exists",
                user.username
            )));
        }
        state.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user_cascade(&self, username: &str) -> StoreResult<bool> {
        let mut state = self.state.write().await;
        if state.users.remove(username).is_none() {
            return Ok(false);
        }
        // One write guard covers the whole cascade: owned resources,
        // memberships everywhere, and the personal group go together.
        state
            .resources
            .retain(|_, record| record.created_by != username);
        for group in state.groups.values_mut() {
            group.memberships.retain(|m| m.user != username);
        }
        state.groups.remove(username);
        Ok(true)
    }

    async fn memberships_for(&self, user: &str) -> StoreResult<Vec<(String, Membership)>> {
        let state = self.state.read().await;
        let mut found = Vec::new();
        for group in state.groups.values() {
            if let Some(membership) = group.membership(user) {
                found.push((group.name.clone(), membership.clone()));
            }
        }
        Ok(found)
    }

    async fn get_resource(&self, kind: ResourceKind, id: &str) -> StoreResult<ResourceRecord> {
        self.state
            .read()
            .await
            .resources
            .get(&(kind, id.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("{kind} '{id}'")))
    }

    async fn list_resources(&self, kind: ResourceKind) -> StoreResult<Vec<ResourceRecord>> {
        Ok(self
            .state
            .read()
            .await
            .resources
            .values()
            .filter(|record| record.kind == kind)
            .cloned()
            .collect())
    }

    async fn insert_resource(&self, record: ResourceRecord) -> StoreResult<ResourceRecord> {
        let mut state = self.state.write().await;
        let key = (record.kind, record.id.clone());
        if state.resources.contains_key(&key) {
            return Err(StoreError::Conflict(format!(
                "{} '{}' already exists",
                record.kind, record.id
            )));
        }
        state.resources.insert(key, record.clone());
        Ok(record)
    }

    async fn set_publication(
        &self,
        kind: ResourceKind,
        id: &str,
        group: &str,
        published: bool,
    ) -> StoreResult<ResourceRecord> {
        let mut state = self.state.write().await;
        let record = state
            .resources
            .get_mut(&(kind, id.to_string()))
            .ok_or_else(|| StoreError::NotFound(format!("{kind} '{id}'")))?;
        if published {
            if !record.is_published_in(group) {
                record.published_in.push(group.to_string());
            }
        } else {
            record.published_in.retain(|scope| scope != group);
        }
        Ok(record.clone())
    }

    async fn delete_resource(&self, kind: ResourceKind, id: &str) -> StoreResult<bool> {
        Ok(self
            .state
            .write()
            .await
            .resources
            .remove(&(kind, id.to_string()))
            .is_some())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    fn is_durable(&self) -> bool {
        false
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
