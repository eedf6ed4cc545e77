//! Group directory: group lifecycle and membership batches.
//!
//! # Purpose
//! Owns every group-scoped mutation. Membership batches are validated fully
//! before a single atomic store write, so a bad entry fails the whole batch
//! and leaves state untouched.
//!
//! # Key invariants
//! - The creator of a group receives {group_admin, contributor} in it.
//! - Managing members requires group.update in the group or in global, plus
//!   user.read in global to reference arbitrary users.
//! - No role may be granted whose rights exceed the requester's own effective
//!   rights over {group, global}; the offending role is named in the denial.
//! - `global` and personal groups refuse deletion; personal groups go away
//!   only with their user.
use crate::error::{AccessError, AccessResult};
use crate::guard::AccessGuard;
use crate::model::{
    validate_name, Group, Membership, GLOBAL_GROUP, ROLE_CONTRIBUTOR, ROLE_GROUP_ADMIN,
};
use crate::rights::Right;
use crate::store::{AccessStore, StoreError};
use std::sync::Arc;

#[derive(Clone)]
pub struct GroupDirectory {
    store: Arc<dyn AccessStore>,
    guard: AccessGuard,
}

impl GroupDirectory {
    pub fn new(store: Arc<dyn AccessStore>, guard: AccessGuard) -> Self {
        Self { store, guard }
    }

    /// Requester must hold `right` either in the group itself or in global.
    async fn require_in_group_or_global(
        &self,
        requester: &str,
        right: Right,
        group: &str,
    ) -> AccessResult<()> {
        self.guard
            .require_in_scopes(
                requester,
                right,
                &[group, GLOBAL_GROUP],
                format!("group '{group}' or global"),
            )
            .await
    }

    pub async fn create(
        &self,
        name: &str,
        description: Option<String>,
        creator: &str,
    ) -> AccessResult<Group> {
        self.guard.require(creator, Right::GroupCreate, None).await?;
        validate_name("group", name)?;

        let mut group = Group::new(name, description);
        group
            .memberships
            .push(Membership::new(creator, [ROLE_GROUP_ADMIN, ROLE_CONTRIBUTOR]));
        let group = self.store.insert_group(group).await?;
        tracing::info!(group = name, creator, "group created");
        Ok(group)
    }

    /// Read a group. Authorization is checked before existence so a denied
    /// caller cannot probe for group names.
    pub async fn read(&self, name: &str, requester: &str) -> AccessResult<Group> {
        self.require_in_group_or_global(requester, Right::GroupRead, name)
            .await?;
        Ok(self.store.get_group(name).await?)
    }

    /// Groups visible to the requester: those they are a member of, or every
    /// group when they hold group.read globally. Ordered by name.
    pub async fn list(&self, requester: &str) -> AccessResult<Vec<Group>> {
        let groups = self.store.list_groups().await?;
        if self
            .guard
            .resolver()
            .holds(requester, Right::GroupRead, GLOBAL_GROUP)
            .await?
        {
            return Ok(groups);
        }
        Ok(groups
            .into_iter()
            .filter(|group| group.membership(requester).is_some())
            .collect())
    }

    /// Add or update members in one all-or-nothing batch.
    ///
    /// Members with an empty role set are skipped; an existing membership has
    /// its role set replaced.
    ///
    /// # Errors
    /// - `NotFound` for a missing group, user, or role.
    /// - `PermissionDenied` naming the offending role when it grants rights
    ///   beyond the requester's own over {group, global}.
    pub async fn add_members(
        &self,
        group_name: &str,
        members: Vec<Membership>,
        requester: &str,
    ) -> AccessResult<Group> {
        self.require_in_group_or_global(requester, Right::GroupUpdate, group_name)
            .await?;
        self.guard.require(requester, Right::UserRead, None).await?;

        // Group must exist before any per-member validation.
        let group = self.store.get_group(group_name).await?;

        let granted = if self.guard.open_access() {
            None
        } else {
            Some(
                self.guard
                    .resolver()
                    .effective_rights_any(requester, &[group_name, GLOBAL_GROUP])
                    .await?,
            )
        };

        let mut batch = Vec::new();
        for member in members {
            if member.roles.is_empty() {
                continue;
            }
            self.store.get_user(&member.user).await.map_err(|err| match err {
                StoreError::NotFound(_) => {
                    AccessError::NotFound(format!("user '{}'", member.user))
                }
                other => other.into(),
            })?;
            for role_name in &member.roles {
                let role = self.store.get_role(role_name).await?;
                if let Some(granted) = &granted {
                    if let Some(missing) = role.rights.difference(granted).next() {
                        return Err(AccessError::escalation(role_name, *missing, group_name));
                    }
                }
            }
            batch.push(member);
        }

        if batch.is_empty() {
            return Ok(group);
        }
        let group = self.store.apply_memberships(group_name, batch).await?;
        tracing::info!(group = group_name, requester, members = group.memberships.len(), "memberships updated");
        Ok(group)
    }

    /// Remove the named users' memberships outright. Users without a
    /// membership are a no-op.
    pub async fn remove_members(
        &self,
        group_name: &str,
        users: Vec<String>,
        requester: &str,
    ) -> AccessResult<Group> {
        self.require_in_group_or_global(requester, Right::GroupUpdate, group_name)
            .await?;
        self.guard.require(requester, Right::UserRead, None).await?;

        let group = self.store.remove_memberships(group_name, &users).await?;
        tracing::info!(group = group_name, requester, removed = users.len(), "memberships removed");
        Ok(group)
    }

    /// Delete a group and cascade its memberships. Absent groups are a no-op.
    ///
    /// # Errors
    /// - `Forbidden` for `global` and for personal groups.
    pub async fn delete(&self, name: &str, requester: &str) -> AccessResult<()> {
        self.require_in_group_or_global(requester, Right::GroupDelete, name)
            .await?;

        if name == GLOBAL_GROUP {
            return Err(AccessError::Forbidden(
                "the global group cannot be deleted".to_string(),
            ));
        }
        // A backend failure here must not classify the group as deletable.
        match self.store.get_user(name).await {
            Ok(_) => {
                return Err(AccessError::Forbidden(format!(
                    "group '{name}' is a personal group and is removed only with its user"
                )))
            }
            Err(StoreError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }

        if self.store.delete_group_cascade(name).await? {
            tracing::info!(group = name, requester, "group deleted");
        }
        Ok(())
    }
}
