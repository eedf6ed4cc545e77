//! User directory: provisioning, explicit account management, and the
//! user-deletion cascade.
//!
//! # Provisioning
//! `ensure` is the idempotent first-sight routine: user record, personal
//! group (named after the username) with {user_admin, contributor}, and a
//! global membership with {global_member, contributor}. Each step is keyed by
//! a presence check, so a re-run (or a run against a half-provisioned user)
//! completes the missing pieces and changes nothing else.
use crate::error::{AccessError, AccessResult};
use crate::guard::AccessGuard;
use crate::model::{
    validate_name, Group, Membership, MembershipView, User, UserView, GLOBAL_GROUP,
    ROLE_CONTRIBUTOR, ROLE_GLOBAL_MEMBER, ROLE_USER_ADMIN,
};
use crate::rights::Right;
use crate::store::{AccessStore, StoreError};
use std::sync::Arc;

#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn AccessStore>,
    guard: AccessGuard,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn AccessStore>, guard: AccessGuard) -> Self {
        Self { store, guard }
    }

    /// Idempotent first-sight provisioning. Not gated: the caller decides
    /// when an identity counts as observed (explicit creation, bootstrap).
    pub async fn ensure(&self, username: &str) -> AccessResult<()> {
        validate_name("user", username)?;

        // Only genuine absence triggers a step; backend failures propagate.
        match self.store.get_user(username).await {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                self.store.insert_user(User::new(username)).await?;
                tracing::info!(user = username, "user provisioned");
            }
            Err(err) => return Err(err.into()),
        }

        match self.store.get_group(username).await {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                let mut personal = Group::new(username, None);
                personal
                    .memberships
                    .push(Membership::new(username, [ROLE_USER_ADMIN, ROLE_CONTRIBUTOR]));
                self.store.insert_group(personal).await?;
            }
            Err(err) => return Err(err.into()),
        }

        let global = self.store.get_group(GLOBAL_GROUP).await?;
        if global.membership(username).is_none() {
            self.store
                .apply_memberships(
                    GLOBAL_GROUP,
                    vec![Membership::new(username, [ROLE_GLOBAL_MEMBER, ROLE_CONTRIBUTOR])],
                )
                .await?;
        }
        Ok(())
    }

    /// Explicitly create a user account.
    ///
    /// # Errors
    /// - `Conflict` if the username, or a group squatting on it, exists.
    pub async fn create(&self, username: &str, requester: &str) -> AccessResult<User> {
        self.guard.require(requester, Right::UserCreate, None).await?;
        validate_name("user", username)?;

        if self.store.get_user(username).await.is_ok() {
            return Err(AccessError::Conflict(format!(
                "user '{username}' already exists"
            )));
        }
        // The personal group must be creatable, so the name cannot collide
        // with an existing group either.
        if self.store.get_group(username).await.is_ok() {
            return Err(AccessError::Conflict(format!(
                "a group named '{username}' already exists"
            )));
        }

        self.ensure(username).await?;
        Ok(self.store.get_user(username).await?)
    }

    /// Every user with their memberships across all groups.
    pub async fn list(&self, requester: &str) -> AccessResult<Vec<UserView>> {
        self.guard.require(requester, Right::UserRead, None).await?;

        let mut views = Vec::new();
        for user in self.store.list_users().await? {
            let memberships = self
                .store
                .memberships_for(&user.username)
                .await?
                .into_iter()
                .map(|(group, membership)| MembershipView {
                    group,
                    roles: membership.roles,
                })
                .collect();
            views.push(UserView {
                username: user.username,
                memberships,
            });
        }
        Ok(views)
    }

    /// Delete a user and cascade: owned resources, memberships everywhere,
    /// and the personal group. Absent users are a no-op.
    ///
    /// A user record is owned by the user it names, so self-deletion is
    /// always allowed; deleting anyone else takes user.delete in global.
    pub async fn delete(&self, username: &str, requester: &str) -> AccessResult<()> {
        if requester != username {
            self.guard.require(requester, Right::UserDelete, None).await?;
        }

        match self.store.delete_user_cascade(username).await {
            Ok(true) => {
                tracing::info!(user = username, requester, "user deleted with owned state");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(StoreError::NotFound(_)) => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
