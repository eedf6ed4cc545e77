//! Role registry: create, list, and delete named right bundles.
//!
//! Built-in roles are immutable and undeletable. Custom roles are subject to
//! the escalation guard: a requester can never create a role granting rights
//! they do not themselves hold in the global scope.
use crate::error::{AccessError, AccessResult};
use crate::guard::AccessGuard;
use crate::model::{validate_name, Role, GLOBAL_GROUP};
use crate::rights::Right;
use crate::store::{AccessStore, StoreError};
use std::collections::BTreeSet;
use std::sync::Arc;

#[derive(Clone)]
pub struct RoleRegistry {
    store: Arc<dyn AccessStore>,
    guard: AccessGuard,
}

impl RoleRegistry {
    pub fn new(store: Arc<dyn AccessStore>, guard: AccessGuard) -> Self {
        Self { store, guard }
    }

    /// Look up a role by name. Not gated: resolution needs it on every check.
    pub async fn get(&self, name: &str) -> AccessResult<Role> {
        Ok(self.store.get_role(name).await?)
    }

    pub async fn list(&self, requester: &str) -> AccessResult<Vec<Role>> {
        self.guard
            .require(requester, Right::RoleManage, None)
            .await?;
        Ok(self.store.list_roles().await?)
    }

    /// Create a custom role.
    ///
    /// # Errors
    /// - `PermissionDenied` without role.manage in global, or when `rights`
    ///   exceeds the requester's own effective global rights.
    /// - `Conflict` if the name is taken, `Validation` if it is malformed.
    pub async fn create(
        &self,
        name: &str,
        description: &str,
        rights: BTreeSet<Right>,
        requester: &str,
    ) -> AccessResult<Role> {
        self.guard
            .require(requester, Right::RoleManage, None)
            .await?;
        validate_name("role", name)?;

        if !self.guard.open_access() {
            let granted = self
                .guard
                .resolver()
                .effective_rights(requester, GLOBAL_GROUP)
                .await?;
            if let Some(missing) = rights.difference(&granted).next() {
                return Err(AccessError::denied(
                    *missing,
                    format!(
                        "global (role '{name}' would grant rights the requester does not hold)"
                    ),
                ));
            }
        }

        let role = self
            .store
            .insert_role(Role::custom(name, description, rights))
            .await?;
        tracing::info!(role = name, requester, "custom role created");
        Ok(role)
    }

    /// Delete a custom role and prune it from every membership. Deleting an
    /// absent role is a no-op.
    ///
    /// # Errors
    /// - `Forbidden` for built-in roles.
    pub async fn delete(&self, name: &str, requester: &str) -> AccessResult<()> {
        self.guard
            .require(requester, Right::RoleManage, None)
            .await?;

        match self.store.get_role(name).await {
            Ok(role) if role.builtin => {
                return Err(AccessError::Forbidden(format!(
                    "built-in role '{name}' cannot be deleted"
                )))
            }
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        }

        self.store.delete_role_cascade(name).await?;
        tracing::info!(role = name, requester, "role deleted and pruned from memberships");
        Ok(())
    }
}
