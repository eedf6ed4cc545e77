//! Idempotent first-run setup.
//!
//! Seeds the built-in role set, the `global` group, and the configured
//! administrator identity. Every step is keyed by a presence check: existing
//! roles are never overwritten, so a second run against initialized state is
//! a no-op that yields identical state.
use crate::config::AccessConfig;
use crate::error::AccessResult;
use crate::model::{builtin_roles, Group, Membership, GLOBAL_GROUP, ROLE_ADMIN};
use crate::store::{AccessStore, StoreError};
use crate::users::UserDirectory;
use std::sync::Arc;

pub struct Bootstrapper {
    store: Arc<dyn AccessStore>,
    users: UserDirectory,
}

impl Bootstrapper {
    pub fn new(store: Arc<dyn AccessStore>, users: UserDirectory) -> Self {
        Self { store, users }
    }

    pub async fn run(&self, config: &AccessConfig) -> AccessResult<()> {
        let mut seeded_roles = 0;
        for role in builtin_roles() {
            match self.store.get_role(&role.name).await {
                Ok(_) => {}
                Err(StoreError::NotFound(_)) => {
                    self.store.insert_role(role).await?;
                    seeded_roles += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }

        match self.store.get_group(GLOBAL_GROUP).await {
            Ok(_) => {}
            Err(StoreError::NotFound(_)) => {
                self.store
                    .insert_group(Group::new(
                        GLOBAL_GROUP,
                        Some("Platform-wide scope".to_string()),
                    ))
                    .await?;
            }
            Err(err) => return Err(err.into()),
        }

        self.users.ensure(&config.admin_username).await?;

        // Merge the admin role into the administrator's global membership,
        // preserving whatever roles provisioning already granted.
        let global = self.store.get_group(GLOBAL_GROUP).await?;
        let mut roles = global
            .membership(&config.admin_username)
            .map(|m| m.roles.clone())
            .unwrap_or_default();
        if roles.insert(ROLE_ADMIN.to_string()) {
            self.store
                .apply_memberships(
                    GLOBAL_GROUP,
                    vec![Membership {
                        user: config.admin_username.clone(),
                        roles,
                    }],
                )
                .await?;
        }

        tracing::info!(
            admin = %config.admin_username,
            seeded_roles,
            "bootstrap complete"
        );
        Ok(())
    }
}
