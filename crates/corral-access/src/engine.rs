//! Engine composition.
//!
//! Wires a store and configuration into the resolver, guard, and the
//! per-entity directories. This is the single construction point callers
//! (transport layers, domain handlers) hold on to.
use crate::bootstrap::Bootstrapper;
use crate::config::AccessConfig;
use crate::content::ContentIndex;
use crate::error::AccessResult;
use crate::groups::GroupDirectory;
use crate::guard::AccessGuard;
use crate::registry::RoleRegistry;
use crate::resolver::MembershipResolver;
use crate::store::AccessStore;
use crate::users::UserDirectory;
use std::sync::Arc;

#[derive(Clone)]
pub struct AccessEngine {
    store: Arc<dyn AccessStore>,
    config: AccessConfig,
    resolver: MembershipResolver,
    guard: AccessGuard,
    roles: RoleRegistry,
    groups: GroupDirectory,
    users: UserDirectory,
    content: ContentIndex,
}

impl AccessEngine {
    pub fn new(store: Arc<dyn AccessStore>, config: AccessConfig) -> Self {
        let resolver = MembershipResolver::new(store.clone());
        let guard = AccessGuard::new(resolver.clone(), config.open_access);
        let roles = RoleRegistry::new(store.clone(), guard.clone());
        let groups = GroupDirectory::new(store.clone(), guard.clone());
        let users = UserDirectory::new(store.clone(), guard.clone());
        let content = ContentIndex::new(store.clone(), guard.clone());

        tracing::info!(
            backend = store.backend_name(),
            durable = store.is_durable(),
            open_access = config.open_access,
            "access engine attached to store"
        );

        Self {
            store,
            config,
            resolver,
            guard,
            roles,
            groups,
            users,
            content,
        }
    }

    /// Run first-run setup; safe to call on every startup.
    pub async fn bootstrap(&self) -> AccessResult<()> {
        Bootstrapper::new(self.store.clone(), self.users.clone())
            .run(&self.config)
            .await
    }

    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }

    pub fn resolver(&self) -> &MembershipResolver {
        &self.resolver
    }

    pub fn roles(&self) -> &RoleRegistry {
        &self.roles
    }

    pub fn groups(&self) -> &GroupDirectory {
        &self.groups
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn content(&self) -> &ContentIndex {
        &self.content
    }

    pub fn config(&self) -> &AccessConfig {
        &self.config
    }

    pub async fn health_check(&self) -> AccessResult<()> {
        Ok(self.store.health_check().await?)
    }
}
