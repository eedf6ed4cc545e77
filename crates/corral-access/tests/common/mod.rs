use corral_access::{AccessConfig, AccessEngine, InMemoryStore};
use std::sync::Arc;

pub const ADMIN: &str = "admin";

/// Fresh engine over an in-memory store, bootstrapped with defaults.
pub async fn engine() -> AccessEngine {
    let engine = AccessEngine::new(Arc::new(InMemoryStore::new()), AccessConfig::default());
    engine.bootstrap().await.expect("bootstrap");
    engine
}

/// Provision a standard user through the admin identity.
pub async fn signup(engine: &AccessEngine, username: &str) {
    engine
        .users()
        .create(username, ADMIN)
        .await
        .expect("create user");
}
