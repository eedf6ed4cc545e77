use anyhow::{bail, Result};

/// Engine configuration sourced from environment variables.
#[derive(Debug, Clone)]
pub struct AccessConfig {
    /// When set, `require` allows everything. An explicit escape hatch for
    /// closed deployments; every bypassed check is logged as such.
    pub open_access: bool,
    /// Identity seeded as administrator at bootstrap.
    pub admin_username: String,
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            open_access: false,
            admin_username: "admin".to_string(),
        }
    }
}

impl AccessConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("CORRAL_OPEN_ACCESS") {
            config.open_access = match value.to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => bail!("parse CORRAL_OPEN_ACCESS: unrecognized value '{other}'"),
            };
        }
        if let Ok(value) = std::env::var("CORRAL_ADMIN_USER") {
            if value.is_empty() {
                bail!("CORRAL_ADMIN_USER must not be empty");
            }
            config.admin_username = value;
        }
        Ok(config)
    }
}
