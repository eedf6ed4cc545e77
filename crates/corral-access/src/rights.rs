//! The closed catalog of atomic rights.
//!
//! # Purpose
//! Defines the strongly typed permission values the rest of the engine
//! resolves and enforces. A right is `kind.action` over one of six resource
//! kinds: artifact, benchmark, episode, user, group, role.
//!
//! # Key invariants
//! - The catalog is closed: rights are never created or deleted at runtime.
//! - Canonical strings are `kind.action` and round-trip through
//!   [`Right::parse`] / [`Right::as_str`].
//!
//! # Common pitfalls
//! - Passing unvalidated strings deep into the engine; parse at the boundary
//!   so typos fail as [`AccessError::Validation`], not as silent denies.
use crate::error::{AccessError, AccessResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Content resource kinds whose records carry a creator and published scopes.
///
/// Users, groups, and roles also have rights in the catalog but are managed by
/// dedicated operations rather than the generic content path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Artifact,
    Benchmark,
    Episode,
}

impl ResourceKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Artifact => "artifact",
            ResourceKind::Benchmark => "benchmark",
            ResourceKind::Episode => "episode",
        }
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One atomic permission: an action on one resource kind.
///
/// Serializes as the canonical `kind.action` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Right {
    ArtifactCreate,
    ArtifactRead,
    ArtifactDelete,
    BenchmarkCreate,
    BenchmarkRead,
    BenchmarkDelete,
    EpisodeCreate,
    EpisodeRead,
    EpisodeDelete,
    UserCreate,
    UserRead,
    UserUpdate,
    UserDelete,
    GroupCreate,
    GroupRead,
    GroupUpdate,
    GroupDelete,
    RoleManage,
}

/// Every right in the catalog, in canonical order.
pub const ALL_RIGHTS: [Right; 18] = [
    Right::ArtifactCreate,
    Right::ArtifactRead,
    Right::ArtifactDelete,
    Right::BenchmarkCreate,
    Right::BenchmarkRead,
    Right::BenchmarkDelete,
    Right::EpisodeCreate,
    Right::EpisodeRead,
    Right::EpisodeDelete,
    Right::UserCreate,
    Right::UserRead,
    Right::UserUpdate,
    Right::UserDelete,
    Right::GroupCreate,
    Right::GroupRead,
    Right::GroupUpdate,
    Right::GroupDelete,
    Right::RoleManage,
];

impl Right {
    pub fn as_str(self) -> &'static str {
        match self {
            Right::ArtifactCreate => "artifact.create",
            Right::ArtifactRead => "artifact.read",
            Right::ArtifactDelete => "artifact.delete",
            Right::BenchmarkCreate => "benchmark.create",
            Right::BenchmarkRead => "benchmark.read",
            Right::BenchmarkDelete => "benchmark.delete",
            Right::EpisodeCreate => "episode.create",
            Right::EpisodeRead => "episode.read",
            Right::EpisodeDelete => "episode.delete",
            Right::UserCreate => "user.create",
            Right::UserRead => "user.read",
            Right::UserUpdate => "user.update",
            Right::UserDelete => "user.delete",
            Right::GroupCreate => "group.create",
            Right::GroupRead => "group.read",
            Right::GroupUpdate => "group.update",
            Right::GroupDelete => "group.delete",
            Right::RoleManage => "role.manage",
        }
    }

    /// The create right for a content kind.
    pub fn create_for(kind: ResourceKind) -> Right {
        match kind {
            ResourceKind::Artifact => Right::ArtifactCreate,
            ResourceKind::Benchmark => Right::BenchmarkCreate,
            ResourceKind::Episode => Right::EpisodeCreate,
        }
    }

    /// The read right for a content kind.
    pub fn read_for(kind: ResourceKind) -> Right {
        match kind {
            ResourceKind::Artifact => Right::ArtifactRead,
            ResourceKind::Benchmark => Right::BenchmarkRead,
            ResourceKind::Episode => Right::EpisodeRead,
        }
    }

    /// The delete right for a content kind.
    pub fn delete_for(kind: ResourceKind) -> Right {
        match kind {
            ResourceKind::Artifact => Right::ArtifactDelete,
            ResourceKind::Benchmark => Right::BenchmarkDelete,
            ResourceKind::Episode => Right::EpisodeDelete,
        }
    }

    /// Parse a canonical `kind.action` string.
    ///
    /// # Errors
    /// - [`AccessError::Validation`] if the string names no catalog right.
    pub fn parse(value: &str) -> AccessResult<Right> {
        value
            .parse()
            .map_err(|_| AccessError::Validation(format!("unknown right: {value}")))
    }
}

impl std::fmt::Display for Right {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Right {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Right {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value
            .parse()
            .map_err(|()| serde::de::Error::custom(format!("unknown right: {value}")))
    }
}

impl std::str::FromStr for Right {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ALL_RIGHTS
            .iter()
            .copied()
            .find(|right| right.as_str() == value)
            .ok_or(())
    }
}
