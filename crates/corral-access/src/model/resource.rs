//! Engine-visible resource records.
//!
//! Artifacts, benchmarks, and episodes keep their payloads in their own
//! domain stores; the engine only ever reads who created a record and which
//! groups it has been published to.
use crate::rights::ResourceKind;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub id: String,
    pub kind: ResourceKind,
    pub created_by: String,
    /// Groups this record is visible in. Append-only through publish; an
    /// already-present scope is a no-op, not an error.
    pub published_in: Vec<String>,
}

impl ResourceRecord {
    pub fn new(kind: ResourceKind, id: impl Into<String>, created_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
            created_by: created_by.into(),
            published_in: Vec::new(),
        }
    }

    pub fn is_published_in(&self, group: &str) -> bool {
        self.published_in.iter().any(|scope| scope == group)
    }
}
