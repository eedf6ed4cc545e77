//! Content index: the engine-visible side of artifacts, benchmarks, and
//! episodes.
//!
//! Payloads live in their own domain stores; this module tracks only who
//! created a record and where it is published, and gates every operation
//! through the guard. Listing goes through the visibility filter so
//! unauthorized records are never returned.
use crate::error::{AccessError, AccessResult};
use crate::guard::AccessGuard;
use crate::model::{ResourceRecord, GLOBAL_GROUP};
use crate::rights::{ResourceKind, Right};
use crate::store::{AccessStore, StoreError};
use std::sync::Arc;

#[derive(Clone)]
pub struct ContentIndex {
    store: Arc<dyn AccessStore>,
    guard: AccessGuard,
}

impl ContentIndex {
    pub fn new(store: Arc<dyn AccessStore>, guard: AccessGuard) -> Self {
        Self { store, guard }
    }

    /// Record a newly created resource under its creator.
    pub async fn register(
        &self,
        kind: ResourceKind,
        id: &str,
        creator: &str,
    ) -> AccessResult<ResourceRecord> {
        self.guard
            .require(creator, Right::create_for(kind), None)
            .await?;
        if id.is_empty() {
            return Err(AccessError::Validation(format!("{kind} id must not be empty")));
        }
        Ok(self
            .store
            .insert_resource(ResourceRecord::new(kind, id, creator))
            .await?)
    }

    pub async fn get(
        &self,
        kind: ResourceKind,
        id: &str,
        requester: &str,
    ) -> AccessResult<ResourceRecord> {
        let record = self.store.get_resource(kind, id).await?;
        self.guard
            .require(requester, Right::read_for(kind), Some(&record))
            .await?;
        Ok(record)
    }

    /// Records of `kind` visible to the requester, in store order.
    pub async fn list(
        &self,
        kind: ResourceKind,
        requester: &str,
    ) -> AccessResult<Vec<ResourceRecord>> {
        let records = self.store.list_resources(kind).await?;
        self.guard
            .filter_visible(requester, Right::read_for(kind), records)
            .await
    }

    /// Publish and unpublish are reserved to the record's owner and to
    /// holders of the kind's read right in global (content administrators).
    /// Read access through a published scope deliberately does not qualify:
    /// being shown a record must not allow re-sharing it.
    async fn require_publisher(
        &self,
        requester: &str,
        record: &ResourceRecord,
    ) -> AccessResult<()> {
        let right = Right::read_for(record.kind);
        if self.guard.bypass(requester, right) {
            return Ok(());
        }
        if record.created_by == requester {
            return Ok(());
        }
        if self
            .guard
            .resolver()
            .holds(requester, right, GLOBAL_GROUP)
            .await?
        {
            return Ok(());
        }
        Err(AccessError::denied(
            right,
            format!("global (only the owner may share {} '{}')", record.kind, record.id),
        ))
    }

    /// Add `group` to the record's published scopes. Publishing into an
    /// already-present scope is a no-op, not an error.
    pub async fn publish(
        &self,
        kind: ResourceKind,
        id: &str,
        group: &str,
        requester: &str,
    ) -> AccessResult<ResourceRecord> {
        let record = self.store.get_resource(kind, id).await?;
        self.require_publisher(requester, &record).await?;
        // The target scope must exist.
        self.store.get_group(group).await?;

        let record = self.store.set_publication(kind, id, group, true).await?;
        tracing::info!(kind = %kind, id, group, requester, "resource published");
        Ok(record)
    }

    /// Remove `group` from the record's published scopes; absent scopes are
    /// a no-op.
    pub async fn unpublish(
        &self,
        kind: ResourceKind,
        id: &str,
        group: &str,
        requester: &str,
    ) -> AccessResult<ResourceRecord> {
        let record = self.store.get_resource(kind, id).await?;
        self.require_publisher(requester, &record).await?;

        let record = self.store.set_publication(kind, id, group, false).await?;
        tracing::info!(kind = %kind, id, group, requester, "resource unpublished");
        Ok(record)
    }

    /// Delete a record. Absent records are a no-op.
    pub async fn delete(&self, kind: ResourceKind, id: &str, requester: &str) -> AccessResult<()> {
        let record = match self.store.get_resource(kind, id).await {
            Ok(record) => record,
            Err(StoreError::NotFound(_)) => return Ok(()),
            Err(err) => return Err(err.into()),
        };
        self.guard
            .require(requester, Right::delete_for(kind), Some(&record))
            .await?;
        self.store.delete_resource(kind, id).await?;
        tracing::info!(kind = %kind, id, requester, "resource deleted");
        Ok(())
    }
}
