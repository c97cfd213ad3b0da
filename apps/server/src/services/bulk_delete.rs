//! Batch deletion by identifier list, uniform across resource types

use uuid::Uuid;

use crate::{db::BulkDeleteStore, Error, Result};

#[derive(Debug, Clone, Copy)]
pub struct BulkDeleteOutcome {
    /// Rows the ids matched immediately before the delete ran. This is the
    /// reported figure even if the delete itself affected a different number
    /// of rows under concurrent modification.
    pub count: i64,
    pub resource_label: &'static str,
}

impl BulkDeleteOutcome {
    pub fn message(&self) -> String {
        format!("Deleted {} {}", self.count, self.resource_label)
    }
}

/// Count matching rows, delete them, and report the pre-delete count.
///
/// The count and the delete are two separate statements, not a transaction;
/// the delete's own affected-row figure is only checked against zero.
pub async fn bulk_delete(
    store: &dyn BulkDeleteStore,
    company_id: Uuid,
    ids: &[Uuid],
) -> Result<BulkDeleteOutcome> {
    if ids.is_empty() {
        return Err(Error::NothingToDelete);
    }

    let count = store.count_by_ids(company_id, ids).await?;
    let deleted = store.delete_by_ids(company_id, ids).await?;

    if deleted == 0 {
        return Err(Error::BulkDeleteFailed(store.resource_label()));
    }

    tracing::info!(
        %company_id,
        resource = store.resource_label(),
        requested = ids.len(),
        count,
        deleted,
        "bulk delete"
    );

    Ok(BulkDeleteOutcome {
        count,
        resource_label: store.resource_label(),
    })
}
