//! Applies a locally edited order task list back to the server.
//!
//! Only removals are supported: tasks missing from the edited list are
//! detached, everything else is left as is.

use std::collections::HashSet;

use futures::future::try_join_all;
use shared::domain::{OrderId, Task, TaskId};
use tracing::info;

use crate::{api::ApiClient, context::RequestContext, error::ClientResult};

/// Ids present in `original` but not in `edited`, in original order.
pub fn removed_tasks(original: &[Task], edited: &[Task]) -> Vec<TaskId> {
    let kept: HashSet<&TaskId> = edited.iter().map(|t| &t.id).collect();
    let mut seen = HashSet::new();
    original
        .iter()
        .map(|t| &t.id)
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .cloned()
        .collect()
}

impl ApiClient {
    /// Detaches every removed task concurrently and returns once all have
    /// completed. Returns the number of detach calls made.
    pub async fn save_order_edit(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
        original: &[Task],
        edited: &[Task],
    ) -> ClientResult<usize> {
        let removed = removed_tasks(original, edited);
        if removed.is_empty() {
            return Ok(0);
        }

        try_join_all(removed.iter().map(|id| self.detach_task(ctx, order_id, id))).await?;
        info!(order_id = order_id.0, removed = removed.len(), "orders: edit reconciled");
        Ok(removed.len())
    }
}

#[cfg(test)]
#[path = "tests/reconcile_tests.rs"]
mod tests;
