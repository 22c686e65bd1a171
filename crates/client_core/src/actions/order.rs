use shared::{
    domain::{OrderId, Task, TaskId},
    protocol::CreateOrderRequest,
};
use tracing::info;

use super::{fire_and_forget, load_options, mutation_outcome};
use crate::{
    api::ApiClient,
    context::RequestContext,
    error::{ActionResult, ClientResult},
    messages::ORDER_CREATE,
};

pub(crate) const RESOURCE: &str = "orders";

impl ApiClient {
    /// Every task the create-order form can pick from.
    pub async fn all_tasks(&self, ctx: &RequestContext) -> ActionResult<Vec<Task>> {
        load_options(self, ctx, "tasks").await
    }

    pub async fn create_order(
        &self,
        ctx: &RequestContext,
        description: &str,
        task_ids: &[TaskId],
    ) -> ActionResult<()> {
        let body = CreateOrderRequest {
            description: description.to_string(),
            task_ids: task_ids.to_vec(),
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[], &ORDER_CREATE)?;
        info!(tasks = task_ids.len(), "order: created");
        Ok(())
    }

    pub async fn delete_order(&self, ctx: &RequestContext, id: OrderId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.to_string())
    }

    /// Closes the order (`OPEN` to `CLOSE`).
    pub async fn approve_order(&self, ctx: &RequestContext, id: OrderId) -> ActionResult<()> {
        let result = self
            .patch::<()>(ctx, &format!("{RESOURCE}/{id}/close"), None)
            .await;
        fire_and_forget(result, RESOURCE, &id.to_string())?;
        info!(order_id = id.0, "order: approved");
        Ok(())
    }

    /// Removes one task from an order. Unlike deletes, failures propagate so
    /// reconciliation can tell whether every detach went through.
    pub async fn detach_task(
        &self,
        ctx: &RequestContext,
        order_id: OrderId,
        task_id: &TaskId,
    ) -> ClientResult<()> {
        let query = [
            ("orderId", order_id.to_string()),
            ("taskId", task_id.to_string()),
        ];
        self.delete(ctx, &format!("{RESOURCE}/task"), &query).await?;
        info!(order_id = order_id.0, task_id = %task_id, "order: task detached");
        Ok(())
    }
}
