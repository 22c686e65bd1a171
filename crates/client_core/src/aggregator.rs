//! Expands shallow order listings into fully detailed orders.
//!
//! `GET /orders` only carries task references. Each order on the page is
//! re-fetched through `GET /orders/{id}` and each of its tasks through
//! `GET /tasks/{id}`, both levels concurrently. `try_join_all` keeps results
//! in input order regardless of completion order.

use futures::future::try_join_all;
use shared::{
    domain::{Order, OrderId, Task, TaskId},
    protocol::{OrderSummary, Page, PageData},
};
use tracing::{debug, warn};

use crate::{
    actions::order::RESOURCE,
    api::ApiClient,
    context::RequestContext,
    error::{ClientError, ClientResult},
};

/// Client-side order search: substring of the decimal order id.
pub fn order_matches(order_id: OrderId, search: &str) -> bool {
    let search = search.trim();
    search.is_empty() || order_id.0.to_string().contains(search)
}

impl ApiClient {
    /// One page of aggregated orders.
    ///
    /// The outer page fetch fails open (empty page). A failing order or task
    /// detail aborts the whole page. `total_pages` is the server's count and
    /// is not adjusted for orders dropped by `search`.
    pub async fn load_orders(
        &self,
        ctx: &RequestContext,
        search: &str,
        page: u32,
        size: u32,
    ) -> ClientResult<Page<Order>> {
        let query = [("page", page.to_string()), ("size", size.to_string())];
        let shallow: PageData<OrderSummary> = match self.get(ctx, RESOURCE, &query).await {
            Ok(shallow) => shallow,
            Err(ClientError::Unauthorized) => return Err(ClientError::Unauthorized),
            Err(err) => {
                warn!(page, error = %err, "orders: listing failed, showing empty page");
                return Ok(Page::empty());
            }
        };

        let total_pages = shallow.total_pages;
        let wanted: Vec<OrderSummary> = shallow
            .content
            .into_iter()
            .filter(|o| order_matches(o.order_id, search))
            .take(size as usize)
            .collect();
        debug!(page, orders = wanted.len(), "orders: expanding page");

        let content = try_join_all(wanted.iter().map(|o| self.expand_order(ctx, o.order_id))).await?;
        Ok(Page {
            content,
            total_pages,
        })
    }

    /// Single aggregated order for the edit modal. `None` when the server
    /// refuses the order itself.
    pub async fn order_details(
        &self,
        ctx: &RequestContext,
        id: OrderId,
    ) -> ClientResult<Option<Order>> {
        match self.expand_order(ctx, id).await {
            Ok(order) => Ok(Some(order)),
            Err(ClientError::Status { status, .. }) => {
                warn!(order_id = id.0, status = status.as_u16(), "orders: detail unavailable");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    async fn expand_order(&self, ctx: &RequestContext, id: OrderId) -> ClientResult<Order> {
        let detail: OrderSummary = self.get(ctx, &format!("{RESOURCE}/{id}"), &[]).await?;
        let tasks = try_join_all(detail.tasks.iter().map(|t| self.task_detail(ctx, &t.id))).await?;

        Ok(Order {
            order_id: detail.order_id,
            description: detail.description,
            status: detail.status,
            created_at: detail.created_at,
            tasks,
        })
    }

    async fn task_detail(&self, ctx: &RequestContext, id: &TaskId) -> ClientResult<Task> {
        self.get(ctx, &format!("tasks/{id}"), &[]).await
    }
}

#[cfg(test)]
#[path = "tests/aggregator_tests.rs"]
mod tests;
