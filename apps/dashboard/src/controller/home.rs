use chrono::NaiveDate;
use client_core::{ActionError, ApiClient, ClientError, RequestContext};
use shared::{
    domain::{Order, OrderId},
    protocol::Page,
};
use tracing::warn;

use super::{page::PageState, Route};

pub const PAGE_SIZE: u32 = 10;

/// Summary card of one order on the home screen.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderCard {
    pub order_id: OrderId,
    pub machine: String,
    pub customer: String,
    /// Calendar day of the creation timestamp, in UTC.
    pub entry_date: NaiveDate,
    pub status: &'static str,
    pub services: Vec<String>,
    pub pieces: Vec<String>,
}

impl From<&Order> for OrderCard {
    fn from(order: &Order) -> Self {
        let first = order.first_task();
        Self {
            order_id: order.order_id,
            machine: first.map(|t| t.machine.model.clone()).unwrap_or_default(),
            customer: first
                .and_then(|t| t.customer_name())
                .map(str::to_string)
                .unwrap_or_default(),
            entry_date: order.created_at.date_naive(),
            status: order.status.label(),
            services: order.task_names().into_iter().map(str::to_string).collect(),
            pieces: order.piece_names().into_iter().map(str::to_string).collect(),
        }
    }
}

pub struct HomeController {
    api: ApiClient,
    ctx: RequestContext,
    pub state: PageState<Order>,
}

listing_controller!(HomeController, Route::Home);

impl HomeController {
    pub fn new(api: ApiClient, ctx: RequestContext) -> Self {
        Self {
            api,
            ctx,
            state: PageState::new(PAGE_SIZE),
        }
    }

    /// First page of orders only; the home screen has no pagination.
    pub async fn load(&mut self) {
        let result = match self.api.load_orders(&self.ctx, "", 0, self.state.size).await {
            Ok(page) => Ok(page),
            Err(ClientError::Unauthorized) => Err(ActionError::Unauthorized),
            Err(err) => {
                warn!(error = %err, "home: orders unavailable");
                Ok(Page::empty())
            }
        };
        self.state.commit(result);
    }

    pub fn cards(&self) -> Vec<OrderCard> {
        self.state.content.iter().map(OrderCard::from).collect()
    }
}

#[cfg(test)]
#[path = "../tests/home_tests.rs"]
mod tests;
