//! Order screen: aggregated listing, creation from a multi-select of tasks,
//! approval, deletion and task removal through edit reconciliation.

use client_core::{
    messages::GENERIC_ERROR, ActionError, ActionResult, ApiClient, ClientError, ClientResult,
    RequestContext,
};
use shared::{
    domain::{Order, OrderId, Task, TaskId},
    protocol::{OptionItem, Page},
};
use tracing::warn;

use super::{
    page::{Editor, Modal, PageState},
    selection::Selection,
    Route,
};

pub const PAGE_SIZE: u32 = 10;

pub const TASKS_REQUIRED: &str = "Selecione ao menos um serviço.";

#[derive(Debug, Clone, Default)]
pub struct OrderDraft {
    pub description: String,
    pub tasks: Selection<TaskId>,
}

/// Working copy of an order's tasks while the edit modal is open.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderEdit {
    pub order: Order,
    pub edited: Vec<Task>,
}

impl OrderEdit {
    pub fn remove_task(&mut self, id: &TaskId) {
        self.edited.retain(|t| &t.id != id);
    }
}

pub struct OrderController {
    api: ApiClient,
    ctx: RequestContext,
    pub state: PageState<Order>,
    pub search: String,
    pub editor: Editor<OrderId, OrderDraft>,
    pub editing: Option<OrderEdit>,
}

listing_controller!(OrderController, Route::Order);

/// Aggregation failures other than 401 empty the page behind a generic error.
fn listing_outcome(result: ClientResult<Page<Order>>) -> (ActionResult<Page<Order>>, bool) {
    match result {
        Ok(page) => (Ok(page), false),
        Err(ClientError::Unauthorized) => (Err(ActionError::Unauthorized), false),
        Err(err) => {
            warn!(error = %err, "orders: aggregation aborted");
            (Ok(Page::empty()), true)
        }
    }
}

fn client_failure(err: ClientError) -> ActionError {
    match err {
        ClientError::Unauthorized => ActionError::Unauthorized,
        _ => ActionError::Rejected(GENERIC_ERROR.to_string()),
    }
}

impl OrderController {
    pub fn new(api: ApiClient, ctx: RequestContext) -> Self {
        Self {
            api,
            ctx,
            state: PageState::new(PAGE_SIZE),
            search: String::new(),
            editor: Editor::default(),
            editing: None,
        }
    }

    pub async fn load(&mut self) {
        let result = self
            .api
            .load_orders(&self.ctx, &self.search, self.state.page, self.state.size)
            .await;
        let (result, aborted) = listing_outcome(result);
        if self.state.commit(result) && aborted {
            self.state.reject(GENERIC_ERROR);
        }
    }

    pub async fn set_search(&mut self, text: &str) {
        self.search = text.to_string();
        self.state.page = 0;
        self.load().await;
    }

    pub async fn next_page(&mut self) {
        if self.state.goto_next() {
            self.load().await;
        }
    }

    pub async fn prev_page(&mut self) {
        if self.state.goto_prev() {
            self.load().await;
        }
    }

    pub async fn open_create(&mut self) {
        self.state.clear_error();
        self.editor.create();
        match self.api.all_tasks(&self.ctx).await {
            Ok(tasks) if self.state.is_live() => {
                let options = tasks
                    .into_iter()
                    .map(|t| OptionItem {
                        id: t.id,
                        label: t.name,
                        price: Some(t.price),
                    })
                    .collect();
                self.editor.draft.tasks.set_options(options);
            }
            Ok(_) => {}
            Err(err) => self.state.fail(err),
        }
    }

    pub fn toggle_task(&mut self, id: &TaskId) {
        self.editor.draft.tasks.toggle(id);
    }

    pub async fn submit_create(&mut self) -> bool {
        if !matches!(self.editor.modal, Modal::Create) {
            return false;
        }
        let selected = self.editor.draft.tasks.selected();
        if selected.is_empty() {
            self.state.reject(TASKS_REQUIRED);
            return false;
        }
        let result = self
            .api
            .create_order(&self.ctx, self.editor.draft.description.trim(), selected)
            .await;
        self.finish(result).await
    }

    pub fn open_approve(&mut self, id: OrderId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Approve(id));
    }

    pub fn open_delete(&mut self, id: OrderId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    /// Runs the open approve or delete confirmation.
    pub async fn confirm(&mut self) -> bool {
        let result = match self.editor.modal {
            Modal::Approve(id) => self.api.approve_order(&self.ctx, id).await,
            Modal::Delete(id) => self.api.delete_order(&self.ctx, id).await,
            _ => return false,
        };
        self.finish(result).await
    }

    /// Loads the full order into an editable working copy.
    pub async fn open_edit(&mut self, id: OrderId) -> bool {
        self.state.clear_error();
        match self.api.order_details(&self.ctx, id).await {
            Ok(Some(order)) => {
                if !self.state.is_live() {
                    return false;
                }
                self.editing = Some(OrderEdit {
                    edited: order.tasks.clone(),
                    order,
                });
                self.editor.confirm(Modal::Edit(id));
                true
            }
            Ok(None) => {
                self.state.reject(GENERIC_ERROR);
                false
            }
            Err(err) => {
                self.state.fail(client_failure(err));
                false
            }
        }
    }

    pub fn remove_task(&mut self, id: &TaskId) {
        if let Some(edit) = self.editing.as_mut() {
            edit.remove_task(id);
        }
    }

    /// Detaches every task removed from the working copy.
    pub async fn save_edit(&mut self) -> bool {
        let Some(edit) = &self.editing else {
            return false;
        };
        let result = self
            .api
            .save_order_edit(&self.ctx, edit.order.order_id, &edit.order.tasks, &edit.edited)
            .await
            .map(|_| ())
            .map_err(client_failure);
        self.finish(result).await
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
        self.editing = None;
    }

    async fn finish(&mut self, result: ActionResult<()>) -> bool {
        if !self.state.mutated(result) {
            return false;
        }
        self.editor.close();
        self.editing = None;
        self.load().await;
        true
    }
}

#[cfg(test)]
#[path = "../tests/order_tests.rs"]
mod tests;
