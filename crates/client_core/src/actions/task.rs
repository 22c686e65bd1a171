use serde::Deserialize;
use shared::{
    domain::{CustomerRef, MachineId, PieceId, Task, TaskId, TaskStatus},
    protocol::{OptionItem, Page, TaskForm},
};
use tracing::info;

use super::{fire_and_forget, load_options, load_page, mutation_outcome};
use crate::{
    api::ApiClient,
    context::RequestContext,
    error::ActionResult,
    messages::{TASK_CREATE, TASK_UPDATE},
};

const RESOURCE: &str = "tasks";
const NO_OWNER: &str = "Sem Dono";

#[derive(Deserialize)]
struct MachineRow {
    id: MachineId,
    model: String,
    brand: String,
    #[serde(default)]
    customer: Option<CustomerRef>,
}

#[derive(Deserialize)]
struct PieceRow {
    id: PieceId,
    name: String,
    price: f64,
}

impl ApiClient {
    pub async fn load_tasks(
        &self,
        ctx: &RequestContext,
        page: u32,
        size: u32,
    ) -> ActionResult<Page<Task>> {
        load_page(self, ctx, RESOURCE, page, size, None).await
    }

    /// New tasks always start as [`TaskStatus::Pending`].
    pub async fn create_task(&self, ctx: &RequestContext, form: &TaskForm) -> ActionResult<()> {
        let body = TaskForm {
            id: None,
            status: TaskStatus::Pending,
            ..form.clone()
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[], &TASK_CREATE)?;
        info!(name = %body.name, machine_id = %body.machine_id, "task: created");
        Ok(())
    }

    pub async fn update_task(
        &self,
        ctx: &RequestContext,
        id: &TaskId,
        form: &TaskForm,
    ) -> ActionResult<()> {
        let body = TaskForm {
            id: Some(id.clone()),
            ..form.clone()
        };
        let result = self.put(ctx, &format!("{RESOURCE}/{id}"), &body).await;
        mutation_outcome(result, &[], &TASK_UPDATE)
    }

    pub async fn delete_task(&self, ctx: &RequestContext, id: &TaskId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.0)
    }

    pub async fn machine_options(
        &self,
        ctx: &RequestContext,
    ) -> ActionResult<Vec<OptionItem<MachineId>>> {
        let rows: Vec<MachineRow> = load_options(self, ctx, "machines").await?;
        Ok(rows
            .into_iter()
            .map(|m| {
                let owner = m
                    .customer
                    .map(|c| c.name)
                    .filter(|name| !name.is_empty())
                    .unwrap_or_else(|| NO_OWNER.to_string());
                OptionItem {
                    id: m.id,
                    label: format!("{} - {} ({owner})", m.model, m.brand),
                    price: None,
                }
            })
            .collect())
    }

    pub async fn piece_options(
        &self,
        ctx: &RequestContext,
    ) -> ActionResult<Vec<OptionItem<PieceId>>> {
        let rows: Vec<PieceRow> = load_options(self, ctx, "pieces").await?;
        Ok(rows
            .into_iter()
            .map(|p| OptionItem {
                id: p.id,
                label: format!("{} (R$ {})", p.name, p.price),
                price: Some(p.price),
            })
            .collect())
    }
}
