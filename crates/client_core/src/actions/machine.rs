use serde::Deserialize;
use shared::{
    domain::{CustomerId, Machine, MachineId},
    protocol::{MachineForm, OptionItem, Page},
};
use tracing::info;

use super::{fire_and_forget, load_options, load_page, mutation_outcome};
use crate::{
    api::ApiClient,
    context::RequestContext,
    error::ActionResult,
    messages::{MACHINE_CREATE, MACHINE_UPDATE},
};

const RESOURCE: &str = "machines";

#[derive(Deserialize)]
struct CustomerRow {
    id: CustomerId,
    name: String,
}

impl ApiClient {
    pub async fn load_machines(
        &self,
        ctx: &RequestContext,
        page: u32,
        size: u32,
    ) -> ActionResult<Page<Machine>> {
        load_page(self, ctx, RESOURCE, page, size, None).await
    }

    pub async fn create_machine(&self, ctx: &RequestContext, form: &MachineForm) -> ActionResult<()> {
        let body = MachineForm {
            id: None,
            ..form.clone()
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[], &MACHINE_CREATE)?;
        info!(model = %body.model, customer_id = %body.customer_id, "machine: created");
        Ok(())
    }

    pub async fn update_machine(
        &self,
        ctx: &RequestContext,
        id: &MachineId,
        form: &MachineForm,
    ) -> ActionResult<()> {
        let body = MachineForm {
            id: Some(id.clone()),
            ..form.clone()
        };
        let result = self.put(ctx, &format!("{RESOURCE}/{id}"), &body).await;
        mutation_outcome(result, &[], &MACHINE_UPDATE)
    }

    pub async fn delete_machine(&self, ctx: &RequestContext, id: &MachineId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.0)
    }

    /// Owner choices for the machine form.
    pub async fn customer_options(
        &self,
        ctx: &RequestContext,
    ) -> ActionResult<Vec<OptionItem<CustomerId>>> {
        let rows: Vec<CustomerRow> = load_options(self, ctx, "customers").await?;
        Ok(rows
            .into_iter()
            .map(|c| OptionItem {
                id: c.id,
                label: c.name,
                price: None,
            })
            .collect())
    }
}
