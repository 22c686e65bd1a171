use reqwest::StatusCode;
use shared::{
    domain::{Customer, CustomerId},
    protocol::{CustomerForm, Page},
};
use tracing::info;

use super::{fire_and_forget, load_page, mutation_outcome};
use crate::{
    api::ApiClient, context::RequestContext, error::ActionResult, messages::CUSTOMER,
};

const RESOURCE: &str = "customers";

impl ApiClient {
    pub async fn load_customers(
        &self,
        ctx: &RequestContext,
        page: u32,
        size: u32,
        search: &str,
    ) -> ActionResult<Page<Customer>> {
        load_page(self, ctx, RESOURCE, page, size, Some(search)).await
    }

    pub async fn create_customer(
        &self,
        ctx: &RequestContext,
        form: &CustomerForm,
    ) -> ActionResult<()> {
        let body = CustomerForm {
            id: None,
            ..form.trimmed()
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[StatusCode::CREATED], &CUSTOMER)?;
        info!(name = %body.name, "customer: created");
        Ok(())
    }

    /// `PUT /customers` with the id carried in the body.
    pub async fn update_customer(
        &self,
        ctx: &RequestContext,
        id: &CustomerId,
        form: &CustomerForm,
    ) -> ActionResult<()> {
        let body = CustomerForm {
            id: Some(id.clone()),
            ..form.trimmed()
        };
        let result = self.put(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[StatusCode::OK, StatusCode::NO_CONTENT], &CUSTOMER)?;
        info!(customer_id = %id, "customer: updated");
        Ok(())
    }

    pub async fn delete_customer(&self, ctx: &RequestContext, id: &CustomerId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.0)
    }
}
