use std::time::Duration;

use client_core::{ActionResult, ApiClient, RequestContext};
use shared::{
    domain::{Customer, CustomerId},
    protocol::CustomerForm,
};

use super::{
    page::{Debouncer, Editor, Modal, PageState},
    Route,
};

pub const PAGE_SIZE: u32 = 5;

pub const NAME_REQUIRED: &str = "O nome é obrigatório";
pub const CPF_LENGTH: &str = "O cpf deve ter exatamente 11 dígitos";
pub const PHONE_LENGTH: &str = "O telefone deve ter entre 1 à 20 dígitos";

/// First violated rule wins, checked in form order.
pub fn validate(form: &CustomerForm) -> Result<(), &'static str> {
    if form.name.trim().is_empty() {
        return Err(NAME_REQUIRED);
    }
    if form.cpf.trim().chars().count() != 11 {
        return Err(CPF_LENGTH);
    }
    let phone = form.phone.trim().chars().count();
    if !(1..=20).contains(&phone) {
        return Err(PHONE_LENGTH);
    }
    Ok(())
}

pub struct CustomerController {
    api: ApiClient,
    ctx: RequestContext,
    debounce: Debouncer,
    pub state: PageState<Customer>,
    pub search: String,
    pub editor: Editor<CustomerId, CustomerForm>,
}

listing_controller!(CustomerController, Route::Customer);

impl CustomerController {
    pub fn new(api: ApiClient, ctx: RequestContext, debounce: Duration) -> Self {
        Self {
            api,
            ctx,
            debounce: Debouncer::new(debounce),
            state: PageState::new(PAGE_SIZE),
            search: String::new(),
            editor: Editor::default(),
        }
    }

    pub async fn load(&mut self) {
        let result = self
            .api
            .load_customers(&self.ctx, self.state.page, self.state.size, &self.search)
            .await;
        self.state.commit(result);
    }

    /// Records a keystroke and returns its generation. Wait on a
    /// [`Self::debouncer`] handle, then hand the generation to
    /// [`Self::load_if_current`].
    pub fn type_search(&mut self, text: &str) -> u64 {
        self.search = text.to_string();
        self.state.page = 0;
        self.debounce.bump()
    }

    pub fn debouncer(&self) -> Debouncer {
        self.debounce.clone()
    }

    /// Queries unless a later keystroke took over.
    pub async fn load_if_current(&mut self, generation: u64) -> bool {
        if !self.debounce.is_current(generation) {
            return false;
        }
        self.load().await;
        true
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

    pub fn open_create(&mut self) {
        self.state.clear_error();
        self.editor.create();
    }

    pub fn open_edit(&mut self, customer: &Customer) {
        self.state.clear_error();
        self.editor.edit(
            customer.id.clone(),
            CustomerForm {
                id: Some(customer.id.clone()),
                name: customer.name.clone(),
                cpf: customer.cpf.clone(),
                phone: customer.phone.clone(),
                email: customer.email.clone(),
                address: customer.address.clone(),
            },
        );
    }

    pub fn open_delete(&mut self, id: CustomerId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
    }

    /// Saves the create or edit draft. `false` keeps the modal open.
    pub async fn submit(&mut self) -> bool {
        if let Err(message) = validate(&self.editor.draft) {
            self.state.reject(message);
            return false;
        }
        let result = match &self.editor.modal {
            Modal::Create => self.api.create_customer(&self.ctx, &self.editor.draft).await,
            Modal::Edit(id) => {
                self.api
                    .update_customer(&self.ctx, id, &self.editor.draft)
                    .await
            }
            _ => return false,
        };
        self.finish(result).await
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::Delete(id) = &self.editor.modal else {
            return false;
        };
        let result = self.api.delete_customer(&self.ctx, id).await;
        self.finish(result).await
    }

    async fn finish(&mut self, result: ActionResult<()>) -> bool {
        if !self.state.mutated(result) {
            return false;
        }
        self.editor.close();
        self.load().await;
        true
    }
}

#[cfg(test)]
#[path = "../tests/customer_tests.rs"]
mod tests;
