use client_core::{paging::filter_items, ActionResult, ApiClient, RequestContext};
use shared::{
    domain::{CustomerId, Machine, MachineCategory, MachineId},
    protocol::{MachineForm, OptionItem},
};

use super::{
    page::{Editor, Modal, PageState},
    Route,
};

pub const PAGE_SIZE: u32 = 10;

pub const MODEL_REQUIRED: &str = "O modelo é obrigatório.";
pub const BRAND_REQUIRED: &str = "A marca é obrigatória.";
pub const CATEGORY_REQUIRED: &str = "Selecione uma categoria.";
pub const CUSTOMER_REQUIRED: &str = "Selecione um cliente.";
pub const DESCRIPTION_TOO_SHORT: &str = "A descrição deve ter pelo menos 10 caracteres.";

/// Form fields before the selects are known to be filled.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MachineDraft {
    pub model: String,
    pub brand: String,
    pub category: Option<MachineCategory>,
    pub description: String,
    pub customer_id: Option<CustomerId>,
}

impl MachineDraft {
    pub fn validate(&self) -> Result<MachineForm, &'static str> {
        let model = self.model.trim();
        if model.is_empty() {
            return Err(MODEL_REQUIRED);
        }
        let brand = self.brand.trim();
        if brand.is_empty() {
            return Err(BRAND_REQUIRED);
        }
        let category = self.category.ok_or(CATEGORY_REQUIRED)?;
        let customer_id = self.customer_id.clone().ok_or(CUSTOMER_REQUIRED)?;
        let description = self.description.trim();
        if description.chars().count() < 10 {
            return Err(DESCRIPTION_TOO_SHORT);
        }
        Ok(MachineForm {
            id: None,
            model: model.to_string(),
            brand: brand.to_string(),
            category,
            description: description.to_string(),
            customer_id,
        })
    }
}

impl From<&Machine> for MachineDraft {
    fn from(machine: &Machine) -> Self {
        Self {
            model: machine.model.clone(),
            brand: machine.brand.clone(),
            category: Some(machine.category),
            description: machine.description.clone(),
            customer_id: machine.customer.id.clone(),
        }
    }
}

pub struct MachineController {
    api: ApiClient,
    ctx: RequestContext,
    pub state: PageState<Machine>,
    pub filter: String,
    pub editor: Editor<MachineId, MachineDraft>,
    pub customers: Vec<OptionItem<CustomerId>>,
}

listing_controller!(MachineController, Route::Machine);

impl MachineController {
    pub fn new(api: ApiClient, ctx: RequestContext) -> Self {
        Self {
            api,
            ctx,
            state: PageState::new(PAGE_SIZE),
            filter: String::new(),
            editor: Editor::default(),
            customers: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        let result = self
            .api
            .load_machines(&self.ctx, self.state.page, self.state.size)
            .await;
        self.state.commit(result);
    }

    /// Loaded page narrowed by model, brand or owner name.
    pub fn visible(&self) -> Vec<&Machine> {
        filter_items(&self.state.content, &self.filter, |m| {
            vec![m.model.as_str(), m.brand.as_str(), m.customer.name.as_str()]
        })
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

    async fn load_customers(&mut self) {
        match self.api.customer_options(&self.ctx).await {
            Ok(options) if self.state.is_live() => self.customers = options,
            Ok(_) => {}
            Err(err) => self.state.fail(err),
        }
    }

    pub async fn open_create(&mut self) {
        self.state.clear_error();
        self.editor.create();
        self.load_customers().await;
    }

    pub async fn open_edit(&mut self, machine: &Machine) {
        self.state.clear_error();
        self.editor.edit(machine.id.clone(), MachineDraft::from(machine));
        self.load_customers().await;
    }

    pub fn open_delete(&mut self, id: MachineId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
    }

    pub async fn submit(&mut self) -> bool {
        let form = match self.editor.draft.validate() {
            Ok(form) => form,
            Err(message) => {
                self.state.reject(message);
                return false;
            }
        };
        let result = match &self.editor.modal {
            Modal::Create => self.api.create_machine(&self.ctx, &form).await,
            Modal::Edit(id) => self.api.update_machine(&self.ctx, id, &form).await,
            _ => return false,
        };
        self.finish(result).await
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::Delete(id) = &self.editor.modal else {
            return false;
        };
        let result = self.api.delete_machine(&self.ctx, id).await;
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
#[path = "../tests/machine_tests.rs"]
mod tests;
