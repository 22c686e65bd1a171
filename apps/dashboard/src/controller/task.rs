use client_core::{paging::filter_items, ActionResult, ApiClient, RequestContext};
use shared::{
    domain::{MachineId, PieceId, Task, TaskId, TaskStatus},
    protocol::{OptionItem, TaskForm},
};

use super::{
    page::{Editor, Modal, PageState},
    Route,
};

pub const PAGE_SIZE: u32 = 10;

pub const NAME_TOO_SHORT: &str =
    "O nome do serviço é obrigatório e deve ter pelo menos 3 caracteres.";
pub const MACHINE_REQUIRED: &str = "É obrigatório selecionar uma máquina para o serviço.";
pub const NEGATIVE_PRICE: &str = "O preço não pode ser negativo.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub status: TaskStatus,
    pub machine_id: Option<MachineId>,
    pub pieces: Vec<PieceId>,
}

impl TaskDraft {
    pub fn validate(&self) -> Result<TaskForm, &'static str> {
        let name = self.name.trim();
        if name.chars().count() < 3 {
            return Err(NAME_TOO_SHORT);
        }
        let machine_id = self.machine_id.clone().ok_or(MACHINE_REQUIRED)?;
        if self.price.is_nan() || self.price < 0.0 {
            return Err(NEGATIVE_PRICE);
        }
        Ok(TaskForm {
            id: None,
            name: name.to_string(),
            price: self.price,
            description: self.description.trim().to_string(),
            status: self.status,
            machine_id,
            pieces_id: self.pieces.clone(),
        })
    }

    pub fn toggle_piece(&mut self, id: PieceId) {
        if let Some(pos) = self.pieces.iter().position(|p| *p == id) {
            self.pieces.remove(pos);
        } else {
            self.pieces.push(id);
        }
    }
}

impl From<&Task> for TaskDraft {
    fn from(task: &Task) -> Self {
        Self {
            name: task.name.clone(),
            price: task.price,
            description: task.description.clone(),
            status: task.status,
            machine_id: task.machine.id.clone(),
            pieces: task.pieces.iter().map(|p| p.id).collect(),
        }
    }
}

pub struct TaskController {
    api: ApiClient,
    ctx: RequestContext,
    pub state: PageState<Task>,
    pub filter: String,
    pub editor: Editor<TaskId, TaskDraft>,
    pub machines: Vec<OptionItem<MachineId>>,
    pub pieces: Vec<OptionItem<PieceId>>,
}

listing_controller!(TaskController, Route::Task);

impl TaskController {
    pub fn new(api: ApiClient, ctx: RequestContext) -> Self {
        Self {
            api,
            ctx,
            state: PageState::new(PAGE_SIZE),
            filter: String::new(),
            editor: Editor::default(),
            machines: Vec::new(),
            pieces: Vec::new(),
        }
    }

    pub async fn load(&mut self) {
        let result = self
            .api
            .load_tasks(&self.ctx, self.state.page, self.state.size)
            .await;
        self.state.commit(result);
    }

    pub fn visible(&self) -> Vec<&Task> {
        filter_items(&self.state.content, &self.filter, |t| vec![t.name.as_str()])
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

    async fn load_options(&mut self) {
        let (machines, pieces) = tokio::join!(
            self.api.machine_options(&self.ctx),
            self.api.piece_options(&self.ctx)
        );
        if !self.state.is_live() {
            return;
        }
        match (machines, pieces) {
            (Ok(machines), Ok(pieces)) => {
                self.machines = machines;
                self.pieces = pieces;
            }
            (Err(err), _) | (_, Err(err)) => self.state.fail(err),
        }
    }

    pub async fn open_create(&mut self) {
        self.state.clear_error();
        self.editor.create();
        self.load_options().await;
    }

    pub async fn open_edit(&mut self, task: &Task) {
        self.state.clear_error();
        self.editor.edit(task.id.clone(), TaskDraft::from(task));
        self.load_options().await;
    }

    pub fn open_delete(&mut self, id: TaskId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
    }

    /// Sum of the prices of the pieces currently ticked in the draft.
    pub fn draft_pieces_total(&self) -> f64 {
        self.pieces
            .iter()
            .filter(|p| self.editor.draft.pieces.contains(&p.id))
            .filter_map(|p| p.price)
            .sum()
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
            Modal::Create => self.api.create_task(&self.ctx, &form).await,
            Modal::Edit(id) => self.api.update_task(&self.ctx, id, &form).await,
            _ => return false,
        };
        self.finish(result).await
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::Delete(id) = &self.editor.modal else {
            return false;
        };
        let result = self.api.delete_task(&self.ctx, id).await;
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
#[path = "../tests/task_tests.rs"]
mod tests;
