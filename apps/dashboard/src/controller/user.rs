use std::time::Duration;

use client_core::{ActionResult, ApiClient, RequestContext};
use shared::{
    domain::{User, UserId},
    protocol::UserForm,
};

use super::{
    page::{Debouncer, Editor, Modal, PageState},
    Route,
};

pub const PAGE_SIZE: u32 = 10;

pub const USERNAME_LENGTH: &str = "O username deve ter entre 5 e 20 caracteres";

pub fn validate(form: &UserForm) -> Result<(), &'static str> {
    let len = form.username.trim().chars().count();
    if !(5..=20).contains(&len) {
        return Err(USERNAME_LENGTH);
    }
    Ok(())
}

pub struct UserController {
    api: ApiClient,
    ctx: RequestContext,
    debounce: Debouncer,
    pub state: PageState<User>,
    pub search: String,
    pub editor: Editor<UserId, UserForm>,
}

listing_controller!(UserController, Route::User);

impl UserController {
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
            .load_users(&self.ctx, self.state.page, self.state.size, &self.search)
            .await;
        self.state.commit(result);
    }

    pub fn type_search(&mut self, text: &str) -> u64 {
        self.search = text.to_string();
        self.state.page = 0;
        self.debounce.bump()
    }

    pub fn debouncer(&self) -> Debouncer {
        self.debounce.clone()
    }

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

    pub fn open_edit(&mut self, user: &User) {
        self.state.clear_error();
        self.editor.edit(
            user.id.clone(),
            UserForm {
                username: user.username.clone(),
                email: user.email.clone(),
            },
        );
    }

    pub fn open_delete(&mut self, id: UserId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    pub fn open_reset(&mut self, id: UserId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Reset(id));
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
    }

    pub async fn submit(&mut self) -> bool {
        if let Err(message) = validate(&self.editor.draft) {
            self.state.reject(message);
            return false;
        }
        let result = match &self.editor.modal {
            Modal::Create => self.api.create_user(&self.ctx, &self.editor.draft).await,
            Modal::Edit(id) => self.api.update_user(&self.ctx, id, &self.editor.draft).await,
            _ => return false,
        };
        self.finish(result).await
    }

    /// Runs whichever confirmation modal is open (delete or password reset).
    pub async fn confirm(&mut self) -> bool {
        let result = match &self.editor.modal {
            Modal::Delete(id) => self.api.delete_user(&self.ctx, id).await,
            Modal::Reset(id) => self.api.reset_user(&self.ctx, id).await,
            _ => return false,
        };
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
