use client_core::{paging::filter_items, ActionResult, ApiClient, RequestContext};
use shared::{
    domain::{Piece, PieceId},
    protocol::PieceForm,
};

use super::{
    page::{Editor, Modal, PageState},
    Route,
};

pub const PAGE_SIZE: u32 = 10;

pub const NAME_REQUIRED: &str = "O nome da peça é obrigatório.";
pub const NEGATIVE_PRICE: &str = "O preço não pode ser negativo.";

pub fn validate(form: &PieceForm) -> Result<PieceForm, &'static str> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(NAME_REQUIRED);
    }
    if form.price.is_nan() || form.price < 0.0 {
        return Err(NEGATIVE_PRICE);
    }
    Ok(PieceForm {
        id: form.id,
        name: name.to_string(),
        price: form.price,
        brand: form.brand.trim().to_string(),
        description: form.description.trim().to_string(),
    })
}

pub struct PieceController {
    api: ApiClient,
    ctx: RequestContext,
    pub state: PageState<Piece>,
    pub filter: String,
    pub editor: Editor<PieceId, PieceForm>,
}

listing_controller!(PieceController, Route::Piece);

impl PieceController {
    pub fn new(api: ApiClient, ctx: RequestContext) -> Self {
        Self {
            api,
            ctx,
            state: PageState::new(PAGE_SIZE),
            filter: String::new(),
            editor: Editor::default(),
        }
    }

    pub async fn load(&mut self) {
        let result = self
            .api
            .load_pieces(&self.ctx, self.state.page, self.state.size)
            .await;
        self.state.commit(result);
    }

    pub fn visible(&self) -> Vec<&Piece> {
        filter_items(&self.state.content, &self.filter, |p| {
            vec![p.name.as_str(), p.brand.as_str()]
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

    pub fn open_create(&mut self) {
        self.state.clear_error();
        self.editor.create();
    }

    /// Fetches the piece first; if that fails the modal opens empty.
    pub async fn open_edit(&mut self, id: PieceId) {
        self.state.clear_error();
        let draft = match self.api.piece_details(&self.ctx, id).await {
            Ok(Some(piece)) => PieceForm {
                id: Some(piece.id),
                name: piece.name,
                price: piece.price,
                brand: piece.brand,
                description: piece.description,
            },
            Ok(None) => PieceForm::default(),
            Err(err) => {
                self.state.fail(err);
                return;
            }
        };
        self.editor.edit(id, draft);
    }

    pub fn open_delete(&mut self, id: PieceId) {
        self.state.clear_error();
        self.editor.confirm(Modal::Delete(id));
    }

    pub fn close_modal(&mut self) {
        self.state.clear_error();
        self.editor.close();
    }

    pub async fn submit(&mut self) -> bool {
        let form = match validate(&self.editor.draft) {
            Ok(form) => form,
            Err(message) => {
                self.state.reject(message);
                return false;
            }
        };
        let result = match &self.editor.modal {
            Modal::Create => self.api.create_piece(&self.ctx, &form).await,
            Modal::Edit(id) => self.api.update_piece(&self.ctx, *id, &form).await,
            _ => return false,
        };
        self.finish(result).await
    }

    pub async fn confirm_delete(&mut self) -> bool {
        let Modal::Delete(id) = &self.editor.modal else {
            return false;
        };
        let result = self.api.delete_piece(&self.ctx, *id).await;
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
#[path = "../tests/piece_tests.rs"]
mod tests;
