use shared::{
    domain::{Piece, PieceId},
    protocol::{Page, PieceForm},
};
use tracing::{info, warn};

use super::{fire_and_forget, load_page, mutation_outcome};
use crate::{
    api::ApiClient,
    context::RequestContext,
    error::{ActionError, ActionResult, ClientError},
    messages::PIECE,
};

const RESOURCE: &str = "pieces";

impl ApiClient {
    pub async fn load_pieces(
        &self,
        ctx: &RequestContext,
        page: u32,
        size: u32,
    ) -> ActionResult<Page<Piece>> {
        load_page(self, ctx, RESOURCE, page, size, None).await
    }

    /// `None` when the piece cannot be fetched; the edit modal then stays empty.
    pub async fn piece_details(
        &self,
        ctx: &RequestContext,
        id: PieceId,
    ) -> ActionResult<Option<Piece>> {
        match self.get(ctx, &format!("{RESOURCE}/{id}"), &[]).await {
            Ok(piece) => Ok(Some(piece)),
            Err(ClientError::Unauthorized) => Err(ActionError::Unauthorized),
            Err(err) => {
                warn!(piece_id = id.0, error = %err, "piece: detail fetch failed");
                Ok(None)
            }
        }
    }

    pub async fn create_piece(&self, ctx: &RequestContext, form: &PieceForm) -> ActionResult<()> {
        let body = PieceForm {
            id: None,
            ..form.clone()
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[], &PIECE)?;
        info!(name = %body.name, "piece: created");
        Ok(())
    }

    pub async fn update_piece(
        &self,
        ctx: &RequestContext,
        id: PieceId,
        form: &PieceForm,
    ) -> ActionResult<()> {
        let body = PieceForm {
            id: Some(id),
            ..form.clone()
        };
        let result = self.put(ctx, &format!("{RESOURCE}/{id}"), &body).await;
        mutation_outcome(result, &[], &PIECE)
    }

    pub async fn delete_piece(&self, ctx: &RequestContext, id: PieceId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.to_string())
    }
}
