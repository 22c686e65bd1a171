use reqwest::StatusCode;
use serde::Serialize;
use shared::{
    domain::{User, UserId},
    protocol::{ChangePasswordRequest, Page, UserForm},
};
use tracing::info;

use super::{fire_and_forget, load_page, mutation_outcome};
use crate::{
    api::ApiClient,
    context::RequestContext,
    error::{ActionError, ActionResult},
    messages::{PASSWORD, PASSWORD_MISMATCH, USER},
};

const RESOURCE: &str = "users";

#[derive(Serialize)]
struct UserUpdate<'a> {
    id: &'a UserId,
    username: &'a str,
    email: &'a str,
}

impl ApiClient {
    pub async fn load_users(
        &self,
        ctx: &RequestContext,
        page: u32,
        size: u32,
        search: &str,
    ) -> ActionResult<Page<User>> {
        load_page(self, ctx, RESOURCE, page, size, Some(search)).await
    }

    pub async fn create_user(&self, ctx: &RequestContext, form: &UserForm) -> ActionResult<()> {
        let body = UserForm {
            username: form.username.trim().to_string(),
            email: form.email.trim().to_string(),
        };
        let result = self.post(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[StatusCode::CREATED], &USER)?;
        info!(username = %body.username, "user: created");
        Ok(())
    }

    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        id: &UserId,
        form: &UserForm,
    ) -> ActionResult<()> {
        let body = UserUpdate {
            id,
            username: form.username.trim(),
            email: form.email.trim(),
        };
        let result = self.put(ctx, RESOURCE, &body).await;
        mutation_outcome(result, &[StatusCode::OK, StatusCode::NO_CONTENT], &USER)
    }

    pub async fn delete_user(&self, ctx: &RequestContext, id: &UserId) -> ActionResult<()> {
        let result = self.delete(ctx, &format!("{RESOURCE}/{id}"), &[]).await;
        fire_and_forget(result, RESOURCE, &id.0)
    }

    /// Admin action resetting another user's password.
    pub async fn reset_user(&self, ctx: &RequestContext, id: &UserId) -> ActionResult<()> {
        let result = self
            .patch::<()>(ctx, &format!("{RESOURCE}/{id}"), None)
            .await;
        fire_and_forget(result, RESOURCE, &id.0)?;
        info!(user_id = %id, "user: password reset requested");
        Ok(())
    }

    /// Changes the logged-in user's own password. `confirm` must repeat
    /// `new_password`; the check happens before any request.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        old_password: &str,
        new_password: &str,
        confirm: &str,
    ) -> ActionResult<()> {
        if confirm.trim() != new_password.trim() {
            return Err(ActionError::Rejected(PASSWORD_MISMATCH.to_string()));
        }
        let body = ChangePasswordRequest {
            old_password: old_password.trim().to_string(),
            new_password: new_password.trim().to_string(),
        };
        let result = self.patch(ctx, RESOURCE, Some(&body)).await;
        mutation_outcome(result, &[StatusCode::NO_CONTENT], &PASSWORD)
    }
}
