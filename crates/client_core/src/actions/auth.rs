use shared::protocol::{LoginRequest, LoginResponse};
use tracing::{info, warn};

use crate::{
    api::ApiClient,
    context::RequestContext,
    error::{ActionError, ActionResult},
    messages::{login_error, LOGIN_UNEXPECTED},
};

impl ApiClient {
    /// The only unauthenticated call. Returns a context carrying the issued
    /// token; the caller decides where to keep it.
    pub async fn login(&self, username: &str, password: &str) -> ActionResult<RequestContext> {
        let url = self
            .endpoint("auth/login")
            .map_err(|_| ActionError::Rejected(LOGIN_UNEXPECTED.to_string()))?;
        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.trim().to_string(),
        };

        let response = self
            .http()
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                warn!(error = %err, "auth: login request failed");
                ActionError::Rejected(LOGIN_UNEXPECTED.to_string())
            })?;

        // Both the token and the error arrive in the JSON body, whatever the status.
        let body = response.bytes().await.unwrap_or_default();
        let body: LoginResponse = serde_json::from_slice(&body).unwrap_or_default();

        if let Some(error) = body.error {
            return Err(ActionError::Rejected(login_error(&error).to_string()));
        }
        match body.token {
            Some(token) if !token.is_empty() => {
                info!(username = %request.username, "auth: logged in");
                Ok(RequestContext::with_token(token))
            }
            _ => Err(ActionError::Rejected(LOGIN_UNEXPECTED.to_string())),
        }
    }
}
