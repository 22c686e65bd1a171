use client_core::{ApiClient, RequestContext};

use super::Route;

#[derive(Debug, Clone, Default)]
pub struct LoginController {
    pub username: String,
    pub password: String,
    pub error: Option<String>,
}

impl LoginController {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            error: None,
        }
    }

    /// On success returns the new session and the screen to open next.
    pub async fn submit(&mut self, api: &ApiClient) -> Option<(RequestContext, Route)> {
        match api.login(&self.username, &self.password).await {
            Ok(ctx) => {
                self.error = None;
                self.password.clear();
                Some((ctx, Route::Home))
            }
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
