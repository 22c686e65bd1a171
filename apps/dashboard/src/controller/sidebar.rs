//! Role-gated navigation, own-password change and logout.

use client_core::{ActionError, ApiClient, RequestContext, SessionClaims};
use tracing::info;

use super::Route;
use crate::session::SessionStore;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordDraft {
    pub old_password: String,
    pub new_password: String,
    pub confirm: String,
}

pub struct Sidebar {
    api: ApiClient,
    ctx: RequestContext,
    pub claims: SessionClaims,
    pub password: PasswordDraft,
    pub error: Option<String>,
    pub redirect: Option<Route>,
}

impl Sidebar {
    /// `Err(Route::Login)` when there is no usable token.
    pub fn open(api: ApiClient, ctx: RequestContext) -> Result<Self, Route> {
        let claims = ctx.claims().map_err(|_| Route::Login)?;
        Ok(Self {
            api,
            ctx,
            claims,
            password: PasswordDraft::default(),
            error: None,
            redirect: None,
        })
    }

    pub fn username(&self) -> &str {
        &self.claims.username
    }

    pub fn is_admin(&self) -> bool {
        self.claims.admin
    }

    pub fn menu(&self) -> Vec<Route> {
        Route::MENU
            .into_iter()
            .filter(|r| self.claims.can_access(r.path()))
            .collect()
    }

    /// Where a request for `route` actually lands.
    pub fn resolve(&self, route: Route) -> Route {
        if self.claims.can_access(route.path()) {
            route
        } else {
            info!(requested = %route, "sidebar: restricted screen, going home");
            Route::Home
        }
    }

    /// `true` once the server accepted the new password; the draft is cleared.
    pub async fn change_password(&mut self) -> bool {
        let draft = &self.password;
        let result = self
            .api
            .change_password(
                &self.ctx,
                &draft.old_password,
                &draft.new_password,
                &draft.confirm,
            )
            .await;
        match result {
            Ok(()) => {
                info!(username = %self.claims.username, "sidebar: password changed");
                self.password = PasswordDraft::default();
                self.error = None;
                true
            }
            Err(ActionError::Unauthorized) => {
                self.redirect = Some(Route::Login);
                false
            }
            Err(ActionError::Rejected(message)) => {
                if self.password.confirm.trim() != self.password.new_password.trim() {
                    self.password.confirm.clear();
                }
                self.error = Some(message);
                false
            }
        }
    }
}

/// Forgets the stored token; the next screen is always the login.
pub fn logout(store: &SessionStore) -> anyhow::Result<Route> {
    store.clear()?;
    info!("sidebar: logged out");
    Ok(Route::Login)
}

#[cfg(test)]
#[path = "../tests/sidebar_tests.rs"]
mod tests;
