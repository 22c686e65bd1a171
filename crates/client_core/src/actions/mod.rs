//! One module per shop entity. Every operation is an inherent method on
//! [`ApiClient`](crate::ApiClient) taking the caller's [`RequestContext`].

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::protocol::{Page, PageData};
use tracing::warn;

use crate::{
    api::ApiClient,
    context::RequestContext,
    error::{ActionError, ActionResult, ClientError, ClientResult},
    messages::Catalog,
    paging::clamp_page,
};

pub mod auth;
pub mod customer;
pub mod machine;
pub mod order;
pub mod piece;
pub mod task;
pub mod user;

/// Page size used to fill select boxes.
pub const OPTIONS_PAGE_SIZE: u32 = 100;

/// Listing fetch that fails open: anything but a 401 yields an empty page.
pub(crate) async fn load_page<T: DeserializeOwned>(
    api: &ApiClient,
    ctx: &RequestContext,
    resource: &'static str,
    page: u32,
    size: u32,
    search: Option<&str>,
) -> ActionResult<Page<T>> {
    let mut query = Vec::with_capacity(3);
    if let Some(search) = search {
        query.push(("searchTerm", search.trim().to_string()));
    }
    query.push(("page", page.to_string()));
    query.push(("size", size.to_string()));

    match api.get::<PageData<T>>(ctx, resource, &query).await {
        Ok(data) => Ok(clamp_page(data.into(), size, resource)),
        Err(ClientError::Unauthorized) => Err(ActionError::Unauthorized),
        Err(err) => {
            warn!(resource, page, error = %err, "actions: listing failed, showing empty page");
            Ok(Page::empty())
        }
    }
}

/// Select-box fetch: first [`OPTIONS_PAGE_SIZE`] rows, empty on failure.
pub(crate) async fn load_options<T: DeserializeOwned>(
    api: &ApiClient,
    ctx: &RequestContext,
    resource: &'static str,
) -> ActionResult<Vec<T>> {
    let page = load_page::<T>(api, ctx, resource, 0, OPTIONS_PAGE_SIZE, None).await?;
    Ok(page.content)
}

/// Mutation outcome. `expected` empty means any 2xx is accepted.
pub(crate) fn mutation_outcome(
    result: ClientResult<StatusCode>,
    expected: &[StatusCode],
    catalog: &Catalog,
) -> ActionResult<()> {
    match result {
        Ok(status) if expected.is_empty() || expected.contains(&status) => Ok(()),
        Ok(status) => {
            warn!(status = status.as_u16(), "actions: unexpected success status");
            Err(ActionError::Rejected(catalog.translate(&Default::default())))
        }
        Err(err) => Err(catalog.reject(err)),
    }
}

/// Deletes and similar fire-and-forget calls: only a 401 reaches the caller.
pub(crate) fn fire_and_forget(
    result: ClientResult<StatusCode>,
    resource: &'static str,
    id: &str,
) -> ActionResult<()> {
    match result {
        Ok(_) => Ok(()),
        Err(ClientError::Unauthorized) => Err(ActionError::Unauthorized),
        Err(err) => {
            warn!(resource, id, error = %err, "actions: call failed, caller will refresh");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "../tests/actions_tests.rs"]
mod tests;
