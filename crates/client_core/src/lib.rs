//! Typed client for the repair-shop REST API: transport, per-entity actions,
//! order aggregation and edit reconciliation.

pub mod actions;
pub mod aggregator;
pub mod api;
pub mod context;
pub mod error;
pub mod messages;
pub mod paging;
pub mod reconcile;

pub use api::ApiClient;
pub use context::{RequestContext, SessionClaims};
pub use error::{ActionError, ActionResult, ClientError, ClientResult};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
