//! Controller layer: one state holder per screen, driving `client_core`
//! actions and keeping pagination, modal, draft and error state.

/// Lifecycle shared by the listing screens.
pub trait Controller {
    fn route(&self) -> Route;

    /// Set once the session has expired.
    fn redirect(&self) -> Option<Route>;

    fn error(&self) -> Option<&str>;

    /// Stops committing fetch results; called when the screen goes away.
    fn shutdown(&self);
}

/// Implements [`Controller`] over a `state: PageState<_>` field. Must stay
/// above the screen `mod` declarations.
macro_rules! listing_controller {
    ($ty:ty, $route:expr) => {
        impl $crate::controller::Controller for $ty {
            fn route(&self) -> $crate::controller::Route {
                $route
            }

            fn redirect(&self) -> Option<$crate::controller::Route> {
                self.state.redirect
            }

            fn error(&self) -> Option<&str> {
                self.state.error.as_deref()
            }

            fn shutdown(&self) {
                self.state.shutdown();
            }
        }
    };
}

pub mod customer;
pub mod events;
pub mod home;
pub mod login;
pub mod machine;
pub mod order;
pub mod page;
pub mod piece;
pub mod selection;
pub mod sidebar;
pub mod task;
pub mod user;

pub use events::Route;

#[cfg(test)]
#[path = "../tests/support.rs"]
pub(crate) mod test_support;
