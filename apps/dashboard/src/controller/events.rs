//! Screens a controller can send the user to.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Customer,
    User,
    Machine,
    Piece,
    Task,
    Order,
}

impl Route {
    /// Sidebar entries in display order.
    pub const MENU: [Route; 7] = [
        Route::Home,
        Route::User,
        Route::Customer,
        Route::Machine,
        Route::Order,
        Route::Task,
        Route::Piece,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/Login",
            Route::Home => "/",
            Route::Customer => "/Customer",
            Route::User => "/User",
            Route::Machine => "/Machine",
            Route::Piece => "/Piece",
            Route::Task => "/Task",
            Route::Order => "/Order",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Home => "Recente",
            Route::Customer => "Clientes",
            Route::User => "Usuários",
            Route::Machine => "Maquinas",
            Route::Piece => "Peças",
            Route::Task => "Serviços",
            Route::Order => "Pedidos",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
