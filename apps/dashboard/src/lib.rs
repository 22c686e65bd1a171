//! Headless repair-shop dashboard: configuration, session storage, page
//! controllers and plain-text rendering on top of `client_core`.

pub mod config;
pub mod controller;
pub mod render;
pub mod session;
