//! Cora daemon library - exposes modules for testing.

pub mod auth;
pub mod config;
pub mod routes;
pub mod server;
pub mod session;
pub mod sweeper;
