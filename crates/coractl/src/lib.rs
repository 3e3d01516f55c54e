//! Cora Control - CLI client library for the Cora daemon

pub mod cli;
pub mod client;
pub mod commands;
