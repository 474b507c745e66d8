//! Papertrade HTTP server, as a library so integration tests can build
//! the router in-process.

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod main_lib;
pub mod models;

pub use main_lib::{build_state, AppState};
