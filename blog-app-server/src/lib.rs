//! HTTP server application for BlogApp
//!
//! This crate wires configuration, logging and the SQLite storage layer
//! into an axum router exposing the blog use cases.

pub mod api;
pub mod config;
pub mod current_user;
pub mod error;
pub mod middleware;
pub mod server;


pub use error::{Error, Result};

/// Re-export the domain and storage crates for convenience
pub use blog_app_core as core;
pub use blog_app_storage as storage;
