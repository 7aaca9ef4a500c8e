#![forbid(unsafe_code)]
//! HTTP reporting API over the civic complaint store.

pub mod auth;
pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod extract;
mod handlers;
pub mod routes;
pub mod state;
mod support;

pub use auth::{IdentityConfig, IdentityProvider};
pub use error::{ApiError, ApiResult};
pub use routes::build_router;
pub use state::{ApiSettings, AppState};
