//! Web layer for the metro route planner.
//!
//! Provides JSON endpoints for listing the network and planning routes.

mod config;
mod dto;
mod routes;
mod state;

pub use config::{ServerConfig, ServerError};
pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
