//! Web layer for the accessible route planner.
//!
//! Provides HTTP endpoints for route queries, stop inspection and elevator
//! outage reports.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
