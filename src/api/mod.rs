//! HTTP API module for the Earnings Engine.
//!
//! This module provides the REST API endpoints for projecting agent
//! earnings and comparing the two compensation models.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::ProjectionRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
