//! Submission handlers

mod handler;
pub mod request;
pub mod response;

pub use handler::*;
pub use request::*;
pub use response::*;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Submission routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handler::create_submission))
        .route("/{id}", get(handler::get_submission))
        .route("/{id}/cancel", post(handler::cancel_submission))
}
