//! Lease Bid API — HTTP surface over walkthrough sessions.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::Router;

use crate::state::AppState;

/// Builds the application router without transport layers.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/demo-data", routes::demo_data::router())
        .nest("/api/v1/walkthroughs", routes::walkthrough::router())
        .with_state(app_state)
}
