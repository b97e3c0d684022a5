//! Static demo data endpoint.

use axum::{Json, Router, routing::get};
use leasebid_demo_data::DemoDataSnapshot;

use crate::state::AppState;

/// GET /
async fn get_demo_data() -> Json<DemoDataSnapshot> {
    Json(DemoDataSnapshot::collect())
}

/// Returns the router for the demo data.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_demo_data))
}
