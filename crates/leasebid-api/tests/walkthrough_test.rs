//! Integration tests for walkthrough sessions over HTTP.
//!
//! Every test pauses the Tokio clock so phase boundaries can be stepped
//! through exactly.

mod common;

use axum::http::StatusCode;
use leasebid_demo_data::accounts::{LESSEE_ADDRESS, LESSOR_ADDRESS};
use leasebid_demo_data::contract::LESSEE_BID_SIGNATURE;
use leasebid_walkthrough::application::walkthrough::WalkthroughSettings;
use serde_json::json;

fn session_uri(session_id: &str, suffix: &str) -> String {
    format!("/api/v1/walkthroughs/{session_id}{suffix}")
}

#[tokio::test(start_paused = true)]
async fn test_new_walkthrough_starts_on_first_step_idle() {
    // Arrange
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;

    // Act
    let (status, view) = common::get_json(&app, &session_uri(&session_id, "")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["session_id"], session_id);
    assert_eq!(view["current_step"], 1);
    assert_eq!(view["total_steps"], 2);
    assert_eq!(view["finished"], false);
    assert_eq!(view["auto_advance"], false);
    assert_eq!(view["steps"][0]["active"], true);
    assert_eq!(view["steps"][0]["current_phase"], "idle");
    assert_eq!(view["steps"][1]["active"], false);
    assert!(view["steps"][1]["current_phase"].is_null());
}

#[tokio::test(start_paused = true)]
async fn test_phases_progress_and_first_step_completes() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    let uri = session_uri(&session_id, "");

    common::advance_ms(1799).await;
    let (_, view) = common::get_json(&app, &uri).await;
    assert_eq!(view["steps"][0]["current_phase"], "idle");

    common::advance_ms(1).await;
    let (_, view) = common::get_json(&app, &uri).await;
    assert_eq!(view["steps"][0]["current_phase"], "hashing");
    assert_eq!(view["steps"][0]["complete"], false);
    assert_eq!(view["steps"][0]["duration_ms"], 5600);
    assert_eq!(view["steps"][0]["remaining_ms"], 3800);

    common::advance_ms(3800).await;
    let (_, view) = common::get_json(&app, &uri).await;
    assert_eq!(view["steps"][0]["current_phase"], "submitted");
    assert_eq!(view["steps"][0]["complete"], true);
    assert_eq!(view["steps"][0]["payload"]["bidder"], LESSEE_ADDRESS);
    assert_eq!(view["current_step"], 1);
}

#[tokio::test(start_paused = true)]
async fn test_second_step_payload_reads_first_step_signature() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    common::advance_ms(5600).await;

    let (status, body) = common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 2 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_step"], 2);
    assert_eq!(body["changed"], true);

    common::advance_ms(5200).await;
    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["steps"][0]["active"], false);
    assert_eq!(view["steps"][1]["current_phase"], "finalized");
    let payload = &view["steps"][1]["payload"];
    assert_eq!(payload["lessor"], LESSOR_ADDRESS);
    assert_eq!(payload["acceptedBidder"], LESSEE_ADDRESS);
    assert_eq!(payload["acceptedBidSignature"], LESSEE_BID_SIGNATURE);
}

#[tokio::test(start_paused = true)]
async fn test_navigating_away_mid_sequence_never_completes_step() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    common::advance_ms(2000).await;

    common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 2 }),
    )
    .await;
    common::advance_ms(10_000).await;

    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["steps"][0]["complete"], false);
    assert!(view["steps"][0]["payload"].is_null());
    assert_eq!(view["steps"][1]["complete"], true);
}

#[tokio::test(start_paused = true)]
async fn test_navigate_to_same_step_reports_unchanged() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;

    let (status, body) = common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["changed"], false);
}

#[tokio::test(start_paused = true)]
async fn test_navigate_backwards_returns_409() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    let uri = session_uri(&session_id, "/navigate");
    common::post_json(&app, &uri, &json!({ "step": 2 })).await;

    let (status, body) = common::post_json(&app, &uri, &json!({ "step": 1 })).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "step_regression");
}

#[tokio::test(start_paused = true)]
async fn test_navigate_out_of_range_returns_400() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    let uri = session_uri(&session_id, "/navigate");

    let (zero_status, zero_body) = common::post_json(&app, &uri, &json!({ "step": 0 })).await;
    let (high_status, _) = common::post_json(&app, &uri, &json!({ "step": 4 })).await;

    assert_eq!(zero_status, StatusCode::BAD_REQUEST);
    assert_eq!(zero_body["error"], "step_out_of_range");
    assert_eq!(high_status, StatusCode::BAD_REQUEST);
}

#[tokio::test(start_paused = true)]
async fn test_navigate_to_sentinel_finishes_walkthrough() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;

    common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 3 }),
    )
    .await;

    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["current_step"], 3);
    assert_eq!(view["finished"], true);
    assert_eq!(view["steps"][0]["active"], false);
    assert_eq!(view["steps"][1]["active"], false);
}

#[tokio::test(start_paused = true)]
async fn test_reset_clears_payloads_and_restarts_first_step() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    common::advance_ms(5600).await;
    common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 2 }),
    )
    .await;

    let (status, view) =
        common::post_json(&app, &session_uri(&session_id, "/reset"), &json!({})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["current_step"], 1);
    assert_eq!(view["steps"][0]["complete"], false);
    assert_eq!(view["steps"][0]["active"], true);
    assert_eq!(view["steps"][0]["current_phase"], "idle");
    assert_eq!(view["steps"][1]["active"], false);
}

#[tokio::test(start_paused = true)]
async fn test_suspend_stops_timers_and_resume_restarts_from_idle() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    common::advance_ms(2000).await;

    let (_, view) =
        common::post_json(&app, &session_uri(&session_id, "/suspend"), &json!({})).await;
    assert_eq!(view["suspended"], true);
    assert_eq!(view["steps"][0]["active"], false);

    common::advance_ms(10_000).await;
    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["steps"][0]["complete"], false);

    let (_, view) =
        common::post_json(&app, &session_uri(&session_id, "/resume"), &json!({})).await;
    assert_eq!(view["suspended"], false);
    assert_eq!(view["steps"][0]["current_phase"], "idle");

    common::advance_ms(5600).await;
    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["steps"][0]["complete"], true);
}

#[tokio::test(start_paused = true)]
async fn test_auto_advance_runs_whole_flow() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({ "auto_advance": true })).await;
    let uri = session_uri(&session_id, "");

    common::advance_ms(5600).await;
    let (_, view) = common::get_json(&app, &uri).await;
    assert_eq!(view["auto_advance"], true);
    assert_eq!(view["current_step"], 2);
    assert_eq!(view["steps"][1]["active"], true);

    common::advance_ms(5200).await;
    let (_, view) = common::get_json(&app, &uri).await;
    assert_eq!(view["current_step"], 3);
    assert_eq!(view["finished"], true);
    assert_eq!(view["steps"][1]["complete"], true);
}

#[tokio::test(start_paused = true)]
async fn test_server_default_auto_advance_can_be_overridden() {
    let app = common::build_test_app_with(WalkthroughSettings { auto_advance: true });
    let session_id = common::create_walkthrough(&app, json!({ "auto_advance": false })).await;

    common::advance_ms(5600).await;

    let (_, view) = common::get_json(&app, &session_uri(&session_id, "")).await;
    assert_eq!(view["auto_advance"], false);
    assert_eq!(view["current_step"], 1);
}

#[tokio::test(start_paused = true)]
async fn test_events_journal_every_progress_change() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    common::advance_ms(5600).await;
    common::post_json(
        &app,
        &session_uri(&session_id, "/navigate"),
        &json!({ "step": 2 }),
    )
    .await;
    common::post_json(&app, &session_uri(&session_id, "/reset"), &json!({})).await;

    let (status, events) = common::get_json(&app, &session_uri(&session_id, "/events")).await;

    assert_eq!(status, StatusCode::OK);
    let types: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        ["demo.step_completed", "demo.step_activated", "demo.reset"]
    );
    assert_eq!(events[0]["sequence_number"], 1);
    assert_eq!(events[2]["sequence_number"], 3);
}

#[tokio::test(start_paused = true)]
async fn test_delete_removes_session() {
    let app = common::build_test_app();
    let session_id = common::create_walkthrough(&app, json!({})).await;
    let uri = session_uri(&session_id, "");

    let (status, body) = common::delete_json(&app, &uri).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], session_id);

    let (status, body) = common::get_json(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");

    let (status, _) = common::delete_json(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test(start_paused = true)]
async fn test_oldest_session_is_evicted_past_the_limit() {
    // Arrange
    let app = common::build_test_app_limited(WalkthroughSettings::default(), 2);
    let oldest = common::create_walkthrough(&app, json!({})).await;

    // Act
    let mut newest = String::new();
    for _ in 0..5 {
        newest = common::create_walkthrough(&app, json!({})).await;
    }

    // Assert
    let (status, body) = common::get_json(&app, &session_uri(&oldest, "")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "session_not_found");
    let (status, _) = common::get_json(&app, &session_uri(&newest, "")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, health) = common::get_json(&app, "/health").await;
    assert_eq!(health["live_sessions"], 2);
}
