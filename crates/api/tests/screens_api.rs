//! Page routes and utility screens: dashboard, editor, settings,
//! navigation, and the portrait workshop.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, expect_json, get, post_empty, send_json, settle};
use serde_json::json;

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn dashboard_lists_seeded_projects_and_menu() {
    let app = common::build_seeded_test_app();
    let dashboard = body_json(get(app.clone(), "/").await).await;

    let menu = dashboard["menu"].as_array().unwrap();
    assert_eq!(menu.len(), 4);
    assert_eq!(menu[0]["label"], "Dashboard");
    assert_eq!(menu[0]["screen"], "dashboard");

    let recent = dashboard["recent_projects"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["title"], "Ocean Mysteries");
    assert_eq!(recent[0]["status"], "draft");
    assert_eq!(recent[2]["title"], "The Last Explorer");
    assert_eq!(recent[2]["status"], "complete");

    assert_eq!(dashboard["navigation"]["active"], "dashboard");
    assert_eq!(dashboard["quick_start"].as_array().unwrap().len(), 3);
}

#[tokio::test(start_paused = true)]
async fn story_templates_are_served() {
    let app = common::build_test_app();
    let templates = body_json(get(app.clone(), "/api/v1/story/templates").await).await;
    let templates = templates.as_array().unwrap();
    assert_eq!(templates.len(), 4);
    assert_eq!(
        templates[0],
        "A space explorer discovers an ancient alien civilization"
    );
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn navigation_switches_screens_without_guards() {
    let app = common::build_test_app();

    // Jump straight into a stage screen with no current project.
    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/navigation",
        json!({"screen": "scene-creation", "story_step": 3}),
    )
    .await;
    let nav = expect_json(response, StatusCode::OK).await;
    assert_eq!(nav["active"], "scene-creation");
    assert_eq!(nav["story_step"], 3);
    assert!(nav["current_project"].is_null());

    // Step values outside the wizard range are clamped.
    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/navigation",
        json!({"story_step": 9}),
    )
    .await;
    let nav = expect_json(response, StatusCode::OK).await;
    assert_eq!(nav["story_step"], 3);
}

// ---------------------------------------------------------------------------
// Editor
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn editor_page_serves_the_mock_timeline() {
    let app = common::build_test_app();
    let editor = body_json(get(app.clone(), "/editor").await).await;

    assert_eq!(editor["track_length"], 15.0);
    let clips = editor["clips"].as_array().unwrap();
    assert_eq!(clips.len(), 4);
    assert_eq!(clips[0]["name"], "Scene 1");
    assert_eq!(clips[0]["track"], "video1");
    assert_eq!(clips[2]["track"], "video2");
    assert_eq!(clips[3]["track"], "audio");
    assert_eq!(clips[3]["width_percent"], 100.0);

    let transport = &editor["transport"];
    assert_eq!(transport["playing"], false);
    assert_eq!(transport["position"], 0.0);
    assert_eq!(transport["volume"], 50.0);
}

#[tokio::test(start_paused = true)]
async fn transport_updates_clamp_the_scrub_position() {
    let app = common::build_test_app();

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/editor/transport",
        json!({"playing": true, "position": 99.0, "volume": 30.0}),
    )
    .await;
    let transport = expect_json(response, StatusCode::OK).await;
    assert_eq!(transport["playing"], true);
    assert_eq!(transport["position"], 15.0);
    assert_eq!(transport["volume"], 30.0);

    // The update persists into the page view.
    let editor = body_json(get(app.clone(), "/editor").await).await;
    assert_eq!(editor["transport"]["playing"], true);
    assert_eq!(editor["transport"]["position"], 15.0);
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn settings_round_trip_reports_flags_not_keys() {
    let app = common::build_test_app();

    let summary = body_json(get(app.clone(), "/settings").await).await;
    assert_eq!(summary["gemini_key_set"], false);

    let response = send_json(
        app.clone(),
        Method::PUT,
        "/api/v1/settings",
        json!({"gemini_key": "sk-abc", "veo_key": "vk-123"}),
    )
    .await;
    let summary = expect_json(response, StatusCode::OK).await;
    assert_eq!(summary["gemini_key_set"], true);
    assert_eq!(summary["veo_key_set"], true);
    assert_eq!(summary["imagen3_key_set"], false);
    // Key material is never echoed back.
    assert!(summary.get("gemini_key").is_none());

    let summary = body_json(get(app.clone(), "/settings").await).await;
    assert_eq!(summary["gemini_key_set"], true);
}

// ---------------------------------------------------------------------------
// Portrait workshop
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn portrait_workshop_generates_prompt_and_image() {
    let app = common::build_test_app();

    let workshop = body_json(get(app.clone(), "/api/v1/portrait").await).await;
    assert_eq!(workshop["presets"].as_array().unwrap().len(), 4);
    assert!(workshop["prompt"].is_null());
    assert_eq!(workshop["prompt_state"], "idle");

    let response = send_json(
        app.clone(),
        Method::POST,
        "/api/v1/portrait/prompt",
        json!({"name": "Mira", "details": "a wandering cartographer"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = post_empty(app.clone(), "/api/v1/portrait/image").await;
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    settle().await;

    let workshop = body_json(get(app.clone(), "/api/v1/portrait").await).await;
    assert_eq!(workshop["prompt_state"], "ready");
    assert!(workshop["prompt"].as_str().unwrap().contains("Mira"));
    assert_eq!(workshop["image"], "/api/placeholder/400/400");
}
