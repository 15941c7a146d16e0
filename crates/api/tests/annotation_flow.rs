//! Integration tests for the two-stage submission flow, including the
//! acceptance scenarios for correct, incorrect, and failed-append paths.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, build_test_app_with, post_json, snapshot, start_session};
use serde_json::json;

use facepair_core::ImageResolver;
use facepair_sheets::SheetWriter;

// ---------------------------------------------------------------------------
// Scenario: correct answer is appended immediately, no follow-up stage
// ---------------------------------------------------------------------------

#[tokio::test]
async fn correct_answer_appends_one_row_and_advances() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    // Pair 0 is truly "same".
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "clearly matches" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["correct"], true);
    assert_eq!(data["done"], false);
    assert!(data.get("reveal").is_none());

    // Exactly one row, complete and correct.
    let rows = app.sheet().rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row[1], "alice_01");
    assert_eq!(row[2], 0);
    assert_eq!(row[5], "same");
    assert_eq!(row[7], "same");
    assert_eq!(row[8], "clearly matches");
    assert_eq!(row[9], true);
    assert_eq!(row[10], "");

    // The session moved on to the next pair.
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["completed"], 1);
    assert_eq!(snap["stage"], "awaiting_initial");
    assert_eq!(snap["pair"]["pair_index"], 1);
}

// ---------------------------------------------------------------------------
// Scenario: wrong answer goes through the follow-up stage, then one row
// ---------------------------------------------------------------------------

#[tokio::test]
async fn wrong_answer_requires_followup_before_row_is_written() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    // Pair 0 is truly "same"; answer "different".
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "different", "explanation": "looks distinct" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = &body_json(response).await["data"];
    assert_eq!(data["correct"], false);
    assert_eq!(data["reveal"]["ground_truth"], "same");
    assert_eq!(data["reveal"]["decision"], "different");

    // Nothing written yet; the session is waiting on the reflection.
    assert!(app.sheet().is_empty());
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["stage"], "awaiting_followup");
    assert_eq!(snap["pair"]["pair_index"], 0);
    assert_eq!(snap["completed"], 0);
    assert_eq!(snap["reveal"]["ground_truth"], "same");

    // Submit the reflection: exactly one complete row appears.
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/reflection"),
        json!({ "explanation": "reconsidered" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let rows = app.sheet().rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row[7], "different");
    assert_eq!(row[8], "looks distinct");
    assert_eq!(row[9], false);
    assert_eq!(row[10], "reconsidered");

    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["completed"], 1);
    assert_eq!(snap["stage"], "awaiting_initial");
    assert_eq!(snap["pair"]["pair_index"], 1);
}

// ---------------------------------------------------------------------------
// Test: validation failures never advance and never write
// ---------------------------------------------------------------------------

#[tokio::test]
async fn empty_explanation_is_rejected_without_side_effects() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "   " }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");

    assert!(app.sheet().is_empty());
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["completed"], 0);
    assert_eq!(snap["stage"], "awaiting_initial");
    assert_eq!(snap["pair"]["pair_index"], 0);
}

#[tokio::test]
async fn missing_decision_is_rejected() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "", "explanation": "clearly matches" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("same person or different people"));
    assert!(app.sheet().is_empty());
}

#[tokio::test]
async fn unknown_decision_value_is_rejected() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "maybe", "explanation": "clearly matches" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.sheet().is_empty());
}

#[tokio::test]
async fn empty_reflection_is_rejected_and_stage_kept() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "different", "explanation": "looks distinct" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/reflection"),
        json!({ "explanation": "" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(app.sheet().is_empty());
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["stage"], "awaiting_followup");
    assert_eq!(snap["pair"]["pair_index"], 0);
}

// ---------------------------------------------------------------------------
// Test: stage misuse is rejected
// ---------------------------------------------------------------------------

#[tokio::test]
async fn reflection_without_pending_followup_is_rejected() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/reflection"),
        json!({ "explanation": "reconsidered" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.sheet().is_empty());
}

#[tokio::test]
async fn second_answer_while_followup_pending_is_rejected() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "different", "explanation": "looks distinct" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "changed my mind" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.sheet().is_empty());
}

// ---------------------------------------------------------------------------
// Scenario: failed append leaves the session untouched
// ---------------------------------------------------------------------------

#[tokio::test]
async fn failed_append_does_not_advance_session() {
    // The disabled writer fails every append, standing in for a network
    // failure against the real sheet.
    let app = build_test_app_with(
        SheetWriter::Disabled,
        ImageResolver::RemoteUrl(common::TEST_IMAGE_BASE.to_string()),
    );
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "clearly matches" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_json(response).await;
    assert_eq!(json["code"], "SHEET_WRITE_FAILED");

    // Same pair, same stage: the annotator can simply resubmit.
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["completed"], 0);
    assert_eq!(snap["stage"], "awaiting_initial");
    assert_eq!(snap["pair"]["pair_index"], 0);
}

#[tokio::test]
async fn failed_append_during_reflection_keeps_followup_stage() {
    let app = build_test_app_with(
        SheetWriter::Disabled,
        ImageResolver::RemoteUrl(common::TEST_IMAGE_BASE.to_string()),
    );
    let session_id = start_session(&app.router, "alice_01").await;

    // The wrong answer itself writes nothing, so it succeeds.
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "different", "explanation": "looks distinct" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/reflection"),
        json!({ "explanation": "reconsidered" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    // The retained initial answer is still there for the resubmit.
    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["stage"], "awaiting_followup");
    assert_eq!(snap["reveal"]["decision"], "different");
    assert_eq!(snap["pair"]["pair_index"], 0);
}

// ---------------------------------------------------------------------------
// Test: finishing every pair reports done
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completing_all_pairs_reports_done() {
    let app = build_test_app();
    let session_id = start_session(&app.router, "alice_01").await;

    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "clearly matches" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["done"], false);

    // Pair 1 is truly "different".
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "different", "explanation": "jawline differs" }),
    )
    .await;
    assert_eq!(body_json(response).await["data"]["done"], true);

    let snap = snapshot(&app.router, &session_id).await;
    assert_eq!(snap["done"], true);
    assert_eq!(snap["completed"], 2);
    assert!(snap.get("pair").is_none());

    // Submitting past the end is rejected.
    let response = post_json(
        &app.router,
        &format!("/api/v1/sessions/{session_id}/answers"),
        json!({ "decision": "same", "explanation": "one more" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.sheet().len(), 2);
}
