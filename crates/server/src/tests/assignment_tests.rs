// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use axum::http::StatusCode;
use serde_json::{Value, json};

use super::{Cafe, id_of, send};

#[tokio::test]
async fn test_auto_assign_staffs_template_with_both_servers() {
    let cafe: Cafe = Cafe::open().await;
    let e1: i64 = cafe.hire("e1", cafe.server_role).await;
    let e2: i64 = cafe.hire("e2", cafe.server_role).await;
    let e3: i64 = cafe.hire("e3", cafe.cook_role).await;
    cafe.shift(e1, "2026-01-01T08:00:00Z", "2026-01-01T18:00:00Z").await;
    cafe.shift(e2, "2026-01-02T08:00:00Z", "2026-01-02T12:00:00Z").await;
    cafe.template(
        "2026-01-12T09:00:00Z",
        "2026-01-12T17:00:00Z",
        json!([{ "role_id": cafe.server_role, "quantity": 2 }]),
    )
    .await;

    let (status, body) =
        send(&cafe.app, "POST", "/shifts/auto_assign", Some(cafe.manager_id), None).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    let mut assigned: Vec<i64> = body["created"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| id_of(s, "employee_id"))
        .collect();
    assigned.sort_unstable();
    assert_eq!(assigned, vec![e1, e2]);
    assert!(!assigned.contains(&e3));

    let (_, templates) =
        send(&cafe.app, "GET", "/shift_templates", Some(cafe.manager_id), None).await;
    assert_eq!(templates["templates"], json!([]));
}

#[tokio::test]
async fn test_auto_assign_prefers_the_least_loaded() {
    let cafe: Cafe = Cafe::open().await;
    let e1: i64 = cafe.hire("e1", cafe.server_role).await;
    let e2: i64 = cafe.hire("e2", cafe.server_role).await;
    cafe.shift(e1, "2026-01-01T08:00:00Z", "2026-01-01T18:00:00Z").await;
    cafe.shift(e2, "2026-01-02T08:00:00Z", "2026-01-02T12:00:00Z").await;
    cafe.template(
        "2026-01-12T09:00:00Z",
        "2026-01-12T17:00:00Z",
        json!([{ "role_id": cafe.server_role, "quantity": 1 }]),
    )
    .await;

    let (_, body) =
        send(&cafe.app, "POST", "/shifts/auto_assign", Some(cafe.manager_id), None).await;

    assert_eq!(body["created"][0]["employee_id"], e2);
}

#[tokio::test]
async fn test_missing_cooks_report_the_role_and_template() {
    let cafe: Cafe = Cafe::open().await;
    cafe.hire("e1", cafe.server_role).await;
    let template: Value = cafe
        .template(
            "2026-01-12T09:00:00Z",
            "2026-01-12T17:00:00Z",
            json!([{ "role_id": cafe.cook_role, "quantity": 1 }]),
        )
        .await;

    let (status, body) =
        send(&cafe.app, "POST", "/shifts/auto_assign", Some(cafe.manager_id), None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "insufficient_role");
    assert_eq!(body["role"], "Cook");
    assert_eq!(body["template_id"], template["template_id"]);
}

#[tokio::test]
async fn test_employees_cannot_auto_assign() {
    let cafe: Cafe = Cafe::open().await;
    let e1: i64 = cafe.hire("e1", cafe.server_role).await;

    let (status, body) = send(&cafe.app, "POST", "/shifts/auto_assign", Some(e1), None).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "forbidden");
}

#[tokio::test]
async fn test_reversed_template_is_bad_request() {
    let cafe: Cafe = Cafe::open().await;

    let (status, body) = send(
        &cafe.app,
        "POST",
        "/shift_templates",
        Some(cafe.manager_id),
        Some(json!({
            "start_time": "2026-01-12T17:00:00Z",
            "end_time": "2026-01-12T09:00:00Z",
            "requirements": [{ "role_id": cafe.server_role, "quantity": 1 }],
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "invalid_input");
}

#[tokio::test]
async fn test_shift_crud_over_http() {
    let cafe: Cafe = Cafe::open().await;
    let e1: i64 = cafe.hire("e1", cafe.server_role).await;
    let e2: i64 = cafe.hire("e2", cafe.server_role).await;
    let shift: Value = cafe
        .shift(e1, "2026-01-12T08:00:00Z", "2026-01-12T16:00:00Z")
        .await;
    let uri: String = format!("/shifts/{}", id_of(&shift, "shift_id"));

    let (status, updated) = send(
        &cafe.app,
        "PATCH",
        &uri,
        Some(cafe.manager_id),
        Some(json!({ "employee_id": e2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["employee_id"], e2);

    let (_, mine) = send(&cafe.app, "GET", "/shifts", Some(e2), None).await;
    assert_eq!(mine["shifts"].as_array().unwrap().len(), 1);

    let (status, _) = send(&cafe.app, "DELETE", &uri, Some(cafe.manager_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&cafe.app, "DELETE", &uri, Some(cafe.manager_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
