// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP-level tests driving the router with `oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod assignment_tests;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use flexirota::FixedClock;
use flexirota_api::AssignmentPolicy;
use flexirota_persistence::Persistence;
use serde_json::{Value, json};
use std::sync::Arc;
use time::macros::datetime;
use tokio::sync::Mutex;
use tower::ServiceExt;

use crate::session::USER_ID_HEADER;
use crate::{AppState, build_router};

/// Helper to create test app state with in-memory persistence and a
/// clock fixed at 2026-01-05 08:00 UTC.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        clock: Arc::new(FixedClock::new(datetime!(2026-01-05 08:00 UTC))),
        policy: AssignmentPolicy::default(),
    }
}

/// Sends one request and returns the status and the decoded JSON body
/// (`Value::Null` for empty bodies).
async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header(USER_ID_HEADER, id.to_string());
    }
    let request: Request<Body> = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status: StatusCode = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value: Value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn id_of(value: &Value, field: &str) -> i64 {
    value[field].as_i64().unwrap()
}

/// A manager with an organisation, a Server and a Cook role.
struct Cafe {
    app: Router,
    manager_id: i64,
    organisation_id: i64,
    server_role: i64,
    cook_role: i64,
}

impl Cafe {
    async fn open() -> Self {
        let app: Router = build_router(create_test_app_state());
        let (_, manager) = send(
            &app,
            "POST",
            "/users",
            None,
            Some(json!({ "username": "manager", "name": "Mia Manager", "role": "manager" })),
        )
        .await;
        let manager_id: i64 = id_of(&manager, "user_id");

        let (status, organisation) = send(
            &app,
            "POST",
            "/organisations",
            Some(manager_id),
            Some(json!({ "name": "Harbour Cafe" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let organisation_id: i64 = id_of(&organisation, "organisation_id");

        let mut role_ids: Vec<i64> = Vec::new();
        for name in ["Server", "Cook"] {
            let (status, role) = send(
                &app,
                "POST",
                "/roles",
                Some(manager_id),
                Some(json!({ "name": name })),
            )
            .await;
            assert_eq!(status, StatusCode::CREATED);
            role_ids.push(id_of(&role, "role_id"));
        }

        Self {
            app,
            manager_id,
            organisation_id,
            server_role: role_ids[0],
            cook_role: role_ids[1],
        }
    }

    /// Registers an employee and adopts them with the given role title.
    async fn hire(&self, username: &str, role_id: i64) -> i64 {
        let (status, user) = send(
            &self.app,
            "POST",
            "/users",
            None,
            Some(json!({ "username": username, "name": username, "role": "employee" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let user_id: i64 = id_of(&user, "user_id");

        let (status, adopted) = send(
            &self.app,
            "PATCH",
            &format!("/users/{user_id}"),
            Some(self.manager_id),
            Some(json!({ "organisation_id": self.organisation_id, "role_title_id": role_id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{adopted}");
        user_id
    }

    async fn shift(&self, employee_id: i64, start: &str, end: &str) -> Value {
        let (status, shift) = send(
            &self.app,
            "POST",
            "/shifts",
            Some(self.manager_id),
            Some(json!({ "employee_id": employee_id, "start_time": start, "end_time": end })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{shift}");
        shift
    }

    async fn template(&self, start: &str, end: &str, requirements: Value) -> Value {
        let (status, template) = send(
            &self.app,
            "POST",
            "/shift_templates",
            Some(self.manager_id),
            Some(json!({ "start_time": start, "end_time": end, "requirements": requirements })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{template}");
        template
    }
}
