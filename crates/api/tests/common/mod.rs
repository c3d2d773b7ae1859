#![allow(dead_code)]

use api::app::build_router;
use api::auth::AuthConfig;
use api::config::HttpConfig;
use api::AppState;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use infra::memory::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-secret-do-not-use-in-production";

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: TEST_SECRET.to_string(),
        access_token_expiration_minutes: 60,
        bcrypt_cost: 4,
    }
}

/// The real router over an in-memory store.
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: MemoryStore,
}

impl TestApp {
    pub fn new() -> Self {
        let store = MemoryStore::new();
        let state =
            AppState::new(store.repos(), auth_config()).expect("failed to build app state");
        let http = HttpConfig {
            auth_rate_limit: false,
            ..HttpConfig::default()
        };

        Self {
            router: build_router(state.clone(), &http),
            state,
            store,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// POSTs `body` and returns the generated id, failing the test on anything but 200.
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let (status, created) = self.post(uri, body).await;
        assert_eq!(status, StatusCode::OK, "create {uri} failed: {created}");
        created["id"].as_i64().unwrap()
    }

    /// Registers a user and returns `(token, user id)`.
    pub async fn register(&self, username: &str, role: &str) -> (String, i64) {
        let (status, body) = self
            .post(
                "/api/auth/register",
                json!({
                    "username": username,
                    "email": format!("{username}@dojang.test"),
                    "password": format!("{username}-password"),
                    "role": role,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }
}

impl TestApp {
    /// Creates an admin the way startup bootstrap does, then logs in as it.
    pub async fn seed_admin(&self, username: &str) -> (String, i64) {
        let password = format!("{username}-password");
        self.state
            .auth()
            .ensure_admin(username, &format!("{username}@dojang.test"), &password)
            .await
            .unwrap();

        let (status, body) = self
            .post(
                "/api/auth/login",
                json!({ "username": username, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "admin login failed: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_i64().unwrap(),
        )
    }
}

pub fn club(name: &str) -> Value {
    json!({ "name": name, "location": "Antwerp" })
}

pub fn participant(name: &str, club_id: Option<i64>) -> Value {
    json!({
        "name": name,
        "age": 16,
        "gender": "FEMALE",
        "skillLevel": "GREEN_BELT",
        "clubId": club_id,
    })
}

pub fn tournament(name: &str, date: &str) -> Value {
    json!({
        "name": name,
        "location": "Ghent",
        "date": date,
        "numberOfMats": 4,
        "categories": [
            { "gender": "FEMALE", "minAge": 14, "maxAge": 17, "skillLevel": "GREEN_BELT" }
        ],
    })
}

pub fn bout(tournament_id: i64, mat: i32, order: i32, p1: i64, p2: i64, round: &str) -> Value {
    json!({
        "matchId": format!("mat{mat}-match{order}"),
        "matNumber": mat,
        "matchOrder": order,
        "participant1Id": p1,
        "participant2Id": p2,
        "round": round,
        "tournamentId": tournament_id,
        "scheduledTime": "2025-05-01T10:30:00",
    })
}
