//! Common test utilities for the web service integration tests

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::{TestResponse, TestServer};
use plan_api_lib::{config::Config, web, web::state::AppState};

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Create a test server seeded with the default users
pub fn create_test_server() -> TestServer {
    create_test_server_with(Config::default())
}

/// Create a test server from an explicit configuration
pub fn create_test_server_with(config: Config) -> TestServer {
    let state = Arc::new(AppState::in_memory(config));
    TestServer::new(web::app(state)).expect("Failed to create test server")
}

/// Log in and return the session cookie value
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/login")
        .form(&[("username", username), ("password", password)])
        .await;
    assert_eq!(response.status_code(), 303);
    assert_eq!(location(&response), "/");

    response
        .maybe_cookie(SESSION_COOKIE)
        .expect("No session cookie")
        .value()
        .to_string()
}

/// Log in as the seeded administrator
pub async fn login_admin(server: &TestServer) -> String {
    login(server, "admin", "senha123").await
}

pub fn session(value: &str) -> cookie::Cookie<'static> {
    cookie::Cookie::new(SESSION_COOKIE, value.to_string())
}

pub fn location(response: &TestResponse) -> String {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
