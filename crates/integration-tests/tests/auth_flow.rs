//! Integration tests for registration, login, and route guards.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p agrilink-server)
//!
//! Run with: cargo test -p agrilink-integration-tests -- --ignored

use reqwest::{Client, StatusCode, redirect::Policy};
use uuid::Uuid;

/// Base URL for the server (configurable via environment).
fn base_url() -> String {
    std::env::var("AGRILINK_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Client with a cookie store, following redirects.
fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// Client with a cookie store that does NOT follow redirects, so the
/// redirect targets themselves can be asserted.
fn manual_redirect_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .redirect(Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email per test run so reruns do not collide.
fn unique_email() -> String {
    format!("it-{}@example.com", Uuid::new_v4())
}

/// Register a fresh account and keep the session cookie on the client.
async fn register(client: &Client, email: &str) {
    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .form(&[
            ("name", "Integration Test"),
            ("email", email),
            ("password", "growing-season"),
            ("password_confirm", "growing-season"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert!(resp.status().is_success() || resp.status().is_redirection());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_register_login_logout_flow() {
    let client = client();
    let email = unique_email();

    register(&client, &email).await;

    // Registration logs the user in; the catalog should now render.
    let resp = client
        .get(format!("{}/soils", base_url()))
        .send()
        .await
        .expect("Failed to get soils");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Soil Types"));

    // Log out; the catalog should now bounce to login.
    let resp = client
        .post(format!("{}/auth/logout", base_url()))
        .send()
        .await
        .expect("Failed to logout");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let bare = manual_redirect_client();
    let resp = bare
        .get(format!("{}/soils", base_url()))
        .send()
        .await
        .expect("Failed to get soils");
    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/auth/login");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_with_wrong_password_rejected() {
    let client = manual_redirect_client();
    let email = unique_email();

    register(&client, &email).await;

    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", "wrong-password")])
        .send()
        .await
        .expect("Failed to post login");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=credentials"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_registration_rejected() {
    let client = manual_redirect_client();
    let email = unique_email();

    register(&client, &email).await;

    let resp = client
        .post(format!("{}/auth/register", base_url()))
        .form(&[
            ("name", "Imposter"),
            ("email", email.as_str()),
            ("password", "other-password"),
            ("password_confirm", "other-password"),
        ])
        .send()
        .await
        .expect("Failed to post register");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(location.contains("error=email_taken"));
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_fresh_account_cannot_reach_admin() {
    let client = manual_redirect_client();
    let email = unique_email();

    // New accounts always get the plain user role.
    register(&client, &email).await;

    let resp = client
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to get admin");

    assert!(resp.status().is_redirection());
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(location, "/");
}
