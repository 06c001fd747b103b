//! Integration tests for admin record management.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p agrilink-server)
//! - An admin account, with its credentials in `AGRILINK_TEST_ADMIN_EMAIL`
//!   and `AGRILINK_TEST_ADMIN_PASSWORD` (promote one via
//!   `cargo run -p agrilink-cli -- admin promote -e <email>`)
//!
//! Run with: cargo test -p agrilink-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use uuid::Uuid;

fn base_url() -> String {
    std::env::var("AGRILINK_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

fn admin_credentials() -> (String, String) {
    let email =
        std::env::var("AGRILINK_TEST_ADMIN_EMAIL").expect("AGRILINK_TEST_ADMIN_EMAIL not set");
    let password = std::env::var("AGRILINK_TEST_ADMIN_PASSWORD")
        .expect("AGRILINK_TEST_ADMIN_PASSWORD not set");
    (email, password)
}

/// Log in as the configured admin and return the client.
async fn admin_client() -> Client {
    let client = Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client");

    let (email, password) = admin_credentials();
    let resp = client
        .post(format!("{}/auth/login", base_url()))
        .form(&[("email", email.as_str()), ("password", password.as_str())])
        .send()
        .await
        .expect("Failed to login as admin");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    client
}

/// Extract the id of a soil row from the management page by its unique type
/// name. The row's edit link follows the name cell and carries the id as
/// `?edit=<id>`.
fn find_record_id(body: &str, marker: &str) -> Option<String> {
    let row_start = body.find(marker)?;
    let link_start = body[row_start..].find("?edit=")? + row_start + "?edit=".len();
    let end = body[link_start..].find('"')? + link_start;
    Some(body[link_start..end].to_string())
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin credentials"]
async fn test_admin_create_edit_delete_soil() {
    let client = admin_client().await;
    let marker = format!("it-soil-{}", Uuid::new_v4());

    // Create.
    let resp = client
        .post(format!("{}/admin/soils", base_url()))
        .form(&[
            ("soil_type", marker.as_str()),
            ("ph", "6.4"),
            ("nutrients", "Test nutrients"),
            ("suitable_crops", "Wheat, Maize"),
            ("characteristics", "Created by integration test"),
        ])
        .send()
        .await
        .expect("Failed to create soil");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    // It shows up on the management page; grab its id from the edit link.
    let body = client
        .get(format!("{}/admin/soils", base_url()))
        .send()
        .await
        .expect("Failed to get soils page")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains(&marker));
    let id = find_record_id(&body, &marker).expect("Could not find created record id");

    // Update only some fields; the rest must survive.
    let resp = client
        .post(format!("{}/admin/soils/{id}", base_url()))
        .form(&[
            ("soil_type", marker.as_str()),
            ("ph", "7.1"),
            ("nutrients", "Updated nutrients"),
            ("suitable_crops", "Wheat, Maize"),
            ("characteristics", "Created by integration test"),
        ])
        .send()
        .await
        .expect("Failed to update soil");
    assert!(resp.status().is_success() || resp.status().is_redirection());

    let body = client
        .get(format!("{}/admin/soils?edit={id}", base_url()))
        .send()
        .await
        .expect("Failed to get edit form")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains("7.1"));

    // Delete, twice: the second must succeed too.
    for _ in 0..2 {
        let resp = client
            .post(format!("{}/admin/soils/{id}/delete", base_url()))
            .send()
            .await
            .expect("Failed to delete soil");
        assert!(resp.status().is_success() || resp.status().is_redirection());
    }

    let body = client
        .get(format!("{}/admin/soils", base_url()))
        .send()
        .await
        .expect("Failed to get soils page")
        .text()
        .await
        .expect("Failed to read response");
    assert!(!body.contains(&marker));
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin credentials"]
async fn test_admin_soil_form_rejects_bad_ph() {
    let client = admin_client().await;

    let resp = client
        .post(format!("{}/admin/soils", base_url()))
        .form(&[
            ("soil_type", "Bad pH Soil"),
            ("ph", "acidic"),
            ("nutrients", ""),
            ("suitable_crops", ""),
            ("characteristics", ""),
        ])
        .send()
        .await
        .expect("Failed to post soil");

    // The page re-renders with the error and the submitted values intact.
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("pH must be a number."));
    assert!(body.contains("Bad pH Soil"));
}

#[tokio::test]
#[ignore = "Requires running server, database, and admin credentials"]
async fn test_admin_dashboard_shows_counts() {
    let client = admin_client().await;

    let resp = client
        .get(format!("{}/admin", base_url()))
        .send()
        .await
        .expect("Failed to get dashboard");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Soil types"));
    assert!(body.contains("Distributors"));
    assert!(body.contains("Users"));
}
