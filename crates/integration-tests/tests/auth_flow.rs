//! Integration tests for registration, login, and the shopkeeper dashboard.
//!
//! These tests create throwaway accounts with random emails, so they can run
//! repeatedly against the same database.

use reqwest::StatusCode;
use uuid::Uuid;

use pricelens_integration_tests::{base_url, client};

fn random_email() -> String {
    format!("it-{}@test.pricelens.dev", Uuid::new_v4())
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn register_and_login_as_customer() {
    let client = client();
    let base = base_url();
    let email = random_email();

    // Register
    let resp = client
        .post(format!("{base}/auth/register"))
        .form(&[
            ("email", email.as_str()),
            ("password", "correct horse battery"),
            ("full_name", "Integration Customer"),
            ("phone", ""),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/");

    // Log out
    let resp = client
        .post(format!("{base}/auth/logout"))
        .send()
        .await
        .expect("Failed to log out");
    assert_eq!(resp.status(), StatusCode::OK);

    // Log back in
    let resp = client
        .post(format!("{base}/auth/login"))
        .form(&[
            ("email", email.as_str()),
            ("password", "correct horse battery"),
        ])
        .send()
        .await
        .expect("Failed to log in");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("body");
    assert!(body.contains("Integration Customer"));
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn login_with_wrong_password_fails() {
    let client = client();
    let base = base_url();
    let email = random_email();

    let resp = client
        .post(format!("{base}/auth/register"))
        .form(&[
            ("email", email.as_str()),
            ("password", "a sound password"),
            ("full_name", "Integration User"),
            ("phone", ""),
            ("role", "customer"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .post(format!("{base}/auth/login"))
        .form(&[("email", email.as_str()), ("password", "wrong password")])
        .send()
        .await
        .expect("Failed to post login");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server"]
async fn shopkeeper_manages_shop_and_products() {
    let client = client();
    let base = base_url();
    let email = random_email();

    // Register as shopkeeper, landing on the dashboard
    let resp = client
        .post(format!("{base}/auth/register"))
        .form(&[
            ("email", email.as_str()),
            ("password", "a sound password"),
            ("full_name", "Integration Keeper"),
            ("phone", "+91 90000 00000"),
            ("role", "shopkeeper"),
        ])
        .send()
        .await
        .expect("Failed to register");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/dashboard");

    // Register the shop
    let resp = client
        .post(format!("{base}/dashboard/shop"))
        .form(&[
            ("name", "Integration Test Shop"),
            ("address", "Test Lane, Supela"),
            ("contact", "+91 90000 00000"),
            ("category", "Testing"),
            ("latitude", "21.21"),
            ("longitude", "81.31"),
        ])
        .send()
        .await
        .expect("Failed to save shop");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.url().path(), "/dashboard");

    // Add a product
    let resp = client
        .post(format!("{base}/dashboard/products"))
        .form(&[
            ("name", "Integration Widget"),
            ("category", "Testing"),
            ("price", "499.00"),
            ("description", ""),
            ("image_url", ""),
        ])
        .send()
        .await
        .expect("Failed to add product");
    assert_eq!(resp.status(), StatusCode::OK);

    // The dashboard now lists the product
    let resp = client
        .get(format!("{base}/dashboard"))
        .send()
        .await
        .expect("Failed to get dashboard");
    let body = resp.text().await.expect("body");
    assert!(body.contains("Integration Test Shop"));
    assert!(body.contains("Integration Widget"));

    // A negative price is rejected
    let resp = client
        .post(format!("{base}/dashboard/products"))
        .form(&[
            ("name", "Bad Widget"),
            ("category", "Testing"),
            ("price", "-5"),
            ("description", ""),
            ("image_url", ""),
        ])
        .send()
        .await
        .expect("Failed to post product");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Lat without lon is rejected
    let resp = client
        .post(format!("{base}/dashboard/shop"))
        .form(&[
            ("name", "Integration Test Shop"),
            ("address", "Test Lane, Supela"),
            ("contact", ""),
            ("category", "Testing"),
            ("latitude", "21.21"),
            ("longitude", ""),
        ])
        .send()
        .await
        .expect("Failed to post shop");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
