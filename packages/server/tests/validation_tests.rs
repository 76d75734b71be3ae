//! Requests rejected before any storage access.
//!
//! These run against an unreachable database: a request that reached the
//! database would fail with 500, not the expected 4xx.

mod common;

use common::{donation_body, profile_body, TestApp};
use donor_core::kernel::test_dependencies::MockSmsService;
use donor_core::server::middleware::OtpRateLimit;
use donor_core::server::HttpSettings;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_profile_without_token() {
    let app = TestApp::without_database();

    let response = app.client.get("/api/user/profile").await;
    assert_eq!(response.status, 401);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.error(), "Token is missing");
}

#[tokio::test]
async fn test_invalid_token_rejected() {
    let app = TestApp::without_database();

    let response = app
        .client
        .with_token("not-a-token")
        .post("/api/donate", donation_body(10.0, "pay_x"))
        .await;
    assert_eq!(response.status, 401);
    assert_eq!(response.error(), "Token is invalid");
}

#[tokio::test]
async fn test_empty_family_rejected() {
    let app = TestApp::without_database();
    let client = app.client.with_token(&app.token_for("9876543210"));

    let mut body = profile_body();
    body["familyMembers"] = json!([]);
    let response = client.put("/api/user/profile", body).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.error(), "At least one family member is required");
}

#[tokio::test]
async fn test_missing_profile_field_named() {
    let app = TestApp::without_database();
    let client = app.client.with_token(&app.token_for("9876543210"));

    let mut body = profile_body();
    body.as_object_mut().unwrap().remove("address");
    let response = client.put("/api/user/profile", body).await;
    assert_eq!(response.status, 400);
    assert_eq!(response.error(), "Missing required field: address");
}

#[tokio::test]
async fn test_invalid_donation_amount() {
    let app = TestApp::without_database();
    let client = app.client.with_token(&app.token_for("9876543210"));

    for amount in [0.0, -50.0, 10.001] {
        let response = client
            .post("/api/donate", donation_body(amount, "pay_1"))
            .await;
        assert_eq!(response.status, 400, "{amount}");
        assert_eq!(response.error(), "Invalid donation amount");
    }
}

#[tokio::test]
async fn test_invalid_kyc_rejected() {
    let app = TestApp::without_database();
    let client = app.client.with_token(&app.token_for("9876543210"));

    let response = client
        .post("/api/kyc", json!({ "panNumber": "ABCDE1234F" }))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(
        response.error(),
        "PAN, Aadhaar numbers and Date of Birth are required"
    );
}

#[tokio::test]
async fn test_malformed_json_uses_error_envelope() {
    let app = TestApp::without_database();

    let response = app.client.post_raw("/api/send-otp", "{not json").await;
    assert_eq!(response.status, 400);
    assert_eq!(response.body["success"], false);
    assert!(response.error().starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_invalid_phone_rejected() {
    let app = TestApp::without_database();

    for phone in ["12345", "98765432109", "98765abcde"] {
        let response = app
            .client
            .post("/api/send-otp", json!({ "phoneNumber": phone }))
            .await;
        assert_eq!(response.status, 400, "{phone}");
        assert_eq!(response.error(), "Invalid Indian phone number (10 digits)");
    }
    assert!(app.sms.sent_messages().is_empty());
}

#[tokio::test]
async fn test_verify_requires_both_fields() {
    let app = TestApp::without_database();

    let response = app
        .client
        .post("/api/verify-otp", json!({ "phoneNumber": "9876543210" }))
        .await;
    assert_eq!(response.status, 400);
    assert_eq!(response.error(), "Phone number and OTP are required");
}

#[tokio::test]
async fn test_delivery_failure_is_500() {
    let app = TestApp::build(
        common::unreachable_pool(),
        Arc::new(MockSmsService::failing()),
        HttpSettings::default(),
    );

    let response = app
        .client
        .post("/api/send-otp", json!({ "phoneNumber": "9876543210" }))
        .await;
    assert_eq!(response.status, 500);
    assert_eq!(response.error(), "Failed to send OTP. Please try again.");
}

#[tokio::test]
async fn test_send_otp_rate_limited_per_ip() {
    let app = TestApp::build(
        common::unreachable_pool(),
        Arc::new(MockSmsService::new()),
        HttpSettings {
            otp_rate_limit: OtpRateLimit {
                burst: 2,
                period: Duration::from_secs(3600),
            },
            ..HttpSettings::default()
        },
    );
    let body = json!({ "phoneNumber": "9876543210" });

    assert_eq!(app.client.post("/api/send-otp", body.clone()).await.status, 200);
    assert_eq!(app.client.post("/api/send-otp", body.clone()).await.status, 200);

    let limited = app.client.post("/api/send-otp", body.clone()).await;
    assert_eq!(limited.status, 429);
    assert_eq!(limited.body["success"], false);
    assert_eq!(
        limited.error(),
        "Too many OTP requests from this IP, please try again later"
    );

    let other_ip = app
        .client
        .from_ip("198.51.100.20")
        .post("/api/send-otp", body)
        .await;
    assert_eq!(other_ip.status, 200);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let app = TestApp::without_database();

    let response = app.client.get("/health").await;
    assert_eq!(response.status, 503);
    assert_eq!(response.body["status"], "unhealthy");
    assert_eq!(response.body["database"]["status"], "error");
}
