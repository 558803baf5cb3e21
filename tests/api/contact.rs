use chrono::{DateTime, Utc};
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::helpers::{RecordingNotifier, TestApp};

#[tokio::test]
async fn contact_returns_200_when_body_is_valid() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "project": "Build a thing"
    });

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response["success"], true);
    assert_eq!(response["submission"]["name"], "Ada");
    assert_eq!(response["submission"]["company"], serde_json::Value::Null);
    assert!(!response["submission"]["id"].as_str().unwrap().is_empty());
    assert_eq!(
        response["message"],
        "Message sent successfully! We will get back to you within 24 hours."
    );
}

#[tokio::test]
async fn contact_persists_the_new_submission() {
    let test_app = TestApp::spawn_app().await;
    let before = Utc::now();
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "company": "Analytical Engines Ltd",
        "project": "Build a thing"
    });

    let response: serde_json::Value = test_app.post_contact(&body).await.json().await.unwrap();
    let after = Utc::now();

    let listed = test_app.get_contact_submissions().await;
    let submissions = listed["submissions"].as_array().unwrap();

    assert_eq!(listed["success"], true);
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0]["id"], response["submission"]["id"]);
    assert_eq!(submissions[0]["email"], "ada@example.com");
    assert_eq!(submissions[0]["company"], "Analytical Engines Ltd");

    let created_at: DateTime<Utc> = submissions[0]["createdAt"].as_str().unwrap().parse().unwrap();

    assert!(before <= created_at && created_at <= after);
}

#[tokio::test]
async fn contact_ids_are_unique_across_submissions() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "project": "Build a thing"
    });
    let mut ids = HashSet::new();

    for _ in 0..5 {
        let response: serde_json::Value = test_app.post_contact(&body).await.json().await.unwrap();
        ids.insert(response["submission"]["id"].as_str().unwrap().to_string());
    }

    assert_eq!(ids.len(), 5);
}

#[tokio::test]
async fn contact_returns_400_when_body_require_field_is_missing() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (json!({}), "missing body parameters"),
        (
            json!({ "email": "ada@example.com", "project": "Build a thing" }),
            "missing name parameter",
        ),
        (
            json!({ "name": "Ada", "project": "Build a thing" }),
            "missing email parameter",
        ),
        (
            json!({ "name": "Ada", "email": "ada@example.com" }),
            "missing project parameter",
        ),
        (
            json!({ "name": "Ada", "email": "ada.example.com", "project": "Build a thing" }),
            "invalid email parameter",
        ),
        (
            json!({ "name": "Ada", "email": "ada@example.com", "project": "" }),
            "empty project parameter",
        ),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_contact(&invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );
    }

    let listed = test_app.get_contact_submissions().await;

    assert!(listed["submissions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn contact_accepts_whitespace_only_name_and_project() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({ "name": "   ", "email": "ada@example.com", "project": " " });

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response["submission"]["name"], "   ");
    assert_eq!(response["submission"]["project"], " ");
}

#[tokio::test]
async fn contact_rejects_email_with_surrounding_whitespace() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({ "name": "Ada", "email": " ada@example.com ", "project": "Build a thing" });

    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response["details"][0]["field"], "email");
    assert_eq!(response["details"][0]["message"], "Invalid email address");
}

#[tokio::test]
async fn contact_reports_every_invalid_field() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({ "name": "", "email": "bad", "project": "" });

    let response = test_app.post_contact(&body).await;

    assert_eq!(400, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();
    let details = response["details"].as_array().unwrap();
    let fields: Vec<&str> = details
        .iter()
        .map(|detail| detail["field"].as_str().unwrap())
        .collect();

    assert_eq!(response["success"], false);
    assert_eq!(response["error"], "Invalid form data");
    assert!(details.len() >= 3);
    assert!(fields.contains(&"name"));
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"project"));
}

#[tokio::test]
async fn contact_returns_400_when_body_is_not_json() {
    let test_app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .post(&format!("{}/api/contact", test_app.address))
        .header("Content-Type", "application/json")
        .body("{ not json")
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response["error"], "Invalid form data");
    assert_eq!(response["details"][0]["field"], "body");
}

#[tokio::test]
async fn contact_succeeds_when_email_credentials_are_missing() {
    // spawn_app clears the SMTP credentials, so every notification fails fast
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "project": "Build a thing"
    });

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn contact_succeeds_when_notification_fails() {
    let notifier = Arc::new(RecordingNotifier::failing());
    let test_app = TestApp::spawn_app_with_notifier(notifier.clone()).await;
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "project": "Build a thing"
    });

    let response = test_app.post_contact(&body).await;

    assert_eq!(200, response.status().as_u16());
    assert_eq!(notifier.sent().len(), 1);

    let listed = test_app.get_contact_submissions().await;

    assert_eq!(listed["submissions"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn contact_sends_one_notification_with_the_stored_submission() {
    let notifier = Arc::new(RecordingNotifier::default());
    let test_app = TestApp::spawn_app_with_notifier(notifier.clone()).await;
    let body = json!({
        "name": "Ada",
        "email": "ada@example.com",
        "project": "Build a thing"
    });

    let response: serde_json::Value = test_app.post_contact(&body).await.json().await.unwrap();
    let sent = notifier.sent();

    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].id.to_string(), response["submission"]["id"].as_str().unwrap());
    assert_eq!(sent[0].name.as_ref(), "Ada");
}

#[tokio::test]
async fn invalid_contact_sends_no_notification() {
    let notifier = Arc::new(RecordingNotifier::default());
    let test_app = TestApp::spawn_app_with_notifier(notifier.clone()).await;

    test_app.post_contact(&json!({ "name": "Ada" })).await;

    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn contact_submissions_are_listed_newest_first() {
    let test_app = TestApp::spawn_app().await;

    for name in ["First", "Second", "Third"] {
        let body = json!({
            "name": name,
            "email": "ada@example.com",
            "project": "Build a thing"
        });
        assert_eq!(200, test_app.post_contact(&body).await.status().as_u16());
    }

    let listed = test_app.get_contact_submissions().await;
    let created_at: Vec<DateTime<Utc>> = listed["submissions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|submission| submission["createdAt"].as_str().unwrap().parse().unwrap())
        .collect();

    assert_eq!(created_at.len(), 3);
    assert!(created_at.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn contact_rejects_unsupported_methods() {
    let test_app = TestApp::spawn_app().await;

    let response = reqwest::Client::new()
        .delete(&format!("{}/api/contact", test_app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(405, response.status().as_u16());

    let response: serde_json::Value = response.json().await.unwrap();

    assert_eq!(response["error"], "Method not allowed");
}
