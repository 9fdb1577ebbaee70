use crate::helpers::spawn_app;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn contacts_returns_an_empty_list_when_nothing_is_stored() {
    let app = spawn_app().await;

    let response = app.get_contacts().await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["contacts"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn contacts_returns_all_stored_submissions() {
    let app = spawn_app().await;
    Mock::given(path("/emails"))
        .and(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "msg_1"})),
        )
        .expect(2)
        .mount(&app.email_server)
        .await;

    app.post_contact(&serde_json::json!({
        "name": "Test User",
        "email": "test@example.com",
        "company": "Test Co",
        "message": "Hello"
    }))
    .await;
    app.post_contact(&serde_json::json!({
        "name": "Second User",
        "email": "second@example.com",
        "message": "Hi there"
    }))
    .await;

    let response = app.get_contacts().await;

    assert_eq!(200, response.status().as_u16());
    let body: serde_json::Value = response.json().await.unwrap();
    let contacts = body["contacts"].as_array().unwrap();
    assert_eq!(contacts.len(), 2);

    let first = &contacts[0];
    assert_eq!(first["name"], "Test User");
    assert_eq!(first["email"], "test@example.com");
    assert_eq!(first["company"], "Test Co");
    assert_eq!(first["message"], "Hello");
    assert_eq!(first["notification_email"], app.support_email.as_str());
    // `created_at` is stamped server-side; the row id never leaves the store.
    assert!(!first["created_at"].as_str().unwrap().is_empty());
    assert!(first.get("id").is_none());

    let second = &contacts[1];
    assert_eq!(second["name"], "Second User");
    assert_eq!(second["company"], "");
}
