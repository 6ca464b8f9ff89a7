use std::sync::Arc;

use actix_web::{test, web, App};
use serde_json::json;

use wander_api::routes;
use wander_api::storage::memory::InMemoryStore;
use wander_api::storage::KeyValueStore;

macro_rules! test_app {
    ($store:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($store.clone()))
                .configure(routes::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn signup_then_session_then_logout() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let app = test_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "demo123",
            "name": "Demo User"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let user: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(user["name"], "Demo User");
    assert_ne!(user["password"], "demo123");

    // The record is stored plaintext-serialized, unlike the trips blob.
    let raw = store.read("user").expect("user record should exist");
    assert!(raw.contains("demo@example.com"));

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::post().uri("/api/auth/logout").to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::get().uri("/api/auth/session").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 404);
}

#[actix_web::test]
async fn signup_validation_failures_are_bad_requests() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let app = test_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "tiny",
            "name": "Demo User"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "demo123"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 400);
}

#[actix_web::test]
async fn signin_with_wrong_password_is_unauthorized() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let app = test_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/auth/signup")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "demo123",
            "name": "Demo User"
        }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "wrong-pass"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), 401);

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": "demo@example.com",
            "password": "demo123"
        }))
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());
}

#[actix_web::test]
async fn signin_without_signup_derives_a_display_name() {
    let store: Arc<dyn KeyValueStore> = Arc::new(InMemoryStore::new());
    let app = test_app!(store);

    let req = test::TestRequest::post()
        .uri("/api/auth/signin")
        .set_json(json!({
            "email": "ravi@example.com",
            "password": "demo123"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
    let user: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(user["name"], "ravi");
}
