//! Handler tests backed by a mocked user repository.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{App, test};
use chrono::{TimeZone, Utc};
use mockall::predicate::eq;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{
    MockBadgeRepository, MockCardRepository, MockFollowerRepository, MockFriendRepository,
    MockNotificationRepository, MockTemplateRepository, MockUserBadgeRepository,
    MockUserRepository, MockUserTokenRepository, StoreError,
};
use crate::domain::{Password, Storage};

fn storage_with_users(users: MockUserRepository) -> Storage {
    Storage {
        users: Arc::new(users),
        user_tokens: Arc::new(MockUserTokenRepository::new()),
        templates: Arc::new(MockTemplateRepository::new()),
        cards: Arc::new(MockCardRepository::new()),
        friends: Arc::new(MockFriendRepository::new()),
        followers: Arc::new(MockFollowerRepository::new()),
        notifications: Arc::new(MockNotificationRepository::new()),
        badges: Arc::new(MockBadgeRepository::new()),
        user_badges: Arc::new(MockUserBadgeRepository::new()),
    }
}

#[fixture]
fn stored_user() -> User {
    let mut user = User::new("ada", "ada@example.com", Password::from_hash("$argon2id$stub"));
    user.id = 7;
    user.verified = true;
    user.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    user.updated_at = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    user
}

fn expect_lookup(users: &mut MockUserRepository, user: User) {
    users
        .expect_get_by_id()
        .with(eq(user.id))
        .times(1)
        .returning(move |_| Ok(user.clone()));
}

async fn send(users: MockUserRepository, request: test::TestRequest) -> (StatusCode, Value) {
    let state = web::Data::new(HttpState::new(storage_with_users(users)));
    let app = test::init_service(
        App::new().app_data(state).service(
            web::scope("/v1")
                .service(get_user)
                .service(update_user)
                .service(delete_user),
        ),
    )
    .await;

    let res = test::call_service(&app, request.to_request()).await;
    let status = res.status();
    let body = test::read_body(res).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, value)
}

#[rstest]
#[actix_web::test]
async fn get_returns_the_user_without_password(stored_user: User) {
    let mut users = MockUserRepository::new();
    expect_lookup(&mut users, stored_user);

    let (status, body) = send(users, test::TestRequest::get().uri("/v1/users/7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(7));
    assert_eq!(body["username"], json!("ada"));
    assert!(body.get("password").is_none());
}

#[rstest]
#[actix_web::test]
async fn get_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .with(eq(404))
        .times(1)
        .returning(|_| Err(StoreError::not_found()));

    let (status, body) = send(users, test::TestRequest::get().uri("/v1/users/404")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
}

#[rstest]
#[actix_web::test]
async fn non_numeric_ids_are_rejected_before_the_store() {
    let users = MockUserRepository::new();

    let (status, body) = send(users, test::TestRequest::get().uri("/v1/users/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!("user_id"));
}

#[rstest]
#[actix_web::test]
async fn store_timeouts_surface_as_unavailable() {
    let mut users = MockUserRepository::new();
    users
        .expect_get_by_id()
        .returning(|_| Err(StoreError::timeout("users.get_by_id")));

    let (status, body) = send(users, test::TestRequest::get().uri("/v1/users/7")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["code"], json!("service_unavailable"));
}

#[rstest]
#[actix_web::test]
async fn patch_applies_changes_and_returns_new_timestamp(stored_user: User) {
    let refreshed = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
    let previous = stored_user.updated_at;
    let mut users = MockUserRepository::new();
    expect_lookup(&mut users, stored_user);
    users
        .expect_update()
        .withf(move |user| {
            user.username == "grace" && user.email == "ada@example.com" && user.updated_at == previous
        })
        .times(1)
        .returning(move |user| {
            user.updated_at = refreshed;
            Ok(())
        });

    let request = test::TestRequest::patch()
        .uri("/v1/users/7")
        .set_json(json!({ "username": "grace" }));
    let (status, body) = send(users, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], json!("grace"));
    assert_eq!(body["email"], json!("ada@example.com"));
    assert_eq!(body["updated_at"], json!("2024-02-01T12:00:00Z"));
}

#[rstest]
#[case(json!({ "username": "x".repeat(36) }), "username")]
#[case(json!({ "email": "not-an-email" }), "email")]
#[case(json!({ "email": "a@b@c" }), "email")]
#[actix_web::test]
async fn patch_rejects_invalid_payloads(
    stored_user: User,
    #[case] payload: Value,
    #[case] field: &str,
) {
    let mut users = MockUserRepository::new();
    expect_lookup(&mut users, stored_user);
    users.expect_update().never();

    let request = test::TestRequest::patch().uri("/v1/users/7").set_json(payload);
    let (status, body) = send(users, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], json!(field));
}

#[rstest]
#[actix_web::test]
async fn patch_accepts_a_username_at_the_limit(stored_user: User) {
    let mut users = MockUserRepository::new();
    expect_lookup(&mut users, stored_user);
    users.expect_update().times(1).returning(|_| Ok(()));

    let request = test::TestRequest::patch()
        .uri("/v1/users/7")
        .set_json(json!({ "username": "é".repeat(MAX_USERNAME_CHARS) }));
    let (status, _) = send(users, request).await;

    assert_eq!(status, StatusCode::OK);
}

#[rstest]
#[case(StoreError::not_found(), StatusCode::NOT_FOUND)]
#[case(StoreError::duplicate_email(), StatusCode::CONFLICT)]
#[case(StoreError::duplicate_username(), StatusCode::CONFLICT)]
#[case(StoreError::query("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
#[actix_web::test]
async fn patch_maps_store_failures(
    stored_user: User,
    #[case] failure: StoreError,
    #[case] expected: StatusCode,
) {
    let mut users = MockUserRepository::new();
    expect_lookup(&mut users, stored_user);
    users
        .expect_update()
        .times(1)
        .returning(move |_| Err(failure.clone()));

    let request = test::TestRequest::patch()
        .uri("/v1/users/7")
        .set_json(json!({ "email": "grace@example.com" }));
    let (status, _) = send(users, request).await;

    assert_eq!(status, expected);
}

#[rstest]
#[actix_web::test]
async fn delete_returns_no_content() {
    let mut users = MockUserRepository::new();
    users
        .expect_delete()
        .with(eq(7))
        .times(1)
        .returning(|_| Ok(()));

    let (status, body) = send(users, test::TestRequest::delete().uri("/v1/users/7")).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[rstest]
#[actix_web::test]
async fn delete_unknown_user_is_not_found() {
    let mut users = MockUserRepository::new();
    users
        .expect_delete()
        .times(1)
        .returning(|_| Err(StoreError::not_found()));

    let (status, _) = send(users, test::TestRequest::delete().uri("/v1/users/8")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
