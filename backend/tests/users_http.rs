//! End-to-end HTTP scenarios against the in-memory store.

use actix_web::http::StatusCode;
use actix_web::test;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use user_api::domain::User;

mod support;

use support::{test_app, user};

#[fixture]
fn alice() -> User {
    user(1, "Alice", 27)
}

async fn json_body(res: actix_web::dev::ServiceResponse) -> Value {
    let bytes = test::read_body(res).await;
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("JSON body")
    }
}

#[rstest]
#[actix_web::test]
async fn alice_lifecycle(alice: User) {
    let app = test::init_service(test_app(vec![alice])).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/user/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        json!({ "id": 1, "name": "Alice", "age": 27 })
    );

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/user/1")
            .set_json(json!({ "age": 30 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(
        json_body(res).await,
        json!({ "id": 1, "name": "Alice", "age": 30 })
    );

    let res =
        test::call_service(&app, test::TestRequest::delete().uri("/user/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(test::read_body(res).await.is_empty());

    let res = test::call_service(&app, test::TestRequest::get().uri("/user/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = json_body(res).await;
    assert_eq!(body["code"], "not_found");
}

#[rstest]
#[actix_web::test]
async fn underage_creation_leaves_store_unchanged(alice: User) {
    let app = test::init_service(test_app(vec![alice])).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "Bob", "age": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(res).await["details"]["code"], "invalid_age");

    let res = test::call_service(&app, test::TestRequest::get().uri("/users").to_request()).await;
    let users = json_body(res).await;
    assert_eq!(users.as_array().map(Vec::len), Some(1));
}

#[rstest]
#[case("/user/abc")]
#[case("/user/1.0")]
#[case("/user/")]
#[actix_web::test]
async fn malformed_ids_are_bad_requests(#[case] uri: &str) {
    let app = test::init_service(test_app(Vec::new())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[actix_web::test]
async fn ping_returns_pong() {
    let app = test::init_service(test_app(Vec::new())).await;
    let res = test::call_service(&app, test::TestRequest::get().uri("/ping").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key("trace-id"));
    assert_eq!(test::read_body(res).await.as_ref(), b"pong");
}

#[rstest]
#[actix_web::test]
async fn created_ids_exceed_previous_count_and_are_retrievable(alice: User) {
    let app = test::init_service(test_app(vec![alice])).await;

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "Bob", "age": 14, "email": "bob@example.com" }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = json_body(res).await;
    assert_eq!(created["id"], 2);
    assert_eq!(created["email"], "bob@example.com");

    let res = test::call_service(&app, test::TestRequest::get().uri("/user/2").to_request()).await;
    assert_eq!(json_body(res).await, created);
}

#[rstest]
#[actix_web::test]
async fn ids_are_not_reused_after_deletion(alice: User) {
    let app = test::init_service(test_app(vec![alice, user(2, "Bob", 20)])).await;

    let res =
        test::call_service(&app, test::TestRequest::delete().uri("/user/1").to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "Carol", "age": 33 }))
            .to_request(),
    )
    .await;
    assert_eq!(json_body(res).await["id"], 3);
}

#[rstest]
#[actix_web::test]
async fn duplicate_names_conflict(alice: User) {
    let app = test::init_service(test_app(vec![alice])).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user")
            .set_json(json!({ "name": "Alice", "age": 40 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
}

#[rstest]
#[case(json!({ "name": "Alicia" }), json!({ "id": 1, "name": "Alicia", "age": 27 }))]
#[case(json!({ "age": 28 }), json!({ "id": 1, "name": "Alice", "age": 28 }))]
#[case(json!({}), json!({ "id": 1, "name": "Alice", "age": 27 }))]
#[case(json!({ "name": "  ", "age": 14 }), json!({ "id": 1, "name": "Alice", "age": 14 }))]
#[actix_web::test]
async fn partial_updates_keep_absent_fields(
    alice: User,
    #[case] patch: Value,
    #[case] expected: Value,
) {
    let app = test::init_service(test_app(vec![alice])).await;
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/user/1")
            .set_json(patch)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, expected);
}

#[rstest]
#[case(json!({ "age": 10 }), json!({ "id": 1, "name": "Alice", "age": 27 }))]
#[case(json!({ "age": -1 }), json!({ "id": 1, "name": "Alice", "age": 27 }))]
#[case(json!({ "name": "Alicia", "age": 13 }), json!({ "id": 1, "name": "Alicia", "age": 27 }))]
#[actix_web::test]
async fn ages_below_minimum_keep_stored_age(
    alice: User,
    #[case] patch: Value,
    #[case] expected: Value,
) {
    let app = test::init_service(test_app(vec![alice])).await;
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/user/1")
            .set_json(patch)
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(json_body(res).await, expected);

    let res = test::call_service(&app, test::TestRequest::get().uri("/user/1").to_request()).await;
    assert_eq!(json_body(res).await, expected);
}

#[rstest]
#[actix_web::test]
async fn young_age_update_of_missing_user_is_404() {
    let app = test::init_service(test_app(Vec::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri("/user/99")
            .set_json(json!({ "age": 10 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/user/99")]
#[actix_web::test]
async fn mutations_of_missing_users_are_404(#[case] uri: &str) {
    let app = test::init_service(test_app(Vec::new())).await;

    let res = test::call_service(
        &app,
        test::TestRequest::patch()
            .uri(uri)
            .set_json(json!({ "age": 20 }))
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = test::call_service(&app, test::TestRequest::delete().uri(uri).to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[actix_web::test]
async fn non_json_body_is_an_internal_error() {
    let app = test::init_service(test_app(Vec::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/user")
            .set_payload("name=Bob&age=20")
            .to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(res).await["message"], "Internal server error");
}

#[rstest]
#[actix_web::test]
async fn readiness_probe_reports_ready() {
    let app = test::init_service(test_app(Vec::new())).await;
    let res = test::call_service(
        &app,
        test::TestRequest::get().uri("/health/ready").to_request(),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
}
