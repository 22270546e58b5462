//! HTTP-level integration tests for user registration and account administration.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_user, ADMIN_ROLE_ID,
    AGENT_ROLE_ID, BUYER_ROLE_ID,
};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_registers_user_with_role(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/users",
        &admin.token,
        json!({ "name": "Dana", "email": "Dana@Example.com", "role": "agent" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["email"], "dana@example.com");
    assert_eq!(json["data"]["role_id"], AGENT_ROLE_ID);
    assert_eq!(json["data"]["is_active"], true);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_registration_rejects_bad_input(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let bodies = [
        json!({ "name": "Dana", "email": "not-an-email", "role": "buyer" }),
        json!({ "name": "", "email": "dana@example.com", "role": "buyer" }),
        json!({ "name": "Dana", "email": "dana@example.com", "role": "landlord" }),
    ];
    for body in bodies {
        let response = post_json_auth(
            common::build_test_app(pool.clone()),
            "/api/v1/users",
            &admin.token,
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_duplicate_email_conflicts(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/users",
        &admin.token,
        json!({ "name": "Again", "email": "admin@test.com", "role": "buyer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "CONFLICT");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_non_admin_cannot_register(pool: PgPool) {
    let agent = seed_user(&pool, "agent", AGENT_ROLE_ID).await;
    let response = post_json_auth(
        common::build_test_app(pool),
        "/api/v1/users",
        &agent.token,
        json!({ "name": "Dana", "email": "dana@example.com", "role": "buyer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_me_and_deactivation(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let agent = seed_user(&pool, "agent", AGENT_ROLE_ID).await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/users/me", &agent.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["id"], agent.id);

    let uri = format!("/api/v1/admin/users/{}", agent.id);
    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(common::build_test_app(pool.clone()), &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = get_auth(common::build_test_app(pool), "/api/v1/users/me", &agent.token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_admin_lists_and_fetches_users(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let agent = seed_user(&pool, "agent", AGENT_ROLE_ID).await;
    let buyer = seed_user(&pool, "buyer", BUYER_ROLE_ID).await;

    let response = get_auth(common::build_test_app(pool.clone()), "/api/v1/admin/users", &admin.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<i64> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![admin.id, agent.id, buyer.id]);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users?role=Agent&limit=5",
        &admin.token,
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], agent.id);

    let response = get_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/admin/users?role=landlord",
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/admin/users/{}", buyer.id);
    let response = get_auth(common::build_test_app(pool.clone()), &uri, &admin.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "buyer@test.com");

    let response = get_auth(common::build_test_app(pool.clone()), &uri, &agent.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(
        common::build_test_app(pool),
        "/api/v1/admin/users/999999",
        &admin.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_role_change_applies_on_next_request(pool: PgPool) {
    let admin = seed_user(&pool, "admin", ADMIN_ROLE_ID).await;
    let buyer = seed_user(&pool, "buyer", BUYER_ROLE_ID).await;
    let uri = format!("/api/v1/admin/users/{}/role", buyer.id);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &admin.token,
        json!({ "role": "wizard" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(
        common::build_test_app(pool.clone()),
        &uri,
        &admin.token,
        json!({ "role": " AGENT " }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["role_id"], AGENT_ROLE_ID);

    // The buyer's token still says "buyer"; the role is resolved per request.
    let response = post_json_auth(
        common::build_test_app(pool.clone()),
        "/api/v1/properties",
        &buyer.token,
        json!({ "title": "Loft", "description": "", "price": 900.0, "city": "Porto" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = put_json_auth(
        common::build_test_app(pool),
        "/api/v1/admin/users/999999/role",
        &admin.token,
        json!({ "role": "buyer" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
