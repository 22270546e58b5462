//! HTTP-level integration tests for buyer-to-agent messaging.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_property, seed_user,
    TestUser, AGENT_ROLE_ID, BUYER_ROLE_ID,
};
use serde_json::{json, Value};
use sqlx::PgPool;

struct Fixture {
    pool: PgPool,
    agent: TestUser,
    buyer: TestUser,
    outsider: TestUser,
    property_id: i64,
}

impl Fixture {
    async fn new(pool: PgPool) -> Self {
        let agent = seed_user(&pool, "agent", AGENT_ROLE_ID).await;
        let buyer = seed_user(&pool, "buyer", BUYER_ROLE_ID).await;
        let outsider = seed_user(&pool, "outsider", BUYER_ROLE_ID).await;
        let property_id = seed_property(&pool, agent.id).await;
        Self {
            pool,
            agent,
            buyer,
            outsider,
            property_id,
        }
    }

    fn app(&self) -> axum::Router {
        common::build_test_app(self.pool.clone())
    }

    async fn send(&self, user: &TestUser, property_id: i64) -> (StatusCode, Value) {
        let response = post_json_auth(
            self.app(),
            &format!("/api/v1/properties/{property_id}/contact"),
            &user.token,
            json!({ "subject": " Viewing on Saturday ", "message": "Is parking included?" }),
        )
        .await;
        let status = response.status();
        (status, body_json(response).await)
    }

    async fn send_ok(&self) -> i64 {
        let (status, json) = self.send(&self.buyer, self.property_id).await;
        assert_eq!(status, StatusCode::CREATED);
        json["data"]["id"].as_i64().unwrap()
    }

    async fn thread(&self, user: &TestUser, id: i64) -> (StatusCode, Value) {
        let response = get_auth(self.app(), &format!("/api/v1/contact/{id}"), &user.token).await;
        let status = response.status();
        (status, body_json(response).await)
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_message_goes_to_listing_agent(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let (status, json) = fx.send(&fx.buyer, fx.property_id).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["data"]["sender_id"], fx.buyer.id);
    assert_eq!(json["data"]["receiver_id"], fx.agent.id);
    assert_eq!(json["data"]["subject"], "Viewing on Saturday");
    assert_eq!(json["data"]["status"], "unread");
    assert!(json["data"].get("is_deleted").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_second_message_for_same_listing_conflicts(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    fx.send_ok().await;

    let (status, json) = fx.send(&fx.buyer, fx.property_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "CONFLICT");
    assert_eq!(json["error"], "You have already sent a message for this property");

    let (status, _) = fx.send(&fx.outsider, fx.property_id).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_send_rejects_bad_input(pool: PgPool) {
    let fx = Fixture::new(pool).await;

    let (status, _) = fx.send(&fx.buyer, 999_999).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let long_subject = "s".repeat(101);
    for body in [
        json!({ "subject": "", "message": "Hello" }),
        json!({ "subject": long_subject, "message": "Hello" }),
        json!({ "subject": "Hello", "message": "" }),
        json!({ "subject": "Hello" }),
    ] {
        let response = post_json_auth(
            fx.app(),
            &format!("/api/v1/properties/{}/contact", fx.property_id),
            &fx.buyer.token,
            body.clone(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR", "{body}");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_receiver_opening_marks_read(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let id = fx.send_ok().await;

    let (status, json) = fx.thread(&fx.buyer, id).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "unread");
    assert_eq!(json["data"]["replies"], json!([]));

    let (_, json) = fx.thread(&fx.agent, id).await;
    assert_eq!(json["data"]["status"], "read");

    let (status, _) = fx.thread(&fx.outsider, id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_replies_are_threaded_in_order(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let id = fx.send_ok().await;
    let uri = format!("/api/v1/contact/{id}/reply");

    let response = post_json_auth(fx.app(), &uri, &fx.agent.token, json!({ "message": "Yes, one space" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["data"]["sender_id"], fx.agent.id);

    let response = post_json_auth(fx.app(), &uri, &fx.buyer.token, json!({ "message": "Great, thanks" })).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(fx.app(), &uri, &fx.outsider.token, json!({ "message": "Hi" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(fx.app(), &uri, &fx.buyer.token, json!({ "message": "" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let (_, json) = fx.thread(&fx.agent, id).await;
    assert_eq!(json["data"]["status"], "replied");
    let replies: Vec<&str> = json["data"]["replies"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["message"].as_str().unwrap())
        .collect();
    assert_eq!(replies, vec!["Yes, one space", "Great, thanks"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_only_receiver_sets_status(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let id = fx.send_ok().await;
    let uri = format!("/api/v1/contact/{id}/status");

    let response = put_json_auth(fx.app(), &uri, &fx.buyer.token, json!({ "status": "archived" })).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = put_json_auth(fx.app(), &uri, &fx.agent.token, json!({ "status": "spam" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = put_json_auth(fx.app(), &uri, &fx.agent.token, json!({ "status": "archived" })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["status"], "archived");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filters_by_status_and_participant(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let first = fx.send_ok().await;
    let second_property = seed_property(&fx.pool, fx.agent.id).await;
    let (_, json) = fx.send(&fx.buyer, second_property).await;
    let second = json["data"]["id"].as_i64().unwrap();
    fx.thread(&fx.agent, first).await;

    let list = |user: &TestUser, query: &str| {
        let uri = format!("/api/v1/contact{query}");
        let app = fx.app();
        let token = user.token.clone();
        async move {
            let response = get_auth(app, &uri, &token).await;
            let status = response.status();
            (status, body_json(response).await)
        }
    };

    let (status, json) = list(&fx.agent, "").await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![second, first]);

    let (_, json) = list(&fx.buyer, "?status=read").await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["id"], first);

    let (_, json) = list(&fx.outsider, "").await;
    assert_eq!(json["data"], json!([]));

    let (status, _) = list(&fx.buyer, "?status=spam").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_hides_message_from_both_participants(pool: PgPool) {
    let fx = Fixture::new(pool).await;
    let id = fx.send_ok().await;
    let uri = format!("/api/v1/contact/{id}");

    let response = delete_auth(fx.app(), &uri, &fx.outsider.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete_auth(fx.app(), &uri, &fx.buyer.token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let (status, _) = fx.thread(&fx.agent, id).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = delete_auth(fx.app(), &uri, &fx.buyer.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The conversation slot stays taken after deletion.
    let (status, _) = fx.send(&fx.buyer, fx.property_id).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
