//! Integration tests for listing updates, favorites and user administration.

use realty_db::models::property::{CreateProperty, PropertyFilter, UpdateProperty};
use realty_db::models::user::CreateUser;
use realty_db::repositories::property_repo::FAVORITE_CONSTRAINT;
use realty_db::repositories::{PropertyRepo, UserRepo};
use realty_db::unique_violation;
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, email: &str, role_id: i64) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            name: "Test User".to_string(),
            email: email.to_string(),
            role_id,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_property(pool: &PgPool, agent_id: i64) -> i64 {
    PropertyRepo::create(
        pool,
        &CreateProperty {
            agent_id,
            title: "Townhouse".to_string(),
            description: "Three floors".to_string(),
            price: 450_000.0,
            city: "Haarlem".to_string(),
            property_type: Some("house".to_string()),
            listing_type: None,
        },
    )
    .await
    .unwrap()
    .id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_partial_update_keeps_omitted_fields(pool: PgPool) {
    let agent = seed_user(&pool, "agent@example.com", 2).await;
    let id = seed_property(&pool, agent).await;

    let update = UpdateProperty {
        price: Some(430_000.0),
        status: Some("pending".to_string()),
        ..Default::default()
    };
    let updated = PropertyRepo::update(&pool, id, &update).await.unwrap().unwrap();
    assert_eq!(updated.price, 430_000.0);
    assert_eq!(updated.status, "pending");
    assert_eq!(updated.title, "Townhouse");
    assert_eq!(updated.property_type, "house");
    assert_eq!(updated.listing_type, "sale");

    let pending = PropertyRepo::list(
        &pool,
        &PropertyFilter {
            status: Some("pending".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(pending.len(), 1);

    assert!(PropertyRepo::soft_delete(&pool, id).await.unwrap());
    assert!(PropertyRepo::update(&pool, id, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_favorites_are_unique_per_user(pool: PgPool) {
    let agent = seed_user(&pool, "agent@example.com", 2).await;
    let buyer = seed_user(&pool, "buyer@example.com", 3).await;
    let id = seed_property(&pool, agent).await;

    PropertyRepo::add_favorite(&pool, buyer, id).await.unwrap();
    let err = PropertyRepo::add_favorite(&pool, buyer, id).await.unwrap_err();
    assert_eq!(unique_violation(&err), Some(FAVORITE_CONSTRAINT));

    PropertyRepo::add_favorite(&pool, agent, id).await.unwrap();
    assert_eq!(PropertyRepo::favorites_count(&pool, id).await.unwrap(), 2);

    assert!(PropertyRepo::remove_favorite(&pool, buyer, id).await.unwrap());
    assert!(!PropertyRepo::remove_favorite(&pool, buyer, id).await.unwrap());
    assert_eq!(PropertyRepo::favorites_count(&pool, id).await.unwrap(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleted_listings_drop_out_of_favorites(pool: PgPool) {
    let agent = seed_user(&pool, "agent@example.com", 2).await;
    let buyer = seed_user(&pool, "buyer@example.com", 3).await;
    let kept = seed_property(&pool, agent).await;
    let removed = seed_property(&pool, agent).await;

    PropertyRepo::add_favorite(&pool, buyer, kept).await.unwrap();
    PropertyRepo::add_favorite(&pool, buyer, removed).await.unwrap();
    PropertyRepo::soft_delete(&pool, removed).await.unwrap();

    let favorites = PropertyRepo::list_favorites(&pool, buyer).await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id, kept);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_user_listing_and_role_change(pool: PgPool) {
    let admin = seed_user(&pool, "admin@example.com", 1).await;
    let buyer = seed_user(&pool, "buyer@example.com", 3).await;

    let all = UserRepo::list(&pool, None, None, None).await.unwrap();
    assert_eq!(all.iter().map(|u| u.id).collect::<Vec<_>>(), vec![admin, buyer]);

    let buyers = UserRepo::list(&pool, Some("buyer"), None, None).await.unwrap();
    assert_eq!(buyers.len(), 1);

    let page = UserRepo::list(&pool, None, Some(1), Some(1)).await.unwrap();
    assert_eq!(page[0].id, buyer);

    let promoted = UserRepo::set_role(&pool, buyer, 2).await.unwrap().unwrap();
    assert_eq!(promoted.role_id, 2);
    let identity = UserRepo::resolve_identity(&pool, buyer).await.unwrap().unwrap();
    assert_eq!(identity.role, "agent");

    assert!(UserRepo::set_role(&pool, 999_999, 2).await.unwrap().is_none());
}
