use sqlx::PgPool;

/// Connect, migrate, and verify the schema the booking engine relies on.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    realty_db::health_check(&pool).await.unwrap();

    let roles: Vec<(i64, String)> = sqlx::query_as("SELECT id, name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<&str> = roles.iter().map(|(_, name)| name.as_str()).collect();
    assert_eq!(names, ["admin", "agent", "buyer"]);

    for table in ["users", "properties", "visits", "reviews"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// Both booking guards exist as unique indexes.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_booking_guard_indexes_exist(pool: PgPool) {
    let indexes: Vec<(String,)> = sqlx::query_as(
        "SELECT indexname::TEXT FROM pg_indexes
         WHERE tablename = 'visits' AND indexdef LIKE 'CREATE UNIQUE INDEX%'
         ORDER BY indexname",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    let names: Vec<&str> = indexes.iter().map(|(n,)| n.as_str()).collect();
    assert!(names.contains(&realty_db::repositories::visit_repo::ACTIVE_SLOT_INDEX));
    assert!(names.contains(&realty_db::repositories::visit_repo::PENDING_PER_VISITOR_INDEX));
}
