use idv_db::IdentityRepository;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with the identity table in place
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    IdentityRepository::new(pool.clone())
        .ensure_schema()
        .await
        .expect("Failed to create schema");

    pool
}

/// Number of stored identities
pub async fn count_rows(pool: &SqlitePool) -> i64 {
    // Use sqlx::query (not query!) to avoid offline mode issues in tests
    sqlx::query_scalar("SELECT COUNT(*) FROM user_id_details")
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
