use anyhow::{Context, Result};
use r2d2_sqlite::SqliteConnectionManager;

pub type DbPool = r2d2::Pool<SqliteConnectionManager>;
pub type DbConn = r2d2::PooledConnection<SqliteConnectionManager>;

pub fn create_pool(database_path: &str) -> Result<DbPool> {
    r2d2::Pool::builder()
        .build(SqliteConnectionManager::file(database_path))
        .context("Failed to create database connection pool")
}

/// Pool over a shared in-memory database, used by tests.
pub fn create_memory_pool() -> Result<DbPool> {
    r2d2::Pool::builder()
        .max_size(1)
        .build(SqliteConnectionManager::memory())
        .context("Failed to create in-memory database pool")
}

pub fn get_connection(pool: &DbPool) -> Result<DbConn> {
    pool.get()
        .context("Failed to get database connection from pool")
}
