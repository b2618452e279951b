use crate::app_env;
use anyhow::Context;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::time::Duration;
use tracing::info;

/// Table definitions, in dependency order. Admins and regular users live in separate tables;
/// todos and categories belong to regular users.
pub const TABLES: [&str; 5] = [
    "CREATE TABLE IF NOT EXISTS admin (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'admin'
    )",
    "CREATE TABLE IF NOT EXISTS regularuser (
        id SERIAL PRIMARY KEY,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password TEXT NOT NULL,
        role TEXT NOT NULL DEFAULT 'regular_user'
    )",
    "CREATE TABLE IF NOT EXISTS category (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES regularuser(id),
        text TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS todo (
        id SERIAL PRIMARY KEY,
        user_id INTEGER NOT NULL REFERENCES regularuser(id),
        text TEXT NOT NULL,
        done BOOLEAN NOT NULL DEFAULT FALSE
    )",
    "CREATE TABLE IF NOT EXISTS todocategory (
        category_id INTEGER NOT NULL REFERENCES category(id),
        todo_id INTEGER NOT NULL REFERENCES todo(id) ON DELETE CASCADE,
        PRIMARY KEY (category_id, todo_id)
    )",
];

/// Builds a connection pool for the database at `db_url`
pub async fn connect_sqlx(db_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .acquire_timeout(Duration::from_secs(2))
        .connect(db_url)
        .await
}

/// Builds a connection pool from [app_env::DB_URL], reading a .env file first if one is present
pub async fn connect_from_env() -> Result<PgPool, anyhow::Error> {
    if dotenv::dotenv().is_err() {
        info!("No .env file found, using the process environment");
    }

    let db_url = env::var(app_env::DB_URL)
        .with_context(|| format!("reading {} from the environment", app_env::DB_URL))?;
    let pool = connect_sqlx(&db_url)
        .await
        .context("connecting to the database")?;

    Ok(pool)
}

/// Creates any of the tables in [TABLES] which don't exist yet. Existing tables are left as-is.
pub async fn create_tables(pool: &PgPool) -> Result<(), sqlx::Error> {
    let mut txn = pool.begin().await?;
    for table in TABLES {
        sqlx::query(table).execute(&mut *txn).await?;
    }
    txn.commit().await?;

    Ok(())
}
