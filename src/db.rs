use anyhow::Context;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};

const USERS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS users (
    id            INTEGER PRIMARY KEY AUTOINCREMENT,
    username      VARCHAR(50) NOT NULL UNIQUE,
    email         VARCHAR(100) NOT NULL UNIQUE,
    password_hash VARCHAR(255) NOT NULL,
    created_at    DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP
);"#;

const TODOS_TABLE: &str = r#"CREATE TABLE IF NOT EXISTS todos (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    title        VARCHAR(200) NOT NULL,
    description  TEXT NOT NULL DEFAULT '',
    is_completed BOOLEAN NOT NULL DEFAULT 0,
    is_shared    BOOLEAN NOT NULL DEFAULT 0,
    user_id      INTEGER NOT NULL,
    created_at   DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    updated_at   DATETIME NOT NULL DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(id)
);"#;

// Check if the database exists, create it if not, and open a pool
pub async fn connect_pool(database_url: &str) -> anyhow::Result<Pool<Sqlite>> {
    if !Sqlite::database_exists(database_url).await.unwrap_or(false) {
        Sqlite::create_database(database_url)
            .await
            .with_context(|| format!("create database {database_url}"))?;
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .with_context(|| format!("connect to {database_url}"))?;
    Ok(pool)
}

// Create the 'users' and 'todos' tables if they don't exist
pub async fn init_db(pool: &Pool<Sqlite>) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA foreign_keys = ON;").execute(pool).await?;
    for stmt in [USERS_TABLE, TODOS_TABLE] {
        sqlx::query(stmt).execute(pool).await?;
    }
    Ok(())
}
