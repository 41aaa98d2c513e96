//! Database migrations
//!
//! Versioned SQLite schema migrations, applied automatically on
//! connection.

use sqlx::SqlitePool;

/// Current schema version
pub const CURRENT_VERSION: i32 = 1;

/// SQL for creating the migrations tracking table
const CREATE_MIGRATIONS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS _migrations (
        version INTEGER PRIMARY KEY NOT NULL,
        applied_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP
    );
"#;

/// Migration 1: Initial schema
const MIGRATION_V1: &str = r#"
    -- Categories table
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        description TEXT,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_categories_name ON categories(name);
    CREATE INDEX IF NOT EXISTS idx_categories_created_at ON categories(created_at);

    -- Users table
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY NOT NULL,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        password_hash TEXT NOT NULL,
        is_staff INTEGER NOT NULL DEFAULT 0,
        is_superuser INTEGER NOT NULL DEFAULT 0,
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_users_email ON users(email);
    CREATE INDEX IF NOT EXISTS idx_users_created_at ON users(created_at);

    -- Posts table
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY NOT NULL,
        author_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        category_id TEXT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        banner_name TEXT,
        banner_location TEXT,
        thumbnail_name TEXT,
        thumbnail_location TEXT,
        thumbnail_half_name TEXT,
        thumbnail_half_location TEXT,
        is_published INTEGER NOT NULL DEFAULT 1,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    );

    CREATE UNIQUE INDEX IF NOT EXISTS idx_posts_title ON posts(title);
    CREATE INDEX IF NOT EXISTS idx_posts_author_id ON posts(author_id);
    CREATE INDEX IF NOT EXISTS idx_posts_category_id ON posts(category_id);
    CREATE INDEX IF NOT EXISTS idx_posts_created_at ON posts(created_at);

    -- Refresh tokens table
    CREATE TABLE IF NOT EXISTS user_tokens (
        id TEXT PRIMARY KEY NOT NULL,
        user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
        refresh_token TEXT NOT NULL,
        expires_at TIMESTAMP NOT NULL,
        created_at TIMESTAMP NOT NULL
    );

    CREATE INDEX IF NOT EXISTS idx_user_tokens_user_id ON user_tokens(user_id);
    CREATE INDEX IF NOT EXISTS idx_user_tokens_refresh_token ON user_tokens(refresh_token);
"#;

/// Get the currently applied schema version
pub async fn current_version(pool: &SqlitePool) -> Result<i32, sqlx::Error> {
    let version: Option<i32> =
        sqlx::query_scalar("SELECT MAX(version) FROM _migrations")
            .fetch_one(pool)
            .await?;
    Ok(version.unwrap_or(0))
}

/// Apply all pending migrations
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_MIGRATIONS_TABLE).execute(pool).await?;

    let version = current_version(pool).await?;
    if version >= CURRENT_VERSION {
        tracing::debug!("database is up to date");
        return Ok(());
    }

    if version < 1 {
        tracing::info!("applying migration v1: initial schema");
        sqlx::query(MIGRATION_V1).execute(pool).await?;
        sqlx::query("INSERT INTO _migrations (version) VALUES (1)")
            .execute(pool)
            .await?;
    }

    tracing::info!(
        from = version,
        to = CURRENT_VERSION,
        "database migrations applied"
    );
    Ok(())
}
