//! SQLite user and token repositories

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::account::{
    User, UserFilter, UserRepository, UserToken, UserTokenRepository, USER_SORTABLE_FIELDS,
};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::{Error, Result};

use super::sql::{like_pattern, order_by_clause, parse_uuid};

const SELECT_COLUMNS: &str =
    "id, name, email, password_hash, is_staff, is_superuser, is_active, created_at, updated_at";

/// Store-backed implementation of [`UserRepository`]
#[derive(Debug, Clone)]
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    is_staff: bool,
    is_superuser: bool,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_entity(self) -> Result<User> {
        Ok(User::restore(
            parse_uuid(&self.id, "users.id")?,
            self.name,
            self.email,
            self.password_hash,
            self.is_staff,
            self.is_superuser,
            self.is_active,
            self.created_at,
            self.updated_at,
        ))
    }
}

/// WHERE clause plus bind values for a user filter; every set field
/// contributes one AND-ed clause
fn filter_clauses(filter: &UserFilter) -> (String, Vec<String>, Vec<bool>) {
    let mut clauses: Vec<&str> = Vec::new();
    let mut patterns: Vec<String> = Vec::new();
    let mut flags: Vec<bool> = Vec::new();

    if let Some(name) = &filter.name {
        clauses.push("LOWER(name) LIKE ? ESCAPE '\\'");
        patterns.push(like_pattern(name));
    }
    if let Some(email) = &filter.email {
        clauses.push("LOWER(email) LIKE ? ESCAPE '\\'");
        patterns.push(like_pattern(email));
    }
    if let Some(is_staff) = filter.is_staff {
        clauses.push("is_staff = ?");
        flags.push(is_staff);
    }
    if let Some(is_superuser) = filter.is_superuser {
        clauses.push("is_superuser = ?");
        flags.push(is_superuser);
    }
    if let Some(is_active) = filter.is_active {
        clauses.push("is_active = ?");
        flags.push(is_active);
    }

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", clauses.join(" AND "))
    };
    (where_sql, patterns, flags)
}

#[async_trait]
impl SearchableRepository for SqliteUserRepository {
    type Entity = User;
    type Filter = UserFilter;

    async fn insert(&self, entity: &User) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, name, email, password_hash,
                is_staff, is_superuser, is_active,
                created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.to_string())
        .bind(&entity.name)
        .bind(&entity.email)
        .bind(&entity.password_hash)
        .bind(entity.is_staff)
        .bind(entity.is_superuser)
        .bind(entity.is_active)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[User]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for entity in entities {
            sqlx::query(
                r#"
                INSERT INTO users (
                    id, name, email, password_hash,
                    is_staff, is_superuser, is_active,
                    created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(entity.id.to_string())
            .bind(&entity.name)
            .bind(&entity.email)
            .bind(&entity.password_hash)
            .bind(entity.is_staff)
            .bind(entity.is_superuser)
            .bind(entity.is_active)
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM users WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserRow::into_entity).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {SELECT_COLUMNS} FROM users WHERE id IN ({placeholders})");
        let mut query = sqlx::query_as::<_, UserRow>(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(UserRow::into_entity).collect()
    }

    async fn update(&self, entity: &User) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE users SET
                name = ?,
                email = ?,
                password_hash = ?,
                is_staff = ?,
                is_superuser = ?,
                is_active = ?,
                created_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(&entity.email)
        .bind(&entity.password_hash)
        .bind(entity.is_staff)
        .bind(entity.is_superuser)
        .bind(entity.is_active)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("User", entity.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn search(&self, params: SearchParams<UserFilter>) -> Result<SearchResult<User>> {
        let (where_sql, patterns, flags) = match &params.filter {
            Some(filter) => filter_clauses(filter),
            None => (String::new(), Vec::new(), Vec::new()),
        };

        let count_sql = format!("SELECT COUNT(*) FROM users{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        for pattern in &patterns {
            count_query = count_query.bind(pattern);
        }
        for flag in &flags {
            count_query = count_query.bind(flag);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let order_by = order_by_clause(&params, USER_SORTABLE_FIELDS);
        let select_sql = format!(
            "SELECT {SELECT_COLUMNS} FROM users{where_sql} ORDER BY {order_by} LIMIT ? OFFSET ?"
        );
        let mut select_query = sqlx::query_as::<_, UserRow>(&select_sql);
        for pattern in &patterns {
            select_query = select_query.bind(pattern);
        }
        for flag in &flags {
            select_query = select_query.bind(flag);
        }
        let rows = select_query
            .bind(i64::from(params.per_page))
            .bind(params.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let items: Vec<User> = rows
            .into_iter()
            .map(UserRow::into_entity)
            .collect::<Result<_>>()?;

        Ok(SearchResult::new(
            items,
            total as u64,
            params.page,
            params.per_page,
        ))
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM users WHERE email = ?"))
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;
        row.map(UserRow::into_entity).transpose()
    }
}

/// Store-backed implementation of [`UserTokenRepository`]
#[derive(Debug, Clone)]
pub struct SqliteUserTokenRepository {
    pool: SqlitePool,
}

impl SqliteUserTokenRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserTokenRow {
    id: String,
    user_id: String,
    refresh_token: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl UserTokenRow {
    fn into_entity(self) -> Result<UserToken> {
        Ok(UserToken::restore(
            parse_uuid(&self.id, "user_tokens.id")?,
            parse_uuid(&self.user_id, "user_tokens.user_id")?,
            self.refresh_token,
            self.expires_at,
            self.created_at,
        ))
    }
}

#[async_trait]
impl UserTokenRepository for SqliteUserTokenRepository {
    async fn insert(&self, token: &UserToken) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO user_tokens (id, user_id, refresh_token, expires_at, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(token.id.to_string())
        .bind(token.user_id.to_string())
        .bind(&token.refresh_token)
        .bind(token.expires_at)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_refresh_token(&self, refresh_token: &str) -> Result<Option<UserToken>> {
        let row: Option<UserTokenRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, refresh_token, expires_at, created_at
            FROM user_tokens
            WHERE refresh_token = ?
            "#,
        )
        .bind(refresh_token)
        .fetch_optional(&self.pool)
        .await?;
        row.map(UserTokenRow::into_entity).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM user_tokens WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
