//! SQLite post repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::post::{ImageMedia, Post, PostRepository, POST_SORTABLE_FIELDS};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::{Error, Result};

use super::sql::{like_pattern, order_by_clause, parse_uuid};

const SELECT_COLUMNS: &str = "id, author_id, category_id, title, content, \
     banner_name, banner_location, thumbnail_name, thumbnail_location, \
     thumbnail_half_name, thumbnail_half_location, is_published, created_at, updated_at";

/// Store-backed implementation of [`PostRepository`]
#[derive(Debug, Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: String,
    author_id: String,
    category_id: String,
    title: String,
    content: String,
    banner_name: Option<String>,
    banner_location: Option<String>,
    thumbnail_name: Option<String>,
    thumbnail_location: Option<String>,
    thumbnail_half_name: Option<String>,
    thumbnail_half_location: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

fn media_from_columns(name: Option<String>, location: Option<String>) -> Option<ImageMedia> {
    match (name, location) {
        (Some(name), Some(location)) => Some(ImageMedia::new(name, location)),
        _ => None,
    }
}

impl PostRow {
    fn into_entity(self) -> Result<Post> {
        Ok(Post::restore(
            parse_uuid(&self.id, "posts.id")?,
            parse_uuid(&self.author_id, "posts.author_id")?,
            parse_uuid(&self.category_id, "posts.category_id")?,
            self.title,
            self.content,
            media_from_columns(self.banner_name, self.banner_location),
            media_from_columns(self.thumbnail_name, self.thumbnail_location),
            media_from_columns(self.thumbnail_half_name, self.thumbnail_half_location),
            self.is_published,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[async_trait]
impl SearchableRepository for SqlitePostRepository {
    type Entity = Post;
    type Filter = String;

    async fn insert(&self, entity: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (
                id, author_id, category_id, title, content,
                banner_name, banner_location,
                thumbnail_name, thumbnail_location,
                thumbnail_half_name, thumbnail_half_location,
                is_published, created_at, updated_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.to_string())
        .bind(entity.author_id.to_string())
        .bind(entity.category_id.to_string())
        .bind(&entity.title)
        .bind(&entity.content)
        .bind(entity.banner.as_ref().map(|m| m.name.clone()))
        .bind(entity.banner.as_ref().map(|m| m.location.clone()))
        .bind(entity.thumbnail.as_ref().map(|m| m.name.clone()))
        .bind(entity.thumbnail.as_ref().map(|m| m.location.clone()))
        .bind(entity.thumbnail_half.as_ref().map(|m| m.name.clone()))
        .bind(entity.thumbnail_half.as_ref().map(|m| m.location.clone()))
        .bind(entity.is_published)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[Post]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for entity in entities {
            sqlx::query(
                r#"
                INSERT INTO posts (
                    id, author_id, category_id, title, content,
                    banner_name, banner_location,
                    thumbnail_name, thumbnail_location,
                    thumbnail_half_name, thumbnail_half_location,
                    is_published, created_at, updated_at
                )
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(entity.id.to_string())
            .bind(entity.author_id.to_string())
            .bind(entity.category_id.to_string())
            .bind(&entity.title)
            .bind(&entity.content)
            .bind(entity.banner.as_ref().map(|m| m.name.clone()))
            .bind(entity.banner.as_ref().map(|m| m.location.clone()))
            .bind(entity.thumbnail.as_ref().map(|m| m.name.clone()))
            .bind(entity.thumbnail.as_ref().map(|m| m.location.clone()))
            .bind(entity.thumbnail_half.as_ref().map(|m| m.name.clone()))
            .bind(entity.thumbnail_half.as_ref().map(|m| m.location.clone()))
            .bind(entity.is_published)
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>> {
        let row: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM posts WHERE id = ?"))
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await?;
        row.map(PostRow::into_entity).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Post>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!("SELECT {SELECT_COLUMNS} FROM posts WHERE id IN ({placeholders})");
        let mut query = sqlx::query_as::<_, PostRow>(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(PostRow::into_entity).collect()
    }

    async fn update(&self, entity: &Post) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE posts SET
                author_id = ?,
                category_id = ?,
                title = ?,
                content = ?,
                banner_name = ?,
                banner_location = ?,
                thumbnail_name = ?,
                thumbnail_location = ?,
                thumbnail_half_name = ?,
                thumbnail_half_location = ?,
                is_published = ?,
                created_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(entity.author_id.to_string())
        .bind(entity.category_id.to_string())
        .bind(&entity.title)
        .bind(&entity.content)
        .bind(entity.banner.as_ref().map(|m| m.name.clone()))
        .bind(entity.banner.as_ref().map(|m| m.location.clone()))
        .bind(entity.thumbnail.as_ref().map(|m| m.name.clone()))
        .bind(entity.thumbnail.as_ref().map(|m| m.location.clone()))
        .bind(entity.thumbnail_half.as_ref().map(|m| m.name.clone()))
        .bind(entity.thumbnail_half.as_ref().map(|m| m.location.clone()))
        .bind(entity.is_published)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Post", entity.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM posts WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn search(&self, params: SearchParams<String>) -> Result<SearchResult<Post>> {
        let where_sql = match &params.filter {
            Some(_) => " WHERE LOWER(title) LIKE ? ESCAPE '\\'",
            None => "",
        };
        let pattern = params.filter.as_deref().map(like_pattern);

        let count_sql = format!("SELECT COUNT(*) FROM posts{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let order_by = order_by_clause(&params, POST_SORTABLE_FIELDS);
        let select_sql = format!(
            "SELECT {SELECT_COLUMNS} FROM posts{where_sql} ORDER BY {order_by} LIMIT ? OFFSET ?"
        );
        let mut select_query = sqlx::query_as::<_, PostRow>(&select_sql);
        if let Some(pattern) = &pattern {
            select_query = select_query.bind(pattern);
        }
        let rows = select_query
            .bind(i64::from(params.per_page))
            .bind(params.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let items: Vec<Post> = rows
            .into_iter()
            .map(PostRow::into_entity)
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
impl PostRepository for SqlitePostRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<Post>> {
        let row: Option<PostRow> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM posts WHERE title = ?"))
                .bind(title)
                .fetch_optional(&self.pool)
                .await?;
        row.map(PostRow::into_entity).transpose()
    }
}
