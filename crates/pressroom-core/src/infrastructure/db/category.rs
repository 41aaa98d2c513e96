//! SQLite category repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::category::{Category, CategoryRepository, CATEGORY_SORTABLE_FIELDS};
use crate::domain::repository::SearchableRepository;
use crate::domain::search::{SearchParams, SearchResult};
use crate::error::{Error, Result};

use super::sql::{like_pattern, order_by_clause, parse_uuid};

const SELECT_COLUMNS: &str = "id, name, description, is_active, created_at, updated_at";

/// Store-backed implementation of [`CategoryRepository`]
#[derive(Debug, Clone)]
pub struct SqliteCategoryRepository {
    pool: SqlitePool,
}

impl SqliteCategoryRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    name: String,
    description: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl CategoryRow {
    fn into_entity(self) -> Result<Category> {
        Ok(Category::restore(
            parse_uuid(&self.id, "categories.id")?,
            self.name,
            self.description,
            self.is_active,
            self.created_at,
            self.updated_at,
        ))
    }
}

#[async_trait]
impl SearchableRepository for SqliteCategoryRepository {
    type Entity = Category;
    type Filter = String;

    async fn insert(&self, entity: &Category) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description, is_active, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(entity.id.to_string())
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(entity.is_active)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn bulk_insert(&self, entities: &[Category]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        for entity in entities {
            sqlx::query(
                r#"
                INSERT INTO categories (id, name, description, is_active, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(entity.id.to_string())
            .bind(&entity.name)
            .bind(&entity.description)
            .bind(entity.is_active)
            .bind(entity.created_at)
            .bind(entity.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;
        row.map(CategoryRow::into_entity).transpose()
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Category>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql =
            format!("SELECT {SELECT_COLUMNS} FROM categories WHERE id IN ({placeholders})");
        let mut query = sqlx::query_as::<_, CategoryRow>(&sql);
        for id in ids {
            query = query.bind(id.to_string());
        }
        let rows = query.fetch_all(&self.pool).await?;
        rows.into_iter().map(CategoryRow::into_entity).collect()
    }

    async fn update(&self, entity: &Category) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE categories SET
                name = ?,
                description = ?,
                is_active = ?,
                created_at = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&entity.name)
        .bind(&entity.description)
        .bind(entity.is_active)
        .bind(entity.created_at)
        .bind(entity.updated_at)
        .bind(entity.id.to_string())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Category", entity.id));
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM categories WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn search(&self, params: SearchParams<String>) -> Result<SearchResult<Category>> {
        let where_sql = match &params.filter {
            Some(_) => " WHERE LOWER(name) LIKE ? ESCAPE '\\'",
            None => "",
        };
        let pattern = params.filter.as_deref().map(like_pattern);

        let count_sql = format!("SELECT COUNT(*) FROM categories{where_sql}");
        let mut count_query = sqlx::query_scalar::<_, i64>(&count_sql);
        if let Some(pattern) = &pattern {
            count_query = count_query.bind(pattern);
        }
        let total = count_query.fetch_one(&self.pool).await?;

        let order_by = order_by_clause(&params, CATEGORY_SORTABLE_FIELDS);
        let select_sql = format!(
            "SELECT {SELECT_COLUMNS} FROM categories{where_sql} ORDER BY {order_by} LIMIT ? OFFSET ?"
        );
        let mut select_query = sqlx::query_as::<_, CategoryRow>(&select_sql);
        if let Some(pattern) = &pattern {
            select_query = select_query.bind(pattern);
        }
        let rows = select_query
            .bind(i64::from(params.per_page))
            .bind(params.offset() as i64)
            .fetch_all(&self.pool)
            .await?;

        let items: Vec<Category> = rows
            .into_iter()
            .map(CategoryRow::into_entity)
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
impl CategoryRepository for SqliteCategoryRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let row: Option<CategoryRow> = sqlx::query_as(&format!(
            "SELECT {SELECT_COLUMNS} FROM categories WHERE name = ?"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;
        row.map(CategoryRow::into_entity).transpose()
    }
}
