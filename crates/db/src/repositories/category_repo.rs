//! Repository for the `categories` table.

use sqlx::PgPool;
use taskboard_core::category::{Category, CategoryInput};
use uuid::Uuid;

use crate::models::category::CategoryRow;

/// Column list for category queries over alias `c`, including the count of
/// referencing tasks.
const CATEGORY_COLUMNS: &str = "\
    c.id, c.name, c.color, \
    (SELECT COUNT(*) FROM tasks t WHERE t.category_id = c.id) AS task_count, \
    c.created_at, c.updated_at";

/// Provides CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// List all categories ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories c ORDER BY c.name ASC");
        let rows = sqlx::query_as::<_, CategoryRow>(&query)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {CATEGORY_COLUMNS} FROM categories c WHERE c.id = $1");
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// Whether a category with this ID exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// Insert a new category with a freshly generated ID.
    pub async fn create(pool: &PgPool, input: &CategoryInput) -> Result<Category, sqlx::Error> {
        let query = format!(
            "WITH c AS (\
                INSERT INTO categories (id, name, color) \
                VALUES ($1, $2, $3) \
                RETURNING *\
             ) \
             SELECT {CATEGORY_COLUMNS} FROM c"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(input.trimmed_name())
            .bind(input.color())
            .fetch_one(pool)
            .await?;
        Ok(row.into())
    }

    /// Update name and color. An absent color keeps the stored one.
    /// Returns `None` if the category does not exist.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &CategoryInput,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "WITH c AS (\
                UPDATE categories SET \
                    name = $2, \
                    color = COALESCE($3, color), \
                    updated_at = NOW() \
                WHERE id = $1 \
                RETURNING *\
             ) \
             SELECT {CATEGORY_COLUMNS} FROM c"
        );
        let row = sqlx::query_as::<_, CategoryRow>(&query)
            .bind(id)
            .bind(input.trimmed_name())
            .bind(input.color())
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Category::from))
    }

    /// Delete a category by ID. Returns true if a row was deleted.
    ///
    /// Fails with a foreign key violation if tasks still reference it.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
