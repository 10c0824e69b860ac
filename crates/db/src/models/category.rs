use sqlx::FromRow;
use taskboard_core::category::Category;
use taskboard_core::types::{EntityId, Timestamp};

/// A row from `categories` with the count of referencing tasks.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: EntityId,
    pub name: String,
    pub color: Option<String>,
    pub task_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            color: row.color,
            task_count: row.task_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
