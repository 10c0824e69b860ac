use sqlx::FromRow;
use taskboard_core::error::CoreError;
use taskboard_core::task::{CategorySummary, Task};
use taskboard_core::types::{EntityId, Timestamp};

/// A row from `tasks` left-joined with the name and color of its category.
#[derive(Debug, Clone, FromRow)]
pub struct TaskRow {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<Timestamp>,
    pub priority: String,
    pub category_id: Option<EntityId>,
    pub category_name: Option<String>,
    pub category_color: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl TryFrom<TaskRow> for Task {
    type Error = CoreError;

    fn try_from(row: TaskRow) -> Result<Self, Self::Error> {
        let priority = row.priority.parse()?;
        let category = match (&row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(CategorySummary {
                id: id.clone(),
                name,
                color: row.category_color,
            }),
            _ => None,
        };

        Ok(Self {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            due_date: row.due_date,
            priority,
            category_id: row.category_id,
            category,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Convert fetched rows, surfacing a corrupt priority as a decode error.
pub(crate) fn rows_to_tasks(rows: Vec<TaskRow>) -> Result<Vec<Task>, sqlx::Error> {
    rows.into_iter().map(row_to_task).collect()
}

pub(crate) fn row_to_task(row: TaskRow) -> Result<Task, sqlx::Error> {
    Task::try_from(row).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}
