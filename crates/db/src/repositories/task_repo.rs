//! Repository for the `tasks` table.
//!
//! Every read joins the owning category so responses can embed its
//! `{id, name, color}` summary.

use sqlx::PgPool;
use taskboard_core::query::{SortField, TaskQuery};
use taskboard_core::task::{Task, TaskWrite};
use uuid::Uuid;

use crate::models::task::{row_to_task, rows_to_tasks, TaskRow};

/// Column list for joined task queries over `t` (tasks) and `c` (categories).
const TASK_COLUMNS: &str = "\
    t.id, t.title, t.description, t.completed, t.due_date, t.priority, \
    t.category_id, c.name AS category_name, c.color AS category_color, \
    t.created_at, t.updated_at";

/// Sort expression ranking priorities LOW < MEDIUM < HIGH.
const PRIORITY_RANK: &str = "CASE t.priority WHEN 'LOW' THEN 0 WHEN 'MEDIUM' THEN 1 ELSE 2 END";

/// Provides CRUD operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// List tasks matching `query`, ordered by its single sort key.
    pub async fn list(pool: &PgPool, query: &TaskQuery) -> Result<Vec<Task>, sqlx::Error> {
        let sql = list_sql(query);
        let mut q = sqlx::query_as::<_, TaskRow>(&sql);

        // Bind dynamic parameters in the order `list_sql` numbered them.
        if let Some(ref category) = query.category {
            q = q.bind(category);
        }
        if let Some(completed) = query.status.completed() {
            q = q.bind(completed);
        }
        if let Some(priority) = query.priority {
            q = q.bind(priority.as_str());
        }
        if let Some(ref search) = query.search {
            q = q.bind(like_pattern(search));
        }

        rows_to_tasks(q.fetch_all(pool).await?)
    }

    /// Find a task by ID.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {TASK_COLUMNS} FROM tasks t \
             LEFT JOIN categories c ON c.id = t.category_id \
             WHERE t.id = $1"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(row_to_task)
            .transpose()
    }

    /// Insert a task with a freshly generated ID.
    pub async fn create(pool: &PgPool, input: &TaskWrite) -> Result<Task, sqlx::Error> {
        let query = format!(
            "WITH t AS (\
                INSERT INTO tasks \
                    (id, title, description, completed, due_date, priority, category_id) \
                VALUES ($1, $2, $3, $4, $5, $6, $7) \
                RETURNING *\
             ) \
             SELECT {TASK_COLUMNS} FROM t \
             LEFT JOIN categories c ON c.id = t.category_id"
        );
        let row = sqlx::query_as::<_, TaskRow>(&query)
            .bind(Uuid::now_v7().to_string())
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.completed)
            .bind(input.due_date)
            .bind(input.priority.as_str())
            .bind(input.category_id.as_deref())
            .fetch_one(pool)
            .await?;
        row_to_task(row)
    }

    /// Overwrite every mutable column of a task. Returns `None` if the task
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        id: &str,
        input: &TaskWrite,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "WITH t AS (\
                UPDATE tasks SET \
                    title = $2, \
                    description = $3, \
                    completed = $4, \
                    due_date = $5, \
                    priority = $6, \
                    category_id = $7, \
                    updated_at = NOW() \
                WHERE id = $1 \
                RETURNING *\
             ) \
             SELECT {TASK_COLUMNS} FROM t \
             LEFT JOIN categories c ON c.id = t.category_id"
        );
        sqlx::query_as::<_, TaskRow>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.description.as_deref())
            .bind(input.completed)
            .bind(input.due_date)
            .bind(input.priority.as_str())
            .bind(input.category_id.as_deref())
            .fetch_optional(pool)
            .await?
            .map(row_to_task)
            .transpose()
    }

    /// Delete a task by ID. Returns true if a row was deleted.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Build the listing statement. Placeholders are numbered in the order
/// `category`, `completed`, `priority`, `search`, matching the binds in
/// [`TaskRepo::list`]. The search pattern is bound once and referenced for
/// both title and description.
fn list_sql(query: &TaskQuery) -> String {
    let mut conditions = Vec::new();
    let mut bind_idx = 1u32;

    if query.category.is_some() {
        conditions.push(format!("t.category_id = ${bind_idx}"));
        bind_idx += 1;
    }
    if query.status.completed().is_some() {
        conditions.push(format!("t.completed = ${bind_idx}"));
        bind_idx += 1;
    }
    if query.priority.is_some() {
        conditions.push(format!("t.priority = ${bind_idx}"));
        bind_idx += 1;
    }
    if query.search.is_some() {
        conditions.push(format!(
            "(t.title ILIKE ${bind_idx} OR t.description ILIKE ${bind_idx})"
        ));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", conditions.join(" AND "))
    };

    let sort_key = match query.sort_by {
        SortField::CreatedAt => "t.created_at",
        SortField::DueDate => "t.due_date",
        // Matches the frontend: lowercase, then code point order.
        SortField::Title => "LOWER(t.title) COLLATE \"C\"",
        SortField::Priority => PRIORITY_RANK,
    };

    format!(
        "SELECT {TASK_COLUMNS} FROM tasks t \
         LEFT JOIN categories c ON c.id = t.category_id\
         {where_clause} \
         ORDER BY {sort_key} {direction} NULLS LAST",
        direction = query.order.as_sql(),
    )
}

/// Wrap a search term for a literal, case-insensitive substring match.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[cfg(test)]
mod tests {
    use taskboard_core::query::{SortOrder, StatusFilter};
    use taskboard_core::task::Priority;

    use super::*;

    #[test]
    fn no_filters_means_no_where_clause() {
        let sql = list_sql(&TaskQuery::default());
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with("ORDER BY t.created_at DESC NULLS LAST"));
    }

    #[test]
    fn filters_combine_with_and_in_bind_order() {
        let query = TaskQuery {
            category: Some("cat".into()),
            status: StatusFilter::Pending,
            priority: Some(Priority::High),
            search: Some("team".into()),
            sort_by: SortField::DueDate,
            order: SortOrder::Asc,
        };
        let sql = list_sql(&query);
        assert!(sql.contains(
            "WHERE t.category_id = $1 AND t.completed = $2 AND t.priority = $3 \
             AND (t.title ILIKE $4 OR t.description ILIKE $4)"
        ));
        assert!(sql.ends_with("ORDER BY t.due_date ASC NULLS LAST"));
    }

    #[test]
    fn status_all_adds_no_condition() {
        let query = TaskQuery {
            status: StatusFilter::All,
            search: Some("x".into()),
            ..Default::default()
        };
        let sql = list_sql(&query);
        assert!(sql.contains("WHERE (t.title ILIKE $1 OR t.description ILIKE $1)"));
    }

    #[test]
    fn priority_sort_uses_rank_expression() {
        let query = TaskQuery {
            sort_by: SortField::Priority,
            ..Default::default()
        };
        assert!(list_sql(&query).contains(&format!("ORDER BY {PRIORITY_RANK} DESC")));
    }

    #[test]
    fn title_sort_ignores_case() {
        let query = TaskQuery {
            sort_by: SortField::Title,
            order: SortOrder::Asc,
            ..Default::default()
        };
        assert!(list_sql(&query).ends_with(r#"ORDER BY LOWER(t.title) COLLATE "C" ASC NULLS LAST"#));
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("team"), "%team%");
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
