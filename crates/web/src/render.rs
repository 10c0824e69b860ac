//! HTML rendering for the board and category pages.
//!
//! Pure functions from board state to markup. All user-supplied text goes
//! through [`escape`].

use taskboard_core::board::{FilterState, TaskBoard};
use taskboard_core::category::Category;
use taskboard_core::query::{SortField, SortOrder, StatusFilter};
use taskboard_core::task::{Priority, Task};

use crate::forms::{BoardParams, ANY};

/// Feedback shown above the page content after a form post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Escape text for use in element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn layout(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let notice = match notice {
        Some(Notice::Success(text)) => {
            format!(r#"<p class="notice success">{}</p>"#, escape(text))
        }
        Some(Notice::Error(text)) => {
            format!(r#"<p class="notice error" role="alert">{}</p>"#, escape(text))
        }
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{STYLE}</style>
</head>
<body>
<header><h1>Task Manager</h1><nav><a href="/">Tasks</a> <a href="/categories">Manage Categories</a></nav></header>
<main>
{notice}
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
    )
}

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:0;background:#f9fafb;color:#111827}\
header{display:flex;justify-content:space-between;align-items:center;padding:0 2rem;background:#fff;border-bottom:1px solid #e5e7eb}\
main{max-width:64rem;margin:0 auto;padding:1.5rem 2rem}\
.notice{padding:.5rem 1rem;border-radius:.375rem}\
.success{background:#dcfce7}.error{background:#fee2e2}\
.task{display:flex;gap:1rem;align-items:center;padding:.75rem;background:#fff;border:1px solid #e5e7eb;margin:.25rem 0}\
.done .title{text-decoration:line-through;color:#6b7280}\
.badge{font-size:.75rem;padding:.1rem .5rem;border-radius:9999px;background:#e5e7eb}\
.HIGH{background:#fee2e2}.MEDIUM{background:#fef3c7}.LOW{background:#dcfce7}\
form.inline{display:inline}";

// ---------------------------------------------------------------------------
// Task board
// ---------------------------------------------------------------------------

/// Render the task list page. `editing` opens the edit form for that task.
pub fn board_page(board: &TaskBoard, editing: Option<&Task>, notice: Option<&Notice>) -> String {
    let params = BoardParams::from_filter(&board.filter);
    let query = params.to_query();
    let suffix = if query.is_empty() {
        String::new()
    } else {
        format!("?{query}")
    };

    let visible = board.visible();
    let mut body = String::new();
    body.push_str(&filter_controls(board));

    body.push_str(&format!(
        r#"<p class="summary">Showing {} of {} tasks</p>"#,
        visible.len(),
        board.tasks.len()
    ));

    if visible.is_empty() {
        body.push_str(r#"<p class="empty">No tasks found</p>"#);
    } else {
        body.push_str(r#"<ul class="tasks">"#);
        for task in &visible {
            body.push_str(&task_row(task, &params, &suffix));
        }
        body.push_str("</ul>");
    }

    match editing {
        Some(task) => body.push_str(&task_form(
            "Edit Task",
            &format!("/tasks/{}{suffix}", escape(&task.id)),
            Some(task),
            &board.categories,
        )),
        None => body.push_str(&task_form(
            "New Task",
            &format!("/tasks{suffix}"),
            None,
            &board.categories,
        )),
    }

    layout("Task Management App", notice, &body)
}

fn filter_controls(board: &TaskBoard) -> String {
    let filter: &FilterState = &board.filter;

    let status = [
        (StatusFilter::All, "All"),
        (StatusFilter::Completed, "Completed"),
        (StatusFilter::Pending, "Pending"),
    ]
    .iter()
    .map(|(s, label)| option(s.as_str(), label, filter.status == *s))
    .collect::<String>();

    let mut category = option(ANY, "All Categories", filter.category.is_none());
    for c in &board.categories {
        category.push_str(&option(&c.id, &c.name, filter.category.as_deref() == Some(c.id.as_str())));
    }

    let mut priority = option(ANY, "All Priorities", filter.priority.is_none());
    for p in [Priority::High, Priority::Medium, Priority::Low] {
        priority.push_str(&option(p.as_str(), p.as_str(), filter.priority == Some(p)));
    }

    let sort_by = [
        (SortField::CreatedAt, "Created Date"),
        (SortField::DueDate, "Due Date"),
        (SortField::Title, "Title"),
        (SortField::Priority, "Priority"),
    ]
    .iter()
    .map(|(s, label)| option(s.as_str(), label, filter.sort_by == *s))
    .collect::<String>();

    let order = [(SortOrder::Desc, "Descending"), (SortOrder::Asc, "Ascending")]
        .iter()
        .map(|(o, label)| option(o.as_str(), label, filter.order == *o))
        .collect::<String>();

    format!(
        r#"<form class="filters" method="get" action="/">
<input type="search" name="search" placeholder="Search tasks..." value="{search}">
<select name="status">{status}</select>
<select name="category">{category}</select>
<select name="priority">{priority}</select>
<select name="sortBy">{sort_by}</select>
<select name="order">{order}</select>
<button type="submit">Apply</button>
</form>"#,
        search = escape(&filter.search),
    )
}

fn task_row(task: &Task, params: &BoardParams, suffix: &str) -> String {
    let id = escape(&task.id);
    let edit_href = format!("/?{}", escape(&params.editing(&task.id).to_query()));

    let description = task
        .description
        .as_deref()
        .map(|d| format!(r#"<p class="description">{}</p>"#, escape(d)))
        .unwrap_or_default();
    let due = task
        .due_date
        .map(|d| format!(r#"<span class="due">Due {}</span>"#, d.format("%b %-d, %Y")))
        .unwrap_or_default();
    let category = task
        .category
        .as_ref()
        .map(|c| {
            format!(
                r#"<span class="badge" style="background:{}">{}</span>"#,
                escape(c.color.as_deref().unwrap_or("#e5e7eb")),
                escape(&c.name)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<li class="task{done}">
<form class="inline" method="post" action="/tasks/{id}/toggle{suffix}"><button type="submit" aria-label="Toggle">{check}</button></form>
<div><a class="title" href="{edit_href}">{title}</a>{description}</div>
<span class="badge {priority}">{priority}</span>{category}{due}
<form class="inline" method="post" action="/tasks/{id}/delete{suffix}"><button type="submit">Delete</button></form>
</li>"#,
        done = if task.completed { " done" } else { "" },
        check = if task.completed { "&#9745;" } else { "&#9744;" },
        title = escape(&task.title),
        priority = task.priority.as_str(),
    )
}

fn task_form(heading: &str, action: &str, task: Option<&Task>, categories: &[Category]) -> String {
    let title = task.map(|t| escape(&t.title)).unwrap_or_default();
    let description = task
        .and_then(|t| t.description.as_deref())
        .map(escape)
        .unwrap_or_default();
    let due_date = task
        .and_then(|t| t.due_date)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let priority = task.map(|t| t.priority).unwrap_or_default();
    let category_id = task.and_then(|t| t.category_id.as_deref());
    let completed = task.is_some_and(|t| t.completed);

    let priorities = [Priority::Low, Priority::Medium, Priority::High]
        .iter()
        .map(|p| option(p.as_str(), p.as_str(), *p == priority))
        .collect::<String>();

    let mut category_options = option("", "No category", category_id.is_none());
    for c in categories {
        category_options.push_str(&option(&c.id, &c.name, category_id == Some(c.id.as_str())));
    }

    format!(
        r#"<section class="task-form">
<h2>{heading}</h2>
<form method="post" action="{action}">
<label>Title <input name="title" required maxlength="200" value="{title}"></label>
<label>Description <textarea name="description" maxlength="1000">{description}</textarea></label>
<label>Due date <input type="date" name="dueDate" value="{due_date}"></label>
<label>Priority <select name="priority">{priorities}</select></label>
<label>Category <select name="categoryId">{category_options}</select></label>
<label><input type="checkbox" name="completed"{checked}> Completed</label>
<button type="submit">Save</button>
</form>
</section>"#,
        heading = escape(heading),
        checked = if completed { " checked" } else { "" },
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape(value),
        if selected { " selected" } else { "" },
        escape(label)
    )
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

/// Render the category management page.
pub fn categories_page(
    categories: &[Category],
    editing: Option<&Category>,
    notice: Option<&Notice>,
) -> String {
    let mut body = String::from("<h2>Categories</h2>");

    if categories.is_empty() {
        body.push_str(r#"<p class="empty">No categories yet</p>"#);
    } else {
        body.push_str(r#"<ul class="categories">"#);
        for category in categories {
            let id = escape(&category.id);
            let color = escape(category.color.as_deref().unwrap_or("#e5e7eb"));
            let delete = if category.is_deletable() {
                format!(
                    r#"<form class="inline" method="post" action="/categories/{id}/delete"><button type="submit">Delete</button></form>"#
                )
            } else {
                String::new()
            };
            body.push_str(&format!(
                r#"<li class="task"><span class="badge" style="background:{color}">&nbsp;</span><a href="/categories?edit={id}">{name}</a> <span class="count">{count} tasks</span>{delete}</li>"#,
                name = escape(&category.name),
                count = category.task_count,
            ));
        }
        body.push_str("</ul>");
    }

    let (heading, action, name, color) = match editing {
        Some(c) => (
            "Edit Category",
            format!("/categories/{}", escape(&c.id)),
            escape(&c.name),
            escape(c.color.as_deref().unwrap_or("#3B82F6")),
        ),
        None => (
            "New Category",
            "/categories".to_string(),
            String::new(),
            "#3B82F6".to_string(),
        ),
    };

    body.push_str(&format!(
        r#"<section class="category-form">
<h2>{heading}</h2>
<form method="post" action="{action}">
<label>Name <input name="name" required maxlength="50" value="{name}"></label>
<label>Color <input type="color" name="color" value="{color}"></label>
<button type="submit">Save</button>
</form>
</section>"#
    ));

    layout("Manage Categories", notice, &body)
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use taskboard_core::task::CategorySummary;

    use super::*;

    fn sample_task(id: &str, title: &str) -> Task {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        Task {
            id: id.into(),
            title: title.into(),
            description: None,
            completed: false,
            due_date: None,
            priority: Priority::Medium,
            category_id: None,
            category: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_category(id: &str, name: &str, task_count: i64) -> Category {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
        Category {
            id: id.into(),
            name: name.into(),
            color: Some("#3B82F6".into()),
            task_count,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn escape_neutralizes_markup() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn board_lists_only_visible_tasks_escaped() {
        let board = TaskBoard::new(
            vec![
                Task {
                    completed: true,
                    ..sample_task("a", "<script>")
                },
                sample_task("b", "Buy milk"),
            ],
            vec![],
            FilterState {
                status: StatusFilter::Completed,
                ..Default::default()
            },
        );

        let html = board_page(&board, None, None);

        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(!html.contains("Buy milk"));
        assert!(html.contains("Showing 1 of 2 tasks"));
        assert!(html.contains(r#"action="/tasks/a/toggle?status=completed""#));
        assert!(html.contains(r#"href="/?status=completed&amp;edit=a""#));
    }

    #[test]
    fn board_shows_empty_state_and_category_badge() {
        let empty = board_page(&TaskBoard::default(), None, None);
        assert!(empty.contains("No tasks found"));

        let board = TaskBoard::new(
            vec![Task {
                category_id: Some("c1".into()),
                category: Some(CategorySummary {
                    id: "c1".into(),
                    name: "Work".into(),
                    color: Some("#3B82F6".into()),
                }),
                ..sample_task("a", "Proposal")
            }],
            vec![sample_category("c1", "Work", 1)],
            FilterState::default(),
        );
        let html = board_page(&board, None, None);
        assert!(html.contains(r#"style="background:#3B82F6">Work</span>"#));
    }

    #[test]
    fn edit_form_is_prefilled() {
        let task = Task {
            description: Some("Quarterly".into()),
            priority: Priority::High,
            completed: true,
            ..sample_task("t1", "Report")
        };
        let board = TaskBoard::new(vec![task.clone()], vec![], FilterState::default());

        let html = board_page(&board, Some(&task), None);

        assert!(html.contains("Edit Task"));
        assert!(html.contains(r#"action="/tasks/t1""#));
        assert!(html.contains(r#"value="Report""#));
        assert!(html.contains(">Quarterly</textarea>"));
        assert!(html.contains(r#"<option value="HIGH" selected>HIGH</option>"#));
        assert!(html.contains(r#"name="completed" checked"#));
    }

    #[test]
    fn notices_render_escaped() {
        let html = board_page(
            &TaskBoard::default(),
            None,
            Some(&Notice::Error("Category <x> not found".into())),
        );
        assert!(html.contains(r#"role="alert">Category &lt;x&gt; not found"#));
    }

    #[test]
    fn categories_page_hides_delete_for_referenced_categories() {
        let html = categories_page(
            &[sample_category("c1", "Health", 0), sample_category("c2", "Work", 2)],
            None,
            None,
        );

        assert!(html.contains(r#"action="/categories/c1/delete""#));
        assert!(!html.contains(r#"action="/categories/c2/delete""#));
        assert!(html.contains("2 tasks"));
    }
}
