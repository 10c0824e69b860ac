//! Demo data for local development.

use chrono::{Duration, Utc};
use sqlx::PgPool;
use taskboard_core::category::CategoryInput;
use taskboard_core::task::{Priority, TaskWrite};

use crate::repositories::{CategoryRepo, TaskRepo};

/// Insert sample categories and tasks unless categories already exist.
///
/// Returns the number of `(categories, tasks)` created.
pub async fn seed_demo_data(pool: &PgPool) -> Result<(usize, usize), sqlx::Error> {
    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        tracing::info!(existing, "Categories present, skipping demo seed");
        return Ok((0, 0));
    }

    let mut category_ids = Vec::new();
    for (name, color) in [
        ("Work", "#3B82F6"),
        ("Personal", "#10B981"),
        ("Shopping", "#F59E0B"),
        ("Health", "#EF4444"),
    ] {
        let input = CategoryInput::new(name, Some(color));
        category_ids.push(CategoryRepo::create(pool, &input).await?.id);
    }

    let now = Utc::now();
    let tasks = [
        (
            "Complete project proposal",
            "Finish the Q1 project proposal for client presentation",
            Priority::High,
            Some(now + Duration::days(7)),
            false,
            0usize,
        ),
        (
            "Review team feedback",
            "Go through all team member feedback from last sprint",
            Priority::Medium,
            None,
            false,
            0,
        ),
        (
            "Call dentist",
            "Schedule appointment for dental checkup",
            Priority::Low,
            None,
            false,
            3,
        ),
        (
            "Buy groceries",
            "Milk, bread, eggs, vegetables",
            Priority::Medium,
            Some(now + Duration::days(2)),
            false,
            2,
        ),
        (
            "Plan weekend trip",
            "Research destinations and book accommodation",
            Priority::Low,
            None,
            true,
            1,
        ),
    ];

    for (title, description, priority, due_date, completed, category) in &tasks {
        let write = TaskWrite {
            title: title.to_string(),
            description: Some(description.to_string()),
            completed: *completed,
            due_date: *due_date,
            priority: *priority,
            category_id: Some(category_ids[*category].clone()),
        };
        TaskRepo::create(pool, &write).await?;
    }

    tracing::info!(
        categories = category_ids.len(),
        tasks = tasks.len(),
        "Demo data seeded"
    );
    Ok((category_ids.len(), tasks.len()))
}
