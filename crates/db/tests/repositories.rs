//! Integration tests for the task and category repositories.
//!
//! Exercises filtering, ordering, the category join, and the foreign key
//! that blocks deleting a referenced category.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use sqlx::PgPool;
use taskboard_core::category::CategoryInput;
use taskboard_core::query::{SortField, SortOrder, StatusFilter, TaskQuery};
use taskboard_core::task::{Priority, TaskWrite};
use taskboard_db::repositories::{CategoryRepo, TaskRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_task(title: &str) -> TaskWrite {
    TaskWrite {
        title: title.to_string(),
        description: None,
        completed: false,
        due_date: None,
        priority: Priority::Medium,
        category_id: None,
    }
}

fn new_category(name: &str) -> CategoryInput {
    CategoryInput::new(name, Some("#3B82F6"))
}

fn titles(tasks: &[taskboard_core::task::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

// ---------------------------------------------------------------------------
// Tasks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn create_then_find_joins_category(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Work"))
        .await
        .unwrap();
    let created = TaskRepo::create(
        &pool,
        &TaskWrite {
            category_id: Some(category.id.clone()),
            ..new_task("Buy milk")
        },
    )
    .await
    .unwrap();

    let found = TaskRepo::find_by_id(&pool, &created.id)
        .await
        .unwrap()
        .expect("task should exist");
    assert_eq!(found.title, "Buy milk");
    assert!(!found.completed);
    let summary = found.category.expect("category summary should be joined");
    assert_eq!(summary.id, category.id);
    assert_eq!(summary.name, "Work");
    assert_eq!(summary.color.as_deref(), Some("#3B82F6"));
}

#[sqlx::test(migrations = "./migrations")]
async fn find_missing_task_returns_none(pool: PgPool) {
    assert!(TaskRepo::find_by_id(&pool, "missing").await.unwrap().is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_filters_by_status_and_priority(pool: PgPool) {
    TaskRepo::create(
        &pool,
        &TaskWrite {
            completed: true,
            priority: Priority::Low,
            ..new_task("A")
        },
    )
    .await
    .unwrap();
    TaskRepo::create(
        &pool,
        &TaskWrite {
            priority: Priority::High,
            ..new_task("B")
        },
    )
    .await
    .unwrap();

    let pending = TaskQuery {
        status: StatusFilter::Pending,
        ..Default::default()
    };
    assert_eq!(titles(&TaskRepo::list(&pool, &pending).await.unwrap()), ["B"]);

    let low = TaskQuery {
        priority: Some(Priority::Low),
        ..Default::default()
    };
    assert_eq!(titles(&TaskRepo::list(&pool, &low).await.unwrap()), ["A"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_search_is_case_insensitive_and_literal(pool: PgPool) {
    TaskRepo::create(&pool, &new_task("Review team feedback"))
        .await
        .unwrap();
    TaskRepo::create(
        &pool,
        &TaskWrite {
            description: Some("100% done".into()),
            ..new_task("Report")
        },
    )
    .await
    .unwrap();

    for term in ["team", "TEAM"] {
        let query = TaskQuery {
            search: Some(term.into()),
            ..Default::default()
        };
        assert_eq!(
            titles(&TaskRepo::list(&pool, &query).await.unwrap()),
            ["Review team feedback"]
        );
    }

    let percent = TaskQuery {
        search: Some("0%".into()),
        ..Default::default()
    };
    assert_eq!(titles(&TaskRepo::list(&pool, &percent).await.unwrap()), ["Report"]);

    let none = TaskQuery {
        search: Some("zzz".into()),
        ..Default::default()
    };
    assert!(TaskRepo::list(&pool, &none).await.unwrap().is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn list_sorts_due_date_with_nulls_last(pool: PgPool) {
    let t0 = Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap();
    for (title, offset) in [("late", Some(3)), ("undated", None), ("early", Some(1)), ("mid", Some(2))] {
        TaskRepo::create(
            &pool,
            &TaskWrite {
                due_date: offset.map(|d| t0 + Duration::days(d)),
                ..new_task(title)
            },
        )
        .await
        .unwrap();
    }

    let asc = TaskQuery {
        sort_by: SortField::DueDate,
        order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(
        titles(&TaskRepo::list(&pool, &asc).await.unwrap()),
        ["early", "mid", "late", "undated"]
    );

    let desc = TaskQuery {
        order: SortOrder::Desc,
        ..asc
    };
    assert_eq!(
        titles(&TaskRepo::list(&pool, &desc).await.unwrap()),
        ["late", "mid", "early", "undated"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn list_sorts_priority_by_rank(pool: PgPool) {
    for (title, priority) in [("m", Priority::Medium), ("h", Priority::High), ("l", Priority::Low)] {
        TaskRepo::create(
            &pool,
            &TaskWrite {
                priority,
                ..new_task(title)
            },
        )
        .await
        .unwrap();
    }

    let query = TaskQuery {
        sort_by: SortField::Priority,
        order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(titles(&TaskRepo::list(&pool, &query).await.unwrap()), ["l", "m", "h"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn list_sorts_titles_case_insensitively(pool: PgPool) {
    for title in ["banana", "Cherry", "apple"] {
        TaskRepo::create(&pool, &new_task(title)).await.unwrap();
    }

    let query = TaskQuery {
        sort_by: SortField::Title,
        order: SortOrder::Asc,
        ..Default::default()
    };
    assert_eq!(
        titles(&TaskRepo::list(&pool, &query).await.unwrap()),
        ["apple", "banana", "Cherry"]
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn update_and_delete_task(pool: PgPool) {
    let created = TaskRepo::create(&pool, &new_task("Draft")).await.unwrap();

    let updated = TaskRepo::update(
        &pool,
        &created.id,
        &TaskWrite {
            completed: true,
            ..new_task("Final")
        },
    )
    .await
    .unwrap()
    .expect("task should exist");
    assert_eq!(updated.title, "Final");
    assert!(updated.completed);
    assert!(updated.updated_at >= created.updated_at);

    assert!(TaskRepo::update(&pool, "missing", &new_task("x"))
        .await
        .unwrap()
        .is_none());

    assert!(TaskRepo::delete(&pool, &created.id).await.unwrap());
    assert!(!TaskRepo::delete(&pool, &created.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn categories_list_by_name_with_counts(pool: PgPool) {
    let work = CategoryRepo::create(&pool, &new_category("Work"))
        .await
        .unwrap();
    CategoryRepo::create(&pool, &new_category("Health"))
        .await
        .unwrap();
    TaskRepo::create(
        &pool,
        &TaskWrite {
            category_id: Some(work.id.clone()),
            ..new_task("Proposal")
        },
    )
    .await
    .unwrap();

    let categories = CategoryRepo::list(&pool).await.unwrap();
    let summary: Vec<(&str, i64)> = categories
        .iter()
        .map(|c| (c.name.as_str(), c.task_count))
        .collect();
    assert_eq!(summary, [("Health", 0), ("Work", 1)]);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_category_keeps_color_when_absent(pool: PgPool) {
    let created = CategoryRepo::create(&pool, &new_category("Work"))
        .await
        .unwrap();

    let updated = CategoryRepo::update(
        &pool,
        &created.id,
        &CategoryInput::new("Office", None),
    )
    .await
    .unwrap()
    .expect("category should exist");
    assert_eq!(updated.name, "Office");
    assert_eq!(updated.color.as_deref(), Some("#3B82F6"));
}

#[sqlx::test(migrations = "./migrations")]
async fn referenced_category_cannot_be_deleted(pool: PgPool) {
    let category = CategoryRepo::create(&pool, &new_category("Work"))
        .await
        .unwrap();
    TaskRepo::create(
        &pool,
        &TaskWrite {
            category_id: Some(category.id.clone()),
            ..new_task("Proposal")
        },
    )
    .await
    .unwrap();

    let err = CategoryRepo::delete(&pool, &category.id)
        .await
        .expect_err("delete should violate the foreign key");
    assert_matches!(
        err,
        sqlx::Error::Database(ref db_err) if db_err.code().as_deref() == Some("23503")
    );

    assert!(CategoryRepo::exists(&pool, &category.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn store_counts_track_rows(pool: PgPool) {
    let empty = taskboard_db::store_counts(&pool).await.unwrap();
    assert_eq!((empty.tasks, empty.categories), (0, 0));

    CategoryRepo::create(&pool, &new_category("Work")).await.unwrap();
    TaskRepo::create(&pool, &new_task("a")).await.unwrap();
    TaskRepo::create(&pool, &new_task("b")).await.unwrap();

    let counts = taskboard_db::store_counts(&pool).await.unwrap();
    assert_eq!((counts.tasks, counts.categories), (2, 1));
}

#[sqlx::test(migrations = "./migrations")]
async fn seed_is_idempotent(pool: PgPool) {
    let first = taskboard_db::seed::seed_demo_data(&pool).await.unwrap();
    assert_eq!(first, (4, 5));

    let second = taskboard_db::seed::seed_demo_data(&pool).await.unwrap();
    assert_eq!(second, (0, 0));
}
