//! In-memory task board used by the web frontend.
//!
//! The board holds the full task and category lists fetched from the API
//! and derives the visible list with [`visible_tasks`], a pure function
//! that mirrors the server-side predicate and ordering. Mutations are merged
//! in only after the API returns the canonical record.

use std::cmp::Ordering;

use crate::category::Category;
use crate::query::{SortField, SortOrder, StatusFilter, TaskQuery};
use crate::task::{Priority, Task};

/// Current filter and sort controls.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub status: StatusFilter,
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl From<TaskQuery> for FilterState {
    fn from(query: TaskQuery) -> Self {
        Self {
            search: query.search.unwrap_or_default(),
            status: query.status,
            category: query.category,
            priority: query.priority,
            sort_by: query.sort_by,
            order: query.order,
        }
    }
}

impl FilterState {
    /// Whether `task` passes every active filter.
    pub fn matches(&self, task: &Task) -> bool {
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_title = task.title.to_lowercase().contains(&needle);
            let in_description = task
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
        if let Some(completed) = self.status.completed() {
            if task.completed != completed {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if task.category_id.as_ref() != Some(category) {
                return false;
            }
        }
        if let Some(priority) = self.priority {
            if task.priority != priority {
                return false;
            }
        }
        true
    }

    /// Single-key ordering. Tasks without a due date sort last in either
    /// direction.
    pub fn compare(&self, a: &Task, b: &Task) -> Ordering {
        let directed = |ord: Ordering| match self.order {
            SortOrder::Asc => ord,
            SortOrder::Desc => ord.reverse(),
        };

        match self.sort_by {
            SortField::CreatedAt => directed(a.created_at.cmp(&b.created_at)),
            SortField::Title => directed(a.title.to_lowercase().cmp(&b.title.to_lowercase())),
            SortField::Priority => directed(a.priority.cmp(&b.priority)),
            SortField::DueDate => match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => directed(x.cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Filter and sort `tasks` without touching the source list.
pub fn visible_tasks(tasks: &[Task], filter: &FilterState) -> Vec<Task> {
    let mut visible: Vec<Task> = tasks.iter().filter(|t| filter.matches(t)).cloned().collect();
    visible.sort_by(|a, b| filter.compare(a, b));
    visible
}

/// Authoritative lists for one page plus the active filter.
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
    pub categories: Vec<Category>,
    pub filter: FilterState,
}

impl TaskBoard {
    pub fn new(tasks: Vec<Task>, categories: Vec<Category>, filter: FilterState) -> Self {
        Self {
            tasks,
            categories,
            filter,
        }
    }

    pub fn visible(&self) -> Vec<Task> {
        visible_tasks(&self.tasks, &self.filter)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Replace the task with the same id, or append it when new.
    pub fn upsert_task(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
    }

    pub fn remove_task(&mut self, id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Replace or insert a category, keeping the list ordered by name.
    pub fn upsert_category(&mut self, category: Category) {
        match self.categories.iter_mut().find(|c| c.id == category.id) {
            Some(slot) => *slot = category,
            None => self.categories.push(category),
        }
        self.categories.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn remove_category(&mut self, id: &str) -> Option<Category> {
        let index = self.categories.iter().position(|c| c.id == id)?;
        Some(self.categories.remove(index))
    }
}
