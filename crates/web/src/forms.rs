//! HTML form and query-string payloads, and their conversion into API
//! requests and filter state.
//!
//! Browsers send every field as a string, missing checkboxes are simply
//! absent, and users may type lowercase values into the URL. Values are
//! normalized here so the backend only ever sees canonical tokens.

use serde::{Deserialize, Serialize};
use taskboard_core::board::FilterState;
use taskboard_core::category::CategoryInput;
use taskboard_core::loose::Loose;
use taskboard_core::query::{SortField, SortOrder, StatusFilter};
use taskboard_core::task::{CreateTask, Priority, UpdateTask};

/// Value used by the filter selects for "no filter".
pub const ANY: &str = "all";

/// Filter and sort controls carried in the page URL.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
    /// Task currently opened in the edit form.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edit: Option<String>,
}

impl BoardParams {
    /// Build filter state, falling back to defaults for unknown values
    /// instead of rejecting the page.
    pub fn filter_state(&self) -> FilterState {
        FilterState {
            search: self
                .search
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            status: self
                .status
                .as_deref()
                .and_then(|s| s.trim().to_ascii_lowercase().parse::<StatusFilter>().ok())
                .unwrap_or_default(),
            category: self
                .category
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty() && *c != ANY)
                .map(str::to_string),
            priority: self.priority.as_deref().and_then(Priority::parse_lenient),
            sort_by: self
                .sort_by
                .as_deref()
                .and_then(|s| s.trim().parse::<SortField>().ok())
                .unwrap_or_default(),
            order: self
                .order
                .as_deref()
                .and_then(|s| s.trim().to_ascii_lowercase().parse::<SortOrder>().ok())
                .unwrap_or_default(),
        }
    }

    /// Canonical parameters for `filter`: defaults are left out so links
    /// stay short.
    pub fn from_filter(filter: &FilterState) -> Self {
        Self {
            search: (!filter.search.is_empty()).then(|| filter.search.clone()),
            status: (filter.status != StatusFilter::All)
                .then(|| filter.status.as_str().to_string()),
            category: filter.category.clone(),
            priority: filter.priority.map(|p| p.as_str().to_string()),
            sort_by: (filter.sort_by != SortField::default())
                .then(|| filter.sort_by.as_str().to_string()),
            order: (filter.order != SortOrder::default()).then(|| filter.order.as_str().to_string()),
            edit: None,
        }
    }

    /// The same view with the edit form opened for `task_id`.
    pub fn editing(&self, task_id: &str) -> Self {
        Self {
            edit: Some(task_id.to_string()),
            ..self.clone()
        }
    }

    /// URL-encoded query string, used in links and form actions so the
    /// view survives a mutation.
    pub fn to_query(&self) -> String {
        serde_urlencoded::to_string(self).unwrap_or_default()
    }
}

/// Fields of the new/edit task form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub category_id: String,
    /// Checkbox; present only when ticked.
    #[serde(default)]
    pub completed: Option<String>,
}

impl TaskForm {
    pub fn to_create(&self) -> CreateTask {
        CreateTask {
            title: self.title.clone().into(),
            description: non_blank(&self.description).map(Loose::from),
            completed: Some(self.completed.is_some().into()),
            due_date: non_blank(&self.due_date).map(Loose::from),
            priority: canonical_priority(&self.priority).map(Loose::from),
            category_id: non_blank(&self.category_id).map(Loose::from),
        }
    }

    /// Every field is sent so the stored task matches the form exactly:
    /// an emptied description or category is cleared.
    pub fn to_update(&self) -> UpdateTask {
        UpdateTask {
            title: self.title.clone().into(),
            description: Some(non_blank(&self.description).into()),
            completed: Some(self.completed.is_some().into()),
            due_date: non_blank(&self.due_date).map(Loose::from),
            priority: canonical_priority(&self.priority).map(Loose::from),
            category_id: Some(non_blank(&self.category_id).into()),
        }
    }
}

/// Fields of the category form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub color: String,
}

impl CategoryForm {
    pub fn to_input(&self) -> CategoryInput {
        CategoryInput::new(self.name.clone(), non_blank(&self.color).as_deref())
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Uppercase a recognized priority. Unknown text is passed through so the
/// backend reports it.
fn canonical_priority(value: &str) -> Option<String> {
    let value = non_blank(value)?;
    Some(match Priority::parse_lenient(&value) {
        Some(priority) => priority.as_str().to_string(),
        None => value,
    })
}
