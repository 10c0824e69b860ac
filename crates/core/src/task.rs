//! Task entity, priority levels, and create/update request payloads.
//!
//! Request payload fields are [`Loose`], and `priority` and `dueDate` stay
//! strings, so that every rule can be checked and reported together instead
//! of failing on the first deserialization error.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::loose::Loose;
use crate::types::{EntityId, Timestamp};
use crate::validation::{check_trimmed_length, rule_error};

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

/// Maximum title length in characters.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum description length in characters.
pub const MAX_DESCRIPTION_LEN: usize = 1_000;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "LOW";
pub const PRIORITY_MEDIUM: &str = "MEDIUM";
pub const PRIORITY_HIGH: &str = "HIGH";

/// All valid priority tokens, in ascending rank.
pub const VALID_PRIORITIES: &[&str] = &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH];

/// Task priority. The uppercase token is the canonical representation on
/// the wire and in storage; the derived ordering is the rank.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Return the storage string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => PRIORITY_LOW,
            Self::Medium => PRIORITY_MEDIUM,
            Self::High => PRIORITY_HIGH,
        }
    }

    /// Parse a token in any letter case. Used at the frontend boundary
    /// where form values are not guaranteed to be uppercase.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        s.trim().to_ascii_uppercase().parse().ok()
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIORITY_LOW => Ok(Self::Low),
            PRIORITY_MEDIUM => Ok(Self::Medium),
            PRIORITY_HIGH => Ok(Self::High),
            other => Err(CoreError::invalid(
                "priority",
                format!(
                    "Unknown priority '{other}'. Valid priorities: {}",
                    VALID_PRIORITIES.join(", ")
                ),
            )),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// Reduced view of a category embedded in task responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: EntityId,
    pub name: String,
    pub color: Option<String>,
}

/// A task joined with the summary of its category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<Timestamp>,
    pub priority: Priority,
    pub category_id: Option<EntityId>,
    pub category: Option<CategorySummary>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Fully resolved column values for inserting or updating a task row.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskWrite {
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<Timestamp>,
    pub priority: Priority,
    pub category_id: Option<EntityId>,
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: Loose<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_description"))]
    pub description: Option<Loose<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_completed"))]
    pub completed: Option<Loose<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_due_date"))]
    pub due_date: Option<Loose<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_priority_field"))]
    pub priority: Option<Loose<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_category_id"))]
    pub category_id: Option<Loose<String>>,
}

impl CreateTask {
    /// Resolve the row to insert. Call only after validation passed.
    pub fn to_write(&self) -> TaskWrite {
        TaskWrite {
            title: self.title.as_str().unwrap_or_default().trim().to_string(),
            description: normalize_text(text_of(&self.description)),
            completed: flag_of(&self.completed).unwrap_or(false),
            due_date: text_of(&self.due_date).and_then(parse_due_date),
            priority: parse_priority_or(text_of(&self.priority), Priority::default()),
            category_id: normalize_id(text_of(&self.category_id)),
        }
    }
}

/// Body of `PUT /api/tasks/{id}`.
///
/// `description` and `category_id` distinguish an absent field (keep the
/// current value) from an explicit `null` (clear it).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(default)]
    #[validate(custom(function = "validate_title"))]
    pub title: Loose<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_nullable_description"))]
    pub description: Option<Loose<Option<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_completed"))]
    pub completed: Option<Loose<bool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_due_date"))]
    pub due_date: Option<Loose<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_priority_field"))]
    pub priority: Option<Loose<String>>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[validate(custom(function = "validate_nullable_category_id"))]
    pub category_id: Option<Loose<Option<String>>>,
}

impl UpdateTask {
    /// Merge the supplied fields over `existing`.
    ///
    /// `completed`, `priority`, `description` and `categoryId` keep their
    /// current values when absent. `dueDate` is recomputed from the request
    /// and becomes `None` when absent.
    pub fn apply_to(&self, existing: &Task) -> TaskWrite {
        let description = match &self.description {
            Some(Loose::Typed(text)) => normalize_text(text.as_deref()),
            _ => existing.description.clone(),
        };

        TaskWrite {
            title: self.title.as_str().unwrap_or_default().trim().to_string(),
            description,
            completed: flag_of(&self.completed).unwrap_or(existing.completed),
            due_date: text_of(&self.due_date).and_then(parse_due_date),
            priority: parse_priority_or(text_of(&self.priority), existing.priority),
            category_id: self.category_change().unwrap_or_else(|| existing.category_id.clone()),
        }
    }

    /// The category reference this update sets, or `None` when the field
    /// was absent. `Some(None)` clears the category.
    pub fn category_change(&self) -> Option<Option<EntityId>> {
        match &self.category_id {
            Some(Loose::Typed(id)) => Some(normalize_id(id.as_deref())),
            _ => None,
        }
    }

    /// Build a full-field update that carries `task` over unchanged except
    /// for the fields the caller then overrides.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone().into(),
            description: Some(task.description.clone().into()),
            completed: Some(task.completed.into()),
            due_date: task.due_date.map(|d| d.to_rfc3339().into()),
            priority: Some(task.priority.as_str().to_string().into()),
            category_id: Some(task.category_id.clone().into()),
        }
    }

    /// Full-field update that flips the completion flag of `task`.
    pub fn toggle(task: &Task) -> Self {
        Self {
            completed: Some((!task.completed).into()),
            ..Self::from_task(task)
        }
    }
}

// ---------------------------------------------------------------------------
// Field rules
// ---------------------------------------------------------------------------

fn validate_title(title: &Loose<String>) -> Result<(), ValidationError> {
    match title {
        Loose::Typed(text) => check_trimmed_length(
            text,
            MAX_TITLE_LEN,
            "Title is required",
            "Title must be between 1 and 200 characters",
        ),
        Loose::Mistyped(_) if title.is_null() => Err(rule_error("required", "Title is required")),
        Loose::Mistyped(_) => Err(rule_error(
            "length",
            "Title must be between 1 and 200 characters",
        )),
    }
}

fn check_description(text: &str) -> Result<(), ValidationError> {
    if text.trim().chars().count() > MAX_DESCRIPTION_LEN {
        return Err(rule_error(
            "length",
            "Description must not exceed 1000 characters",
        ));
    }
    Ok(())
}

fn validate_description(description: &Loose<String>) -> Result<(), ValidationError> {
    match description {
        Loose::Typed(text) => check_description(text),
        Loose::Mistyped(_) if description.is_null() => Ok(()),
        Loose::Mistyped(_) => Err(rule_error("type", "Description must be a string")),
    }
}

fn validate_nullable_description(
    description: &Loose<Option<String>>,
) -> Result<(), ValidationError> {
    match description {
        Loose::Typed(text) => text.as_deref().map_or(Ok(()), check_description),
        Loose::Mistyped(_) => Err(rule_error("type", "Description must be a string")),
    }
}

fn validate_completed(completed: &Loose<bool>) -> Result<(), ValidationError> {
    match completed {
        Loose::Typed(_) => Ok(()),
        Loose::Mistyped(_) => Err(rule_error("type", "Completed must be a boolean")),
    }
}

fn validate_due_date(due_date: &Loose<String>) -> Result<(), ValidationError> {
    match due_date {
        Loose::Typed(text) if text.trim().is_empty() || parse_due_date(text).is_some() => Ok(()),
        Loose::Mistyped(_) if due_date.is_null() => Ok(()),
        _ => Err(rule_error(
            "date",
            "Due date must be a valid ISO 8601 date",
        )),
    }
}

fn validate_priority_field(priority: &Loose<String>) -> Result<(), ValidationError> {
    match priority {
        Loose::Typed(token) => validate_priority(token),
        Loose::Mistyped(_) if priority.is_null() => Ok(()),
        Loose::Mistyped(_) => validate_priority(""),
    }
}

pub(crate) fn validate_priority(priority: &str) -> Result<(), ValidationError> {
    if VALID_PRIORITIES.contains(&priority) {
        return Ok(());
    }
    Err(rule_error(
        "priority",
        "Priority must be LOW, MEDIUM, or HIGH",
    ))
}

fn validate_category_id(category_id: &Loose<String>) -> Result<(), ValidationError> {
    match category_id {
        Loose::Typed(_) => Ok(()),
        Loose::Mistyped(_) if category_id.is_null() => Ok(()),
        Loose::Mistyped(_) => Err(rule_error("type", "Category ID must be a string")),
    }
}

fn validate_nullable_category_id(
    category_id: &Loose<Option<String>>,
) -> Result<(), ValidationError> {
    match category_id {
        Loose::Typed(_) => Ok(()),
        Loose::Mistyped(_) => Err(rule_error("type", "Category ID must be a string")),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Parse an ISO 8601 date (`2025-03-01`) or date-time. Date-times without
/// an offset, including the `datetime-local` form `2025-03-01T09:30`, are
/// taken as UTC.
pub fn parse_due_date(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn text_of(field: &Option<Loose<String>>) -> Option<&str> {
    field.as_ref().and_then(Loose::as_str)
}

fn flag_of(field: &Option<Loose<bool>>) -> Option<bool> {
    field.as_ref().and_then(Loose::typed).copied()
}

fn parse_priority_or(token: Option<&str>, fallback: Priority) -> Priority {
    token.and_then(|t| t.parse().ok()).unwrap_or(fallback)
}

/// Trim free text; blank text is stored as `None`.
fn normalize_text(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// An empty category reference means "no category".
fn normalize_id(id: Option<&str>) -> Option<EntityId> {
    normalize_text(id)
}

/// Deserialize a field that is present (possibly `null`) into `Some(..)`.
/// Combined with `#[serde(default)]` an absent field stays `None`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
