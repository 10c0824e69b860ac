//! Category entity and create/update payload.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::loose::Loose;
use crate::types::{EntityId, Timestamp};
use crate::validation::{check_trimmed_length, rule_error};

/// Maximum category name length in characters.
pub const MAX_NAME_LEN: usize = 50;

static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex color pattern is valid"));

/// A category annotated with the number of tasks referencing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: EntityId,
    pub name: String,
    pub color: Option<String>,
    pub task_count: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Category {
    /// A category can only be deleted once no task references it.
    pub fn is_deletable(&self) -> bool {
        self.task_count == 0
    }

    /// Message returned when deletion is blocked by referencing tasks.
    pub fn deletion_blocked_message(&self) -> String {
        format!(
            "Cannot delete category with {} associated tasks. \
             Please reassign or delete the tasks first.",
            self.task_count
        )
    }
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
///
/// On update an absent `color` keeps the stored color.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryInput {
    #[serde(default)]
    #[validate(custom(function = "validate_name"))]
    pub name: Loose<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_color"))]
    pub color: Option<Loose<String>>,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, color: Option<&str>) -> Self {
        Self {
            name: Loose::Typed(name.into()),
            color: color.map(|c| Loose::Typed(c.to_string())),
        }
    }

    pub fn trimmed_name(&self) -> &str {
        self.name.as_str().unwrap_or_default().trim()
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_ref().and_then(Loose::as_str)
    }
}

fn validate_name(name: &Loose<String>) -> Result<(), ValidationError> {
    let Some(text) = name.as_str() else {
        return Err(rule_error("required", "Name is required"));
    };
    check_trimmed_length(
        text,
        MAX_NAME_LEN,
        "Name is required",
        "Name must be between 1 and 50 characters",
    )
}

fn validate_color(color: &Loose<String>) -> Result<(), ValidationError> {
    if color.as_str().is_some_and(|c| HEX_COLOR.is_match(c)) {
        return Ok(());
    }
    Err(rule_error(
        "color",
        "Color must be a valid hex color (e.g., #FF5733)",
    ))
}
