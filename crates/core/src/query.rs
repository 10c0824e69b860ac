//! Task list query parameters: raw query-string shape, validation, and the
//! typed [`TaskQuery`] consumed by the repository and the board view.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::task::{validate_priority, Priority};
use crate::validation::{rule_error, validate_payload};

// ---------------------------------------------------------------------------
// Status filter
// ---------------------------------------------------------------------------

pub const STATUS_ALL: &str = "all";
pub const STATUS_COMPLETED: &str = "completed";
pub const STATUS_PENDING: &str = "pending";

pub const VALID_STATUSES: &[&str] = &[STATUS_ALL, STATUS_COMPLETED, STATUS_PENDING];

/// Restriction on the completion flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => STATUS_ALL,
            Self::Completed => STATUS_COMPLETED,
            Self::Pending => STATUS_PENDING,
        }
    }

    /// The required value of `completed`, or `None` for no restriction.
    pub fn completed(&self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Completed => Some(true),
            Self::Pending => Some(false),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_ALL => Ok(Self::All),
            STATUS_COMPLETED => Ok(Self::Completed),
            STATUS_PENDING => Ok(Self::Pending),
            other => Err(CoreError::invalid(
                "status",
                format!("Unknown status '{other}'. Valid statuses: {}", VALID_STATUSES.join(", ")),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Sort field and direction
// ---------------------------------------------------------------------------

pub const SORT_CREATED_AT: &str = "createdAt";
pub const SORT_DUE_DATE: &str = "dueDate";
pub const SORT_TITLE: &str = "title";
pub const SORT_PRIORITY: &str = "priority";

pub const VALID_SORT_FIELDS: &[&str] = &[SORT_CREATED_AT, SORT_DUE_DATE, SORT_TITLE, SORT_PRIORITY];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    #[default]
    CreatedAt,
    DueDate,
    Title,
    Priority,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedAt => SORT_CREATED_AT,
            Self::DueDate => SORT_DUE_DATE,
            Self::Title => SORT_TITLE,
            Self::Priority => SORT_PRIORITY,
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SORT_CREATED_AT => Ok(Self::CreatedAt),
            SORT_DUE_DATE => Ok(Self::DueDate),
            SORT_TITLE => Ok(Self::Title),
            SORT_PRIORITY => Ok(Self::Priority),
            other => Err(CoreError::invalid(
                "sortBy",
                format!("Unknown sort field '{other}'. Valid fields: {}", VALID_SORT_FIELDS.join(", ")),
            )),
        }
    }
}

pub const ORDER_ASC: &str = "asc";
pub const ORDER_DESC: &str = "desc";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => ORDER_ASC,
            Self::Desc => ORDER_DESC,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ORDER_ASC => Ok(Self::Asc),
            ORDER_DESC => Ok(Self::Desc),
            other => Err(CoreError::invalid(
                "order",
                format!("Unknown order '{other}'. Valid orders: asc, desc"),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// Query string and typed query
// ---------------------------------------------------------------------------

/// Raw `GET /api/tasks` query string.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_sort_by"))]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(custom(function = "validate_order"))]
    pub order: Option<String>,
}

/// Validated filter and ordering for a task listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    pub category: Option<String>,
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub search: Option<String>,
    pub sort_by: SortField,
    pub order: SortOrder,
}

impl TaskQuery {
    /// Validate the raw parameters, reporting every bad value, then convert.
    ///
    /// Empty `category` and `search` values are treated as absent.
    pub fn from_params(params: &TaskListParams) -> Result<Self, CoreError> {
        validate_payload(params)?;

        Ok(Self {
            category: non_empty(params.category.as_deref()),
            status: params
                .status
                .as_deref()
                .map(str::parse::<StatusFilter>)
                .transpose()?
                .unwrap_or_default(),
            priority: params
                .priority
                .as_deref()
                .map(str::parse::<Priority>)
                .transpose()?,
            search: non_empty(params.search.as_deref()),
            sort_by: params
                .sort_by
                .as_deref()
                .map(str::parse::<SortField>)
                .transpose()?
                .unwrap_or_default(),
            order: params
                .order
                .as_deref()
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

fn validate_status(status: &str) -> Result<(), ValidationError> {
    if VALID_STATUSES.contains(&status) {
        return Ok(());
    }
    Err(rule_error("status", "Status must be all, completed, or pending"))
}

fn validate_sort_by(sort_by: &str) -> Result<(), ValidationError> {
    if VALID_SORT_FIELDS.contains(&sort_by) {
        return Ok(());
    }
    Err(rule_error(
        "sortBy",
        "Sort by must be createdAt, dueDate, title, or priority",
    ))
}

fn validate_order(order: &str) -> Result<(), ValidationError> {
    if order == ORDER_ASC || order == ORDER_DESC {
        return Ok(());
    }
    Err(rule_error("order", "Order must be asc or desc"))
}
