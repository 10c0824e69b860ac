//! Database row structs.
//!
//! Each submodule contains a `FromRow` struct matching the columns its
//! repository selects, plus the conversion into the shared domain type
//! from `taskboard_core`.

pub mod category;
pub mod task;
