//! Domain types, request validation, and pure view logic for Taskboard.
//!
//! This crate has no database or HTTP dependencies so that both the API
//! server and the web frontend can share it.

pub mod board;
pub mod category;
pub mod error;
pub mod loose;
pub mod query;
pub mod task;
pub mod types;
pub mod validation;
