//! Server-rendered frontend for the taskboard API.
//!
//! Pages fetch the full task and category lists from the backend, derive
//! the visible view with [`taskboard_core::board`], and send every mutation
//! through the backend before merging the returned record. The `/api/*`
//! routes proxy straight to the backend for script clients.

pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod pages;
pub mod proxy;
pub mod render;
pub mod router;
pub mod state;
