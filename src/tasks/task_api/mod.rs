//! Task API module - contains task management logic
//!
//! This module is split into:
//! - engine: TaskEngine with the store operations
//! - handlers: HTTP request handlers
//! - html_renderers: HTML building functions for the task list page

pub mod engine;
pub mod handlers;
pub mod html_renderers;

pub use engine::TaskEngine;
pub use handlers::configure_task_routes;
