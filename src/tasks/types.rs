//! Types for the tasks module
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::shared::schema::tasks;

pub const MAX_TITLE_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Task {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = tasks)]
pub(crate) struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskResponse {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.id,
            title: task.title,
            description: task.description,
            completed: task.completed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskListResponse {
    pub tasks: Vec<TaskResponse>,
}

/// Named listing mode for `/sort_tasks/{criteria}`.
///
/// Parsing never fails: an unrecognized name means `All`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    Alphabetical,
    Completed,
    NotCompleted,
    All,
}

impl SortCriterion {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "alphabetical" | "alphabetically" => Self::Alphabetical,
            "completed" => Self::Completed,
            "not_completed" | "notCompleted" => Self::NotCompleted,
            _ => Self::All,
        }
    }
}

impl From<&str> for SortCriterion {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criterion_names_and_aliases() {
        assert_eq!(SortCriterion::parse("alphabetical"), SortCriterion::Alphabetical);
        assert_eq!(SortCriterion::parse("alphabetically"), SortCriterion::Alphabetical);
        assert_eq!(SortCriterion::parse("completed"), SortCriterion::Completed);
        assert_eq!(SortCriterion::parse("not_completed"), SortCriterion::NotCompleted);
        assert_eq!(SortCriterion::parse("notCompleted"), SortCriterion::NotCompleted);
        assert_eq!(SortCriterion::parse("all"), SortCriterion::All);
    }

    #[test]
    fn test_unknown_criterion_falls_back_to_all() {
        assert_eq!(SortCriterion::parse("bogus"), SortCriterion::All);
        assert_eq!(SortCriterion::parse(""), SortCriterion::All);
        assert_eq!(SortCriterion::from("COMPLETED"), SortCriterion::All);
    }

    #[test]
    fn test_task_response_json_shape() {
        let response = TaskListResponse {
            tasks: vec![Task {
                id: 1,
                title: "Buy milk".into(),
                description: None,
                completed: false,
            }
            .into()],
        };
        let json = serde_json::to_value(&response).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({
                "tasks": [{"id": 1, "title": "Buy milk", "description": null, "completed": false}]
            })
        );
    }
}
