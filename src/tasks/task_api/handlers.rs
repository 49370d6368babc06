//! HTTP handlers for the task pages and JSON listing
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{Html, IntoResponse, Json, Redirect};
use axum::routing::get;
use axum::{Form, Router};
use log::{info, warn};
use std::sync::Arc;

use crate::core::middleware::CurrentUser;
use crate::core::shared::error::AppError;
use crate::core::shared::state::AppState;
use crate::sheet::{export_all, EXPORT_FILENAME, XLSX_MIME};
use crate::tasks::task_api::html_renderers;
use crate::tasks::types::{CreateTaskRequest, SortCriterion, TaskListResponse};

const INDEX_PATH: &str = "/index";

pub async fn index_page(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Html<String>, AppError> {
    let username = state
        .credentials
        .find_by_id(user.user_id)
        .await?
        .map(|u| u.username)
        .unwrap_or_default();
    let tasks = state.tasks.list_all().await?;

    Ok(Html(html_renderers::build_task_list_page(&username, &tasks)))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<CreateTaskRequest>,
) -> Result<Redirect, AppError> {
    state.tasks.create_task(payload).await.inspect_err(|e| {
        warn!("Failed to create task: {}", e);
    })?;
    Ok(Redirect::to(INDEX_PATH))
}

pub async fn complete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.tasks.mark_complete(task_id).await?;
    Ok(Redirect::to(INDEX_PATH))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(task_id): Path<i32>,
) -> Result<Redirect, AppError> {
    state.tasks.delete_task(task_id).await?;
    Ok(Redirect::to(INDEX_PATH))
}

pub async fn download_excel(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let bytes = export_all(&state.tasks).await?;
    info!(
        "User {} exported {} bytes of tasks",
        user.user_id,
        bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        bytes,
    ))
}

pub async fn sort_tasks(
    State(state): State<Arc<AppState>>,
    Path(criteria): Path<String>,
) -> Result<Json<TaskListResponse>, AppError> {
    let criterion = SortCriterion::parse(&criteria);
    let tasks = state.tasks.list_by_criterion(criterion).await?;

    Ok(Json(TaskListResponse {
        tasks: tasks.into_iter().map(Into::into).collect(),
    }))
}

/// Task routes. Every one of them expects [`CurrentUser`] to be resolved by the session guard
/// layered on top in the server router.
pub fn configure_task_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(INDEX_PATH, get(index_page).post(create_task))
        .route("/complete/:task_id", get(complete_task))
        .route("/delete/:task_id", get(delete_task))
        .route("/download_excel", get(download_excel))
        .route("/sort_tasks/:criteria", get(sort_tasks))
}
