//! Task engine - core task management logic
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::{debug, info};

use crate::core::shared::error::AppError;
use crate::core::shared::schema::tasks::dsl;
use crate::core::shared::utils::DbPool;
use crate::tasks::types::*;

#[derive(Debug, Clone)]
pub struct TaskEngine {
    db: DbPool,
}

fn normalize_create(request: CreateTaskRequest) -> Result<(String, Option<String>), AppError> {
    let title = request.title.trim().to_string();
    if title.is_empty() {
        return Err(AppError::Validation("Task title is required".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation(format!(
            "Task title must be at most {MAX_TITLE_LEN} characters"
        )));
    }

    let description = request
        .description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());
    if let Some(ref d) = description {
        if d.chars().count() > MAX_DESCRIPTION_LEN {
            return Err(AppError::Validation(format!(
                "Task description must be at most {MAX_DESCRIPTION_LEN} characters"
            )));
        }
    }

    Ok((title, description))
}

impl TaskEngine {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    async fn with_conn<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T, AppError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.db.clone();
        tokio::task::spawn_blocking(move || {
            let mut db_conn = conn.get()?;
            f(&mut db_conn)
        })
        .await?
    }

    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<Task, AppError> {
        let (title, description) = normalize_create(request)?;

        let task = self
            .with_conn(move |conn| {
                Ok(diesel::insert_into(dsl::tasks)
                    .values(&NewTask {
                        title: &title,
                        description: description.as_deref(),
                        completed: false,
                    })
                    .returning(Task::as_returning())
                    .get_result(conn)?)
            })
            .await?;

        info!("Created task {} ({:?})", task.id, task.title);
        Ok(task)
    }

    /// All tasks in insertion order.
    pub async fn list_all(&self) -> Result<Vec<Task>, AppError> {
        self.list_by_criterion(SortCriterion::All).await
    }

    pub async fn list_by_criterion(&self, criterion: SortCriterion) -> Result<Vec<Task>, AppError> {
        debug!("Listing tasks by {:?}", criterion);
        self.with_conn(move |conn| {
            let query = dsl::tasks.select(Task::as_select());
            let rows = match criterion {
                SortCriterion::Alphabetical => {
                    query.order((dsl::title.asc(), dsl::id.asc())).load(conn)?
                }
                SortCriterion::Completed => query
                    .filter(dsl::completed.eq(true))
                    .order(dsl::id.asc())
                    .load(conn)?,
                SortCriterion::NotCompleted => query
                    .filter(dsl::completed.eq(false))
                    .order(dsl::id.asc())
                    .load(conn)?,
                SortCriterion::All => query.order(dsl::id.asc()).load(conn)?,
            };
            Ok(rows)
        })
        .await
    }

    /// Sets `completed`; calling it again on a completed task is a no-op success.
    pub async fn mark_complete(&self, task_id: i32) -> Result<Task, AppError> {
        let task = self
            .with_conn(move |conn| {
                diesel::update(dsl::tasks.find(task_id))
                    .set(dsl::completed.eq(true))
                    .returning(Task::as_returning())
                    .get_result(conn)
                    .optional()?
                    .ok_or_else(|| AppError::NotFound(format!("task {task_id}")))
            })
            .await?;

        info!("Marked task {} complete", task.id);
        Ok(task)
    }

    /// Round trip to the store, used by the health probe.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.with_conn(|conn| {
            diesel::sql_query("SELECT 1").execute(conn)?;
            Ok(())
        })
        .await
    }

    pub async fn delete_task(&self, task_id: i32) -> Result<(), AppError> {
        let deleted = self
            .with_conn(move |conn| Ok(diesel::delete(dsl::tasks.find(task_id)).execute(conn)?))
            .await?;

        if deleted == 0 {
            return Err(AppError::NotFound(format!("task {task_id}")));
        }
        info!("Deleted task {}", task_id);
        Ok(())
    }
}
