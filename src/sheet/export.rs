use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::core::shared::error::AppError;
use crate::tasks::{Task, TaskEngine};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "tasks.xlsx";
pub const WORKSHEET_NAME: &str = "All Tasks";
pub const HEADERS: [&str; 3] = ["Status", "Title", "Description"];
const COLUMN_WIDTH: f64 = 20.0;

pub fn status_label(completed: bool) -> &'static str {
    if completed {
        "Completed"
    } else {
        "Not Completed"
    }
}

pub fn task_row(task: &Task) -> [&str; 3] {
    [
        status_label(task.completed),
        task.title.as_str(),
        task.description.as_deref().unwrap_or(""),
    ]
}

pub fn export_tasks_to_xlsx(tasks: &[Task]) -> Result<Vec<u8>, AppError> {
    build_workbook(tasks).map_err(|e| AppError::Export(e.to_string()))
}

fn build_workbook(tasks: &[Task]) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(WORKSHEET_NAME)?;

    for col in 0..HEADERS.len() as u16 {
        worksheet.set_column_width(col, COLUMN_WIDTH)?;
    }

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &bold)?;
    }

    for (idx, task) in tasks.iter().enumerate() {
        let row = idx as u32 + 1;
        for (col, value) in task_row(task).iter().enumerate() {
            worksheet.write_string(row, col as u16, *value)?;
        }
    }

    workbook.save_to_buffer()
}

/// Snapshot of the task list at call time rendered as a complete XLSX document.
pub async fn export_all(engine: &TaskEngine) -> Result<Vec<u8>, AppError> {
    let tasks = engine.list_all().await?;
    let count = tasks.len();
    let buffer = tokio::task::spawn_blocking(move || export_tasks_to_xlsx(&tasks)).await??;
    log::info!("Exported {} tasks ({} bytes)", count, buffer.len());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tasks::CreateTaskRequest;
    use crate::tests::test_util;
    use crate::assert_ok;
    use calamine::{Data, Reader, Xlsx};
    use std::io::Cursor;

    fn read_rows(bytes: Vec<u8>) -> Vec<Vec<String>> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes)).expect("valid xlsx");
        let range = workbook
            .worksheet_range(WORKSHEET_NAME)
            .expect("worksheet present");
        range
            .rows()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell {
                        Data::String(s) => s.clone(),
                        Data::Empty => String::new(),
                        other => other.to_string(),
                    })
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(status_label(true), "Completed");
        assert_eq!(status_label(false), "Not Completed");
    }

    #[test]
    fn test_empty_export_has_header_only() {
        let bytes = assert_ok!(export_tasks_to_xlsx(&[]));
        let rows = read_rows(bytes);
        assert_eq!(rows, vec![vec!["Status", "Title", "Description"]]);
    }

    #[tokio::test]
    async fn test_export_all_rows_follow_store_order() {
        let ctx = test_util::setup();
        let engine = &ctx.state.tasks;
        for title in ["Buy milk", "Clean"] {
            assert_ok!(
                engine
                    .create_task(CreateTaskRequest {
                        title: title.to_string(),
                        description: Some(String::new()),
                    })
                    .await
            );
        }
        let all = assert_ok!(engine.list_all().await);
        assert_ok!(engine.mark_complete(all[1].id).await);

        let rows = read_rows(assert_ok!(export_all(engine).await));

        assert_eq!(
            rows,
            vec![
                vec!["Status", "Title", "Description"],
                vec!["Not Completed", "Buy milk", ""],
                vec!["Completed", "Clean", ""],
            ]
        );
    }

    #[test]
    fn test_description_is_written() {
        let tasks = vec![Task {
            id: 1,
            title: "Report".into(),
            description: Some("Quarterly numbers".into()),
            completed: false,
        }];
        let rows = read_rows(assert_ok!(export_tasks_to_xlsx(&tasks)));
        assert_eq!(rows[1], vec!["Not Completed", "Report", "Quarterly numbers"]);
    }
}
