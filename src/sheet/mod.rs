pub mod export;

pub use export::{export_all, export_tasks_to_xlsx, EXPORT_FILENAME, XLSX_MIME};
