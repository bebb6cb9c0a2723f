mod export;

pub use export::{
    ExportFormat, export_history, write_history_csv, write_history_json, write_summary_json,
};
