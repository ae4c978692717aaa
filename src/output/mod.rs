pub mod json;
pub mod report;
pub mod summary;

pub use json::JsonFormat;
pub use report::{write_report, ReportFiles};
pub use summary::{format_summary, SummaryFormat};
