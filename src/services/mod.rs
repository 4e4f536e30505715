pub mod export;
pub mod file_copy;
pub mod file_diff;

pub use export::{run_export, write_report};
pub use file_copy::export_copy;
pub use file_diff::export_diff;
