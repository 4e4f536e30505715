pub mod export_outcome;
pub mod export_request;

pub use export_outcome::{ExportOutcome, ExportReport, ExportStatus};
pub use export_request::{ExportMode, ExportRequest};
