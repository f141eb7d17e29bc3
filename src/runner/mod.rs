mod orchestrator;

pub use orchestrator::{BatchReport, Orchestrator, PayloadResult, PayloadStatus};
