mod html;
mod report;
mod summary;

pub use html::render_html;
pub use report::{render_markdown, write_collection_report};
pub use summary::{write_summary, SummaryReport};
