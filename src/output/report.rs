use crate::error::OutputError;
use crate::parser::{Backend, BackendReview, Category, FileReview, ReviewCollection};
use std::fs;
use std::path::Path;

/// Render a collection as a Markdown document
pub fn render_markdown(collection: &ReviewCollection) -> String {
    let mut content = String::new();

    let counts = collection.counts();
    content.push_str("# Code Review\n\n");
    content.push_str("| Category | Findings |\n");
    content.push_str("|----------|----------|\n");
    content.push_str(&format!("| Bugs | {} |\n", counts.bugs));
    content.push_str(&format!("| Code Style | {} |\n", counts.code_style));
    content.push_str(&format!("| Security | {} |\n", counts.security));
    content.push_str(&format!("| Suggestions | {} |\n", counts.suggestions));
    content.push_str(&format!("| Files | {} |\n", collection.len()));
    content.push_str("\n---\n\n");

    if collection.is_empty() {
        content.push_str("*No reviews*\n");
        return content;
    }

    for file in collection {
        render_file(&mut content, file);
    }

    content
}

fn render_file(content: &mut String, file: &FileReview) {
    content.push_str(&format!("## `{}`\n\n", file.filename));

    for backend in Backend::ALL {
        let review = file.backend(backend);
        content.push_str(&format!("### {} Review\n\n", backend.source_name()));

        if review.is_empty() {
            content.push_str("*No findings*\n\n");
            continue;
        }

        render_backend(content, review);
    }

    content.push_str("---\n\n");
}

fn render_backend(content: &mut String, review: &BackendReview) {
    for category in Category::FINDINGS {
        let findings = review.findings(category);
        if findings.is_empty() {
            continue;
        }
        content.push_str(&format!("**{}:**\n", category.title()));
        for finding in findings {
            content.push_str(&format!("- {}\n", indent_continuation(finding.as_str())));
        }
        content.push('\n');
    }

    if !review.code_blocks.is_empty() {
        content.push_str(&format!("**{}:**\n\n", Category::CodeBlocks.title()));
        for block in &review.code_blocks {
            content.push_str(&format!("```\n{}\n```\n\n", block));
        }
    }

    if !review.explanation.is_empty() {
        content.push_str(&format!("**{}:**\n\n", Category::Explanation.title()));
        content.push_str(&format!("{}\n\n", review.explanation));
    }
}

/// Keep multi-line findings inside their list item
fn indent_continuation(text: &str) -> String {
    text.lines().map(str::trim).collect::<Vec<_>>().join("\n  ")
}

/// Write `<stem>.md` and `<stem>.review.json` for one normalized payload
pub fn write_collection_report(
    report_dir: &Path,
    stem: &str,
    collection: &ReviewCollection,
) -> Result<(), OutputError> {
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let md_path = report_dir.join(format!("{}.md", stem));
    fs::write(&md_path, render_markdown(collection)).map_err(OutputError::WriteReport)?;

    let json_path = report_dir.join(format!("{}.review.json", stem));
    let json = serde_json::to_string_pretty(collection)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Normalizer;

    fn sample() -> ReviewCollection {
        let text = "==== GROQ REVIEW ====\n**Bugs or Errors:**\n1. off-by-one\n   in loop\n==== GEMINI REVIEW ====\nBetter:\n```python\nx = 1\n```\nUse a constant.";
        let file = Normalizer::default().normalize_raw("app.py", text);
        ReviewCollection::new(vec![file])
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&sample());
        assert!(md.contains("## `app.py`"));
        assert!(md.contains("### GROQ Review"));
        assert!(md.contains("- off-by-one\n  in loop\n"));
        assert!(md.contains("```\nx = 1\n```"));
        assert!(md.contains("**Explanation:**\n\nUse a constant."));
        assert!(md.contains("| Bugs | 1 |"));
    }

    #[test]
    fn test_render_empty() {
        let md = render_markdown(&ReviewCollection::empty());
        assert!(md.contains("*No reviews*"));
    }

    #[test]
    fn test_write_collection_report() {
        let dir = tempfile::tempdir().unwrap();
        write_collection_report(dir.path(), "run1", &sample()).unwrap();

        assert!(dir.path().join("run1.md").exists());
        let json = fs::read_to_string(dir.path().join("run1.review.json")).unwrap();
        let back: ReviewCollection = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
