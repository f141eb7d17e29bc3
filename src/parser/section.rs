use super::Finding;
use regex::Regex;
use std::sync::LazyLock;

/// Bold heading of the form `**Label:**`
static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^*\n]+?):\*\*").expect("valid heading regex"));

/// A bold heading that opens a line; bold labels inside list items do not count
static LINE_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*\*\*[^*\n]+?:\*\*").expect("valid line heading regex")
});

/// Numbered (`1. `) or bulleted (`* `) list marker at the start of the span or a line
static ITEM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\n)[ \t]*(?:\d+\.|\*)[ \t]+").expect("valid item regex"));

/// Extract the findings listed under `**<label>:**`
///
/// The section runs until the next bold heading at the start of a line, or the end
/// of the text. A missing
/// heading yields no findings.
pub fn extract_section(text: &str, label: &str) -> Vec<Finding> {
    match section_span(text, label) {
        Some(span) => split_points(span),
        None => Vec::new(),
    }
}

/// Raw text of a section, without its heading
pub fn section_span<'a>(text: &'a str, label: &str) -> Option<&'a str> {
    let wanted = label.trim().to_lowercase();
    let mut headings = HEADING_RE.captures_iter(text);

    let start = headings.find_map(|caps| {
        let found = caps.get(1)?;
        if found.as_str().trim().to_lowercase() == wanted {
            caps.get(0).map(|m| m.end())
        } else {
            None
        }
    })?;

    let end = LINE_HEADING_RE
        .find_at(text, start)
        .map(|m| m.start())
        .unwrap_or(text.len());

    Some(&text[start..end])
}

/// True if any of `labels` appears as a bold heading
pub fn has_any_heading(text: &str, labels: &[&str]) -> bool {
    let wanted: Vec<String> = labels.iter().map(|l| l.trim().to_lowercase()).collect();
    HEADING_RE.captures_iter(text).any(|caps| {
        caps.get(1)
            .map(|m| wanted.contains(&m.as_str().trim().to_lowercase()))
            .unwrap_or(false)
    })
}

/// Split a list-shaped span into trimmed, non-empty points
pub fn split_points(span: &str) -> Vec<Finding> {
    ITEM_RE.split(span).filter_map(Finding::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.as_str()).collect()
    }

    #[test]
    fn test_numbered_section() {
        let block = "\n**Bugs or Errors:**\n1. off-by-one in loop\n2. missing `return`\n\n**Code Style:**\n* long lines\n";
        let bugs = extract_section(block, "Bugs or Errors");
        assert_eq!(texts(&bugs), vec!["off-by-one in loop", "missing `return`"]);

        let style = extract_section(block, "Code Style");
        assert_eq!(texts(&style), vec!["long lines"]);
    }

    #[test]
    fn test_heading_is_case_insensitive() {
        let block = "**SECURITY CONCERNS:**\n* hardcoded token";
        let found = extract_section(block, "Security Concerns");
        assert_eq!(texts(&found), vec!["hardcoded token"]);
    }

    #[test]
    fn test_missing_heading_is_empty() {
        let block = "**Code Style:**\n* fine";
        assert!(extract_section(block, "Bugs or Errors").is_empty());
        assert!(extract_section("", "Bugs or Errors").is_empty());
    }

    #[test]
    fn test_count_matches_markers() {
        let block = "**Suggestions for Improvement:**\n1. a\n2. b\n3. c\n4. d\n";
        let found = extract_section(block, "Suggestions for Improvement");
        assert_eq!(found.len(), 4);
        for finding in &found {
            assert!(!finding.as_str().starts_with(|c: char| c.is_ascii_digit()));
            assert!(!finding.as_str().starts_with('*'));
        }
    }

    #[test]
    fn test_bold_inside_item_is_kept() {
        let block = "**Bugs or Errors:**\n* **Division by zero** when `n` is 0\n* plain";
        let found = extract_section(block, "Bugs or Errors");
        assert_eq!(
            texts(&found),
            vec!["**Division by zero** when `n` is 0", "plain"]
        );
    }

    #[test]
    fn test_bold_label_items_stay_in_section() {
        let block = "**Bugs or Errors:**\n* **Division by zero:** when n is 0\n* **Off by one:** in loop\n\n**Code Style:**\n* ok";
        let bugs = extract_section(block, "Bugs or Errors");
        assert_eq!(
            texts(&bugs),
            vec![
                "**Division by zero:** when n is 0",
                "**Off by one:** in loop"
            ]
        );
        assert_eq!(texts(&extract_section(block, "Code Style")), vec!["ok"]);
    }

    #[test]
    fn test_indented_heading_ends_section() {
        let block = "**Bugs or Errors:**\n1. leak\n  **Security Concerns:**\n1. token in log";
        assert_eq!(texts(&extract_section(block, "Bugs or Errors")), vec!["leak"]);
        assert_eq!(
            texts(&extract_section(block, "Security Concerns")),
            vec!["token in log"]
        );
    }

    #[test]
    fn test_inline_text_after_heading() {
        let block = "**Security Concerns:** None found.\n**Code Style:**\n* ok";
        let found = extract_section(block, "Security Concerns");
        assert_eq!(texts(&found), vec!["None found."]);
    }

    #[test]
    fn test_multiline_item_stays_together() {
        let block = "**Bugs or Errors:**\n1. first line\n   continues here\n2. second";
        let found = extract_section(block, "Bugs or Errors");
        assert_eq!(found.len(), 2);
        assert!(found[0].as_str().contains("continues here"));
    }

    #[test]
    fn test_has_any_heading() {
        let labels = ["Bugs or Errors", "Code Style"];
        assert!(has_any_heading("x\n**code style:**\n* y", &labels));
        assert!(!has_any_heading("**Bugs:** nope", &labels));
        assert!(!has_any_heading("1. plain list", &labels));
    }

    #[test]
    fn test_split_points_leading_marker() {
        let points = split_points("1. first\n2. second");
        assert_eq!(texts(&points), vec!["first", "second"]);
    }
}
