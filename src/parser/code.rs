use regex::Regex;
use std::sync::LazyLock;

/// A triple-backtick fenced region, non-greedy so adjacent fences stay separate
static FENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(.*?)```").expect("valid fence regex"));

/// Interiors of all fenced code regions, in order, without fences or language tags
pub fn extract_code_blocks(text: &str) -> Vec<String> {
    FENCE_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| strip_language_tag(m.as_str()).trim().to_string())
        .collect()
}

/// Prose following the last fenced region (the whole text if there is none), trimmed
pub fn extract_explanation(text: &str) -> String {
    let tail = match FENCE_RE.find_iter(text).last() {
        Some(m) => &text[m.end()..],
        None => text,
    };
    tail.trim().to_string()
}

/// Drop a language tag like `python` or `c++` sitting alone on the opening fence line
fn strip_language_tag(interior: &str) -> &str {
    match interior.split_once('\n') {
        Some((first, rest)) if is_language_tag(first.trim_end()) => rest,
        _ => interior,
    }
}

fn is_language_tag(s: &str) -> bool {
    s.is_empty()
        || s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '+' | '#' | '.' | '-'))
}
