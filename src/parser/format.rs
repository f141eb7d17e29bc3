use regex::Regex;
use std::sync::LazyLock;

static STRONG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid strong regex"));

static CODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`(.*?)`").expect("valid code regex"));

/// Render `**bold**` and `` `code` `` spans of a finding as HTML.
///
/// Everything else, including unpaired markers and existing tags, is left as is,
/// so formatting already formatted text is a no-op.
pub fn format_content(text: &str) -> String {
    let strong = STRONG_RE.replace_all(text, "<strong>$1</strong>");
    CODE_RE.replace_all(&strong, "<code>$1</code>").into_owned()
}
