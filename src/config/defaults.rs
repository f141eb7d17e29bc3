use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_fast_marker() -> String {
    "==== GROQ REVIEW ====".to_string()
}

pub fn default_deep_marker() -> String {
    "==== GEMINI REVIEW ====".to_string()
}

pub fn default_bugs_label() -> String {
    "Bugs or Errors".to_string()
}

pub fn default_code_style_label() -> String {
    "Code Style".to_string()
}

pub fn default_security_label() -> String {
    "Security Concerns".to_string()
}

pub fn default_suggestions_label() -> String {
    "Suggestions for Improvement".to_string()
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|w| w.to_string()).collect()
}

pub fn default_security_keywords() -> Vec<String> {
    // "injection" keeps SQL and command injection remarks out of suggestions
    words(&[
        "security",
        "vulnerability",
        "api key",
        "exposed",
        "credentials",
        "injection",
    ])
}

pub fn default_bug_keywords() -> Vec<String> {
    words(&["bug", "error", "fix", "issue", "problem", "incorrect"])
}

pub fn default_style_keywords() -> Vec<String> {
    words(&[
        "style",
        "formatting",
        "readability",
        "maintainability",
        "naming",
    ])
}

pub fn default_suggestion_keywords() -> Vec<String> {
    words(&["suggestion", "improvement", "enhance", "better", "consider"])
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_timeout_sec() -> u64 {
    120
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    1000
}
