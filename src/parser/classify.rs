//! Keyword fallback for reviewers that answer without the expected headings.
//!
//! Each point is checked against the security, bug, style and suggestion keyword
//! sets in that order and lands in the first set that matches. Points matching
//! nothing go to suggestions, so every point ends up in exactly one bucket.

use super::section::split_points;
use super::{BackendReview, Category, Finding};
use crate::config::KeywordConfig;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct Classifier {
    /// Checked in order; first match wins
    rules: Vec<(Category, Vec<String>)>,
}

impl Classifier {
    pub fn new(keywords: &KeywordConfig) -> Self {
        let lower = |words: &[String]| -> Vec<String> {
            words
                .iter()
                .map(|w| w.trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect()
        };

        Self {
            rules: vec![
                (Category::Security, lower(&keywords.security)),
                (Category::Bugs, lower(&keywords.bugs)),
                (Category::CodeStyle, lower(&keywords.style)),
                (Category::Suggestions, lower(&keywords.suggestions)),
            ],
        }
    }

    /// Category for a single point
    pub fn classify(&self, point: &str) -> Category {
        self.rules
            .iter()
            .find(|(_, words)| words.iter().any(|w| contains_word_prefix(point, w)))
            .map(|(category, _)| *category)
            .unwrap_or(Category::Suggestions)
    }

    /// Split free text into points and bucket each one into `review`
    pub fn classify_into(&self, text: &str, review: &mut BackendReview) {
        for point in split_points(text) {
            let category = self.classify(point.as_str());
            debug!("Classified {:?} as {}", point.as_str(), category);
            push(review, category, point);
        }
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(&KeywordConfig::default())
    }
}

fn push(review: &mut BackendReview, category: Category, finding: Finding) {
    match review.bucket_mut(category) {
        Some(bucket) => bucket.push(finding),
        None => review.suggestions.push(finding),
    }
}

/// Case-insensitive search for `keyword` starting at a word boundary.
///
/// A boundary is the start of the text, any position after a non-alphanumeric
/// character, or a lower-to-upper case change (`TypeError` contains `error`, but
/// `renaming` does not contain `naming`). `keyword` must already be lowercase.
fn contains_word_prefix(text: &str, keyword: &str) -> bool {
    let mut prev: Option<char> = None;
    for (idx, ch) in text.char_indices() {
        let boundary = match prev {
            None => true,
            Some(p) => !p.is_alphanumeric() || (p.is_lowercase() && ch.is_uppercase()),
        };
        if boundary && starts_with_lowercase(&text[idx..], keyword) {
            return true;
        }
        prev = Some(ch);
    }
    false
}

fn starts_with_lowercase(haystack: &str, keyword: &str) -> bool {
    let mut hay = haystack.chars().flat_map(char::to_lowercase);
    keyword.chars().all(|k| hay.next() == Some(k))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(findings: &[Finding]) -> Vec<&str> {
        findings.iter().map(|f| f.as_str()).collect()
    }

    #[test]
    fn test_each_class_in_isolation() {
        let c = Classifier::default();
        assert_eq!(c.classify("The API key is hardcoded"), Category::Security);
        assert_eq!(c.classify("Credentials are logged"), Category::Security);
        assert_eq!(c.classify("This raises an error on empty input"), Category::Bugs);
        assert_eq!(c.classify("Incorrect loop bound"), Category::Bugs);
        assert_eq!(c.classify("Formatting is inconsistent"), Category::CodeStyle);
        assert_eq!(c.classify("Readability suffers here"), Category::CodeStyle);
        assert_eq!(c.classify("Consider caching results"), Category::Suggestions);
        assert_eq!(c.classify("An enhancement would be nice"), Category::Suggestions);
    }

    #[test]
    fn test_security_beats_bug() {
        let c = Classifier::default();
        assert_eq!(
            c.classify("Fix the security bug in login"),
            Category::Security
        );
        assert_eq!(c.classify("Bug: token exposed in logs"), Category::Security);
    }

    #[test]
    fn test_bug_beats_style_and_suggestion() {
        let c = Classifier::default();
        assert_eq!(
            c.classify("Consider a fix for the naming problem"),
            Category::Bugs
        );
    }

    #[test]
    fn test_unmatched_defaults_to_suggestions() {
        let c = Classifier::default();
        assert_eq!(c.classify("Looks reasonable overall"), Category::Suggestions);
    }

    #[test]
    fn test_word_prefix_matching() {
        assert!(contains_word_prefix("Possible SQL injection here", "injection"));
        assert!(contains_word_prefix("raises TypeError", "error"));
        assert!(contains_word_prefix("several bugs remain", "bug"));
        assert!(contains_word_prefix("(Security) note", "security"));
        assert!(!contains_word_prefix("Consider renaming x", "naming"));
        assert!(!contains_word_prefix("prefix", "fix"));
        assert!(contains_word_prefix("Hardcoded API KEY", "api key"));
    }

    #[test]
    fn test_keywords_inside_compound_words_do_not_match() {
        let c = Classifier::default();
        assert_eq!(c.classify("debugging output left in"), Category::Suggestions);
        assert_eq!(c.classify("cybersecurity hardening"), Category::Suggestions);
        assert_eq!(c.classify("needs a hotfix"), Category::Suggestions);

        // a keyword opening a compound, or after a case change, still counts
        assert_eq!(c.classify("bugfix pending"), Category::Bugs);
        assert_eq!(c.classify("CyberSecurity hardening"), Category::Security);
    }

    #[test]
    fn test_classify_into_buckets() {
        let c = Classifier::default();
        let mut review = BackendReview::default();
        c.classify_into(
            "1. Possible SQL injection in query builder\n2. Consider renaming variable x to total",
            &mut review,
        );
        assert_eq!(
            texts(&review.security),
            vec!["Possible SQL injection in query builder"]
        );
        assert_eq!(
            texts(&review.suggestions),
            vec!["Consider renaming variable x to total"]
        );
        assert!(review.bugs.is_empty());
        assert!(review.code_style.is_empty());
    }

    #[test]
    fn test_no_point_dropped() {
        let c = Classifier::default();
        let mut review = BackendReview::default();
        c.classify_into(
            "Overview line\n* bug in parser\n* odd naming\n* nothing special\n* exposed secret",
            &mut review,
        );
        assert_eq!(review.finding_count(), 5);
        assert_eq!(review.bugs.len(), 1);
        assert_eq!(review.code_style.len(), 1);
        assert_eq!(review.security.len(), 1);
        assert_eq!(review.suggestions.len(), 2);
    }

    #[test]
    fn test_custom_keywords() {
        let keywords = KeywordConfig {
            security: vec!["XSS".to_string()],
            bugs: vec![],
            style: vec![],
            suggestions: vec![],
        };
        let c = Classifier::new(&keywords);
        assert_eq!(c.classify("reflected xss"), Category::Security);
        assert_eq!(c.classify("there is a bug"), Category::Suggestions);
    }
}
