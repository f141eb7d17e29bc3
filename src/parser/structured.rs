use super::payload::StructuredReview;
use super::{BackendReview, Category, Finding};

/// One finding per non-blank line
pub fn split_lines(text: &str) -> Vec<Finding> {
    text.lines().filter_map(Finding::new).collect()
}

/// Convert pre-partitioned fields into (fast, deep) reviews. No classification.
pub fn parse_structured(review: &StructuredReview) -> (BackendReview, BackendReview) {
    let mut fast = BackendReview::default();
    let mut deep = BackendReview::default();

    for category in Category::FINDINGS {
        let Some(pair) = review.field(category) else {
            continue;
        };
        if let Some(bucket) = fast.bucket_mut(category) {
            *bucket = split_lines(&pair.fast);
        }
        if let Some(bucket) = deep.bucket_mut(category) {
            *bucket = split_lines(&pair.deep);
        }
    }

    (fast, deep)
}
