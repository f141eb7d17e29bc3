use super::classify::Classifier;
use super::code::{extract_code_blocks, extract_explanation};
use super::section::{extract_section, has_any_heading};
use super::BackendReview;
use crate::config::{MarkerConfig, SectionConfig};
use tracing::debug;

/// Split one file's combined review text into (fast, deep) sub-blocks.
///
/// The fast block runs from its marker to the deep marker (or the end of the text);
/// the deep block is everything after the deep marker. An absent marker gives an
/// empty block.
pub fn split_backends<'a>(
    text: &'a str,
    fast_marker: &str,
    deep_marker: &str,
) -> (&'a str, &'a str) {
    let fast = match text.find(fast_marker) {
        Some(pos) => {
            let rest = &text[pos + fast_marker.len()..];
            match rest.find(deep_marker) {
                Some(end) => &rest[..end],
                None => rest,
            }
        }
        None => "",
    };

    let deep = match text.find(deep_marker) {
        Some(pos) => &text[pos + deep_marker.len()..],
        None => "",
    };

    (fast, deep)
}

/// Parse one backend's sub-block.
///
/// Blocks with bold section headings are read section by section; anything else
/// goes through the keyword classifier over the trailing explanation.
pub fn parse_block(
    block: &str,
    sections: &SectionConfig,
    classifier: &Classifier,
) -> BackendReview {
    let mut review = BackendReview {
        code_blocks: extract_code_blocks(block),
        explanation: extract_explanation(block),
        ..Default::default()
    };

    let labels = [
        sections.bugs.as_str(),
        sections.code_style.as_str(),
        sections.security.as_str(),
        sections.suggestions.as_str(),
    ];

    if has_any_heading(block, &labels) {
        review.bugs = extract_section(block, &sections.bugs);
        review.code_style = extract_section(block, &sections.code_style);
        review.security = extract_section(block, &sections.security);
        review.suggestions = extract_section(block, &sections.suggestions);
    } else {
        debug!("No section headings in block, classifying by keyword");
        let explanation = review.explanation.clone();
        classifier.classify_into(&explanation, &mut review);
    }

    review
}

/// Parse a full raw-block review for one file into (fast, deep)
pub fn parse_raw(
    text: &str,
    markers: &MarkerConfig,
    sections: &SectionConfig,
    classifier: &Classifier,
) -> (BackendReview, BackendReview) {
    let (fast, deep) = split_backends(text, &markers.fast, &markers.deep);
    (
        parse_block(fast, sections, classifier),
        parse_block(deep, sections, classifier),
    )
}
