mod classify;
mod code;
mod finding;
mod format;
mod payload;
mod raw;
mod review;
mod section;
mod structured;

pub use classify::Classifier;
pub use code::{extract_code_blocks, extract_explanation};
pub use finding::{Backend, Category, Finding};
pub use format::format_content;
pub use payload::{FieldPair, ReviewPayload, StructuredReview};
pub use raw::{parse_block, split_backends};
pub use review::{BackendReview, FileReview, FindingCounts, PayloadShape, ReviewCollection};
pub use section::{extract_section, split_points};
pub use structured::split_lines;

use crate::config::{Config, MarkerConfig, SectionConfig};
use crate::discovery::FileFilter;
use crate::error::{ConfigError, PayloadError};
use tracing::debug;

/// Turns review payloads into a [`ReviewCollection`]
#[derive(Debug, Clone)]
pub struct Normalizer {
    markers: MarkerConfig,
    sections: SectionConfig,
    classifier: Classifier,
    filter: FileFilter,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            markers: MarkerConfig::default(),
            sections: SectionConfig::default(),
            classifier: Classifier::default(),
            filter: FileFilter::allow_all(),
        }
    }
}

impl Normalizer {
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            markers: config.markers.clone(),
            sections: config.sections.clone(),
            classifier: Classifier::new(&config.keywords),
            filter: FileFilter::new(&config.include, &config.exclude)?,
        })
    }

    /// Normalize a JSON response body. A blank body or `null` review yields an
    /// empty collection; a body of any other shape is an error.
    pub fn normalize_str(&self, raw: &str) -> Result<ReviewCollection, PayloadError> {
        match ReviewPayload::parse(raw)? {
            Some(payload) => Ok(self.normalize(&payload)),
            None => {
                debug!("No payload available");
                Ok(ReviewCollection::empty())
            }
        }
    }

    pub fn normalize(&self, payload: &ReviewPayload) -> ReviewCollection {
        let files = match payload {
            ReviewPayload::RawBlock(entries) => entries
                .iter()
                .filter(|(name, _)| self.keep(name))
                .map(|(filename, text)| self.normalize_raw(filename, text))
                .collect(),
            ReviewPayload::StructuredField(entries) => entries
                .iter()
                .filter(|(name, _)| self.keep(name))
                .map(|(filename, fields)| {
                    let (fast, deep) = structured::parse_structured(fields);
                    FileReview {
                        filename: filename.clone(),
                        shape: PayloadShape::StructuredField,
                        fast,
                        deep,
                    }
                })
                .collect(),
        };

        ReviewCollection::new(files)
    }

    /// Normalize a single raw-block review
    pub fn normalize_raw(&self, filename: &str, text: &str) -> FileReview {
        let (fast, deep) = raw::parse_raw(text, &self.markers, &self.sections, &self.classifier);
        debug!(
            "{}: {} fast / {} deep findings",
            filename,
            fast.finding_count(),
            deep.finding_count()
        );
        FileReview {
            filename: filename.to_string(),
            shape: PayloadShape::RawBlock,
            fast,
            deep,
        }
    }

    fn keep(&self, filename: &str) -> bool {
        let keep = self.filter.is_match(filename);
        if !keep {
            debug!("Skipping {} (filtered)", filename);
        }
        keep
    }
}
