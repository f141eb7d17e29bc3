use super::finding::{Backend, Category, Finding};
use serde::{Deserialize, Serialize};

/// Which input shape a file review was derived from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
    RawBlock,
    StructuredField,
}

/// Everything one reviewer said about one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct BackendReview {
    pub bugs: Vec<Finding>,
    pub code_style: Vec<Finding>,
    pub security: Vec<Finding>,
    pub suggestions: Vec<Finding>,
    pub code_blocks: Vec<String>,
    pub explanation: String,
}

impl BackendReview {
    /// Findings in a category; `CodeBlocks` and `Explanation` have none
    pub fn findings(&self, category: Category) -> &[Finding] {
        match category {
            Category::Bugs => &self.bugs,
            Category::CodeStyle => &self.code_style,
            Category::Security => &self.security,
            Category::Suggestions => &self.suggestions,
            Category::CodeBlocks | Category::Explanation => &[],
        }
    }

    pub(crate) fn bucket_mut(&mut self, category: Category) -> Option<&mut Vec<Finding>> {
        match category {
            Category::Bugs => Some(&mut self.bugs),
            Category::CodeStyle => Some(&mut self.code_style),
            Category::Security => Some(&mut self.security),
            Category::Suggestions => Some(&mut self.suggestions),
            Category::CodeBlocks | Category::Explanation => None,
        }
    }

    pub fn finding_count(&self) -> usize {
        Category::FINDINGS
            .iter()
            .map(|c| self.findings(*c).len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.finding_count() == 0 && self.code_blocks.is_empty() && self.explanation.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileReview {
    pub filename: String,
    pub shape: PayloadShape,
    pub fast: BackendReview,
    pub deep: BackendReview,
}

impl FileReview {
    pub fn backend(&self, backend: Backend) -> &BackendReview {
        match backend {
            Backend::Fast => &self.fast,
            Backend::Deep => &self.deep,
        }
    }

    pub fn findings(&self, category: Category, backend: Backend) -> &[Finding] {
        self.backend(backend).findings(category)
    }

    /// Stable identifier for a (file, category, backend) bucket
    pub fn bucket_key(&self, category: Category, backend: Backend) -> String {
        format!("{}::{}::{}", self.filename, category, backend)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FindingCounts {
    pub bugs: usize,
    pub code_style: usize,
    pub security: usize,
    pub suggestions: usize,
    pub code_blocks: usize,
    pub fast: usize,
    pub deep: usize,
}

impl FindingCounts {
    pub fn total(&self) -> usize {
        self.fast + self.deep
    }

    pub fn merge(&mut self, other: &FindingCounts) {
        self.bugs += other.bugs;
        self.code_style += other.code_style;
        self.security += other.security;
        self.suggestions += other.suggestions;
        self.code_blocks += other.code_blocks;
        self.fast += other.fast;
        self.deep += other.deep;
    }

    fn add(&mut self, category: Category, backend: Backend, n: usize) {
        match category {
            Category::Bugs => self.bugs += n,
            Category::CodeStyle => self.code_style += n,
            Category::Security => self.security += n,
            Category::Suggestions => self.suggestions += n,
            Category::CodeBlocks => {
                self.code_blocks += n;
                return;
            }
            Category::Explanation => return,
        }
        match backend {
            Backend::Fast => self.fast += n,
            Backend::Deep => self.deep += n,
        }
    }
}

/// Normalized reviews in payload order. Built once per payload and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewCollection {
    files: Vec<FileReview>,
}

impl ReviewCollection {
    pub fn new(files: Vec<FileReview>) -> Self {
        Self { files }
    }

    /// The collection produced when no payload is available
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[FileReview] {
        &self.files
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FileReview> {
        self.files.iter()
    }

    pub fn get(&self, filename: &str) -> Option<&FileReview> {
        self.files.iter().find(|f| f.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn counts(&self) -> FindingCounts {
        let mut counts = FindingCounts::default();
        for file in &self.files {
            for backend in Backend::ALL {
                let review = file.backend(backend);
                for category in Category::FINDINGS {
                    counts.add(category, backend, review.findings(category).len());
                }
                counts.add(Category::CodeBlocks, backend, review.code_blocks.len());
            }
        }
        counts
    }
}

impl<'a> IntoIterator for &'a ReviewCollection {
    type Item = &'a FileReview;
    type IntoIter = std::slice::Iter<'a, FileReview>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
