use crate::error::ConfigError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Include/exclude glob sets over reviewed filenames
#[derive(Debug, Clone)]
pub struct FileFilter {
    include: GlobSet,
    exclude: GlobSet,
    has_include: bool,
}

impl FileFilter {
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, ConfigError> {
        Ok(Self {
            include: build_set(include)?,
            exclude: build_set(exclude)?,
            has_include: !include.is_empty(),
        })
    }

    pub fn allow_all() -> Self {
        Self {
            include: GlobSet::empty(),
            exclude: GlobSet::empty(),
            has_include: false,
        }
    }

    pub fn is_match(&self, name: impl AsRef<Path>) -> bool {
        let name = name.as_ref();
        if self.has_include && !self.include.is_match(name) {
            return false;
        }
        !self.exclude.is_match(name)
    }
}

fn build_set(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|e| ConfigError::GlobPattern {
            pattern: pattern.clone(),
            source: e,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|e| ConfigError::GlobPattern {
        pattern: patterns.join(", "),
        source: e,
    })
}
