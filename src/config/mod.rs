mod defaults;
mod types;

pub use types::*;

use crate::discovery::FileFilter;
use crate::error::ConfigError;
use defaults::*;
use std::path::Path;
use tracing::debug;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            markers: MarkerConfig::default(),
            sections: SectionConfig::default(),
            keywords: KeywordConfig::default(),
            source: SourceConfig::default(),
            concurrency: default_concurrency(),
            report_dir: default_report_dir(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Load config if the file exists, otherwise fall back to built-in defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.markers.fast.trim().is_empty() {
            return Err(ConfigError::EmptyMarker("fast"));
        }
        if self.markers.deep.trim().is_empty() {
            return Err(ConfigError::EmptyMarker("deep"));
        }
        if self.markers.fast == self.markers.deep {
            return Err(ConfigError::DuplicateMarker(self.markers.fast.clone()));
        }

        let labels = [
            ("bugs", &self.sections.bugs),
            ("code_style", &self.sections.code_style),
            ("security", &self.sections.security),
            ("suggestions", &self.sections.suggestions),
        ];
        for (name, label) in labels {
            if label.trim().is_empty() {
                return Err(ConfigError::EmptySectionLabel(name));
            }
        }

        // Surfaces bad globs here rather than halfway through a run
        FileFilter::new(&self.include, &self.exclude)?;

        Ok(())
    }
}
