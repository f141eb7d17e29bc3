use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub markers: MarkerConfig,

    #[serde(default)]
    pub sections: SectionConfig,

    #[serde(default)]
    pub keywords: KeywordConfig,

    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Only normalize files whose name matches one of these globs (empty = all)
    #[serde(default)]
    pub include: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

/// Sentinel lines that separate the two reviewer outputs in a raw block
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct MarkerConfig {
    #[serde(default = "default_fast_marker")]
    pub fast: String,

    #[serde(default = "default_deep_marker")]
    pub deep: String,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            fast: default_fast_marker(),
            deep: default_deep_marker(),
        }
    }
}

/// Labels of the bold `**Label:**` headings reviewers emit
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SectionConfig {
    #[serde(default = "default_bugs_label")]
    pub bugs: String,

    #[serde(default = "default_code_style_label")]
    pub code_style: String,

    #[serde(default = "default_security_label")]
    pub security: String,

    #[serde(default = "default_suggestions_label")]
    pub suggestions: String,
}

impl Default for SectionConfig {
    fn default() -> Self {
        Self {
            bugs: default_bugs_label(),
            code_style: default_code_style_label(),
            security: default_security_label(),
            suggestions: default_suggestions_label(),
        }
    }
}

/// Keyword sets for the fallback classifier, checked in field order
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct KeywordConfig {
    #[serde(default = "default_security_keywords")]
    pub security: Vec<String>,

    #[serde(default = "default_bug_keywords")]
    pub bugs: Vec<String>,

    #[serde(default = "default_style_keywords")]
    pub style: Vec<String>,

    #[serde(default = "default_suggestion_keywords")]
    pub suggestions: Vec<String>,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        Self {
            security: default_security_keywords(),
            bugs: default_bug_keywords(),
            style: default_style_keywords(),
            suggestions: default_suggestion_keywords(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SourceConfig {
    /// Shell command whose stdout is the review payload (used when no input is given)
    #[serde(default)]
    pub command: Option<String>,

    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            command: None,
            timeout_sec: default_timeout_sec(),
            retry: RetryConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}
