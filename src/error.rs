use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuorevError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Payload error: {0}")]
    Payload(#[from] PayloadError),

    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("Runner error: {0}")]
    Runner(#[from] RunnerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Backend marker '{0}' must not be empty")]
    EmptyMarker(&'static str),

    #[error("Fast and deep backend markers must differ (both are '{0}')")]
    DuplicateMarker(String),

    #[error("Section label '{0}' must not be empty")]
    EmptySectionLabel(&'static str),

    #[error("Invalid filename pattern '{pattern}': {source}")]
    GlobPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

/// Raised when the top-level payload matches neither accepted shape.
///
/// This is distinct from an empty collection: a payload that parses but carries
/// no findings is not an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Invalid payload shape: {0}")]
    InvalidPayloadShape(String),
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to read payload file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Fetch command timed out after {0:?}")]
    Timeout(std::time::Duration),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Fetch command failed with exit code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

impl SourceError {
    /// Whether another attempt could succeed. Exit codes 126 and 127 mean the
    /// shell could not run the command at all.
    pub fn is_transient(&self) -> bool {
        match self {
            SourceError::ReadFile { .. } => false,
            SourceError::NonZeroExit { code, .. } => !matches!(code, 126 | 127),
            SourceError::Timeout(_) | SourceError::Io(_) => true,
        }
    }
}

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("Failed to walk directory: {0}")]
    Walk(#[from] ignore::Error),

    #[error("Input directory not found: {0}")]
    MissingDir(PathBuf),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("No payload files found under {0}")]
    NoPayloads(PathBuf),

    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),

    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),
}
