//! Where review payloads come from.
//!
//! Fetching is the only asynchronous step; whatever a source returns is handed to
//! the synchronous normalizer as an opaque string. A source that fails means no
//! payload is available.

mod command;
mod retry;

pub use command::CommandSource;
pub use retry::{fetch_with_retry, Backoff};

use crate::config::Config;
use crate::error::SourceError;
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tracing::warn;

#[async_trait]
pub trait PayloadSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(&self) -> Result<String, SourceError>;
}

/// A payload saved to disk
pub struct FileSource {
    pub path: PathBuf,
}

#[async_trait]
impl PayloadSource for FileSource {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SourceError::ReadFile {
                path: self.path.clone(),
                source: e,
            })
    }
}

pub struct StdinSource;

#[async_trait]
impl PayloadSource for StdinSource {
    fn name(&self) -> &'static str {
        "stdin"
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        let mut buf = String::new();
        tokio::io::stdin().read_to_string(&mut buf).await?;
        Ok(buf)
    }
}

/// Pick a source: an explicit input path (`-` for stdin), else the configured
/// fetch command, else stdin
pub fn create_source(config: &Config, input: Option<PathBuf>) -> Arc<dyn PayloadSource> {
    match input {
        Some(path) if path.as_os_str() == "-" => Arc::new(StdinSource),
        Some(path) => Arc::new(FileSource { path }),
        None => match &config.source.command {
            Some(command) => Arc::new(CommandSource {
                command: command.clone(),
                timeout: Duration::from_secs(config.source.timeout_sec),
                retry: config.source.retry.clone(),
            }),
            None => Arc::new(StdinSource),
        },
    }
}

/// Fetch a payload, mapping any failure to "no payload available"
pub async fn fetch_or_none(source: &dyn PayloadSource) -> Option<String> {
    match source.fetch().await {
        Ok(body) => Some(body),
        Err(e) => {
            warn!("No payload available from {} source: {}", source.name(), e);
            None
        }
    }
}
