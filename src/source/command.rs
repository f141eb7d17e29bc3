use super::retry::fetch_with_retry;
use super::PayloadSource;
use crate::config::RetryConfig;
use crate::error::SourceError;
use async_trait::async_trait;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout as tokio_timeout;
use tracing::debug;

/// Runs a shell command (e.g. a `curl` against the review service) and reads the
/// payload from its stdout
pub struct CommandSource {
    pub command: String,
    pub timeout: Duration,
    pub retry: RetryConfig,
}

impl CommandSource {
    async fn run_once(&self) -> Result<String, SourceError> {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        };
        cmd.arg(&self.command).kill_on_drop(true);

        let start = std::time::Instant::now();

        let output = tokio_timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| SourceError::Timeout(self.timeout))?
            .map_err(SourceError::Io)?;

        debug!(
            "Fetch command finished in {:?} with {:?}",
            start.elapsed(),
            output.status.code()
        );

        if !output.status.success() {
            return Err(SourceError::NonZeroExit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl PayloadSource for CommandSource {
    fn name(&self) -> &'static str {
        "command"
    }

    async fn fetch(&self) -> Result<String, SourceError> {
        fetch_with_retry(&self.retry, || self.run_once()).await
    }
}
