use crate::error::{DuorevError, RunnerError};
use crate::output::write_collection_report;
use crate::parser::{FindingCounts, Normalizer, ReviewCollection};
use crate::source::{FileSource, PayloadSource};
use futures::stream::{FuturesUnordered, StreamExt};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinError;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Debug)]
pub struct BatchReport {
    pub run_id: String,
    pub results: Vec<PayloadResult>,
    pub total_duration: Duration,
}

impl BatchReport {
    pub fn totals(&self) -> FindingCounts {
        let mut counts = FindingCounts::default();
        for result in &self.results {
            counts.merge(&result.collection.counts());
        }
        counts
    }

    pub fn invalid_count(&self) -> usize {
        self.results
            .iter()
            .filter(|r| matches!(r.status, PayloadStatus::Invalid { .. }))
            .count()
    }
}

#[derive(Debug)]
pub struct PayloadResult {
    pub payload_id: String,
    pub path: PathBuf,
    pub status: PayloadStatus,
    pub collection: ReviewCollection,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PayloadStatus {
    Completed,
    /// Parsed fine but carried no reviews
    Empty,
    Invalid { reason: String },
    Failed { error: String },
}

impl std::fmt::Display for PayloadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PayloadStatus::Completed => write!(f, "completed"),
            PayloadStatus::Empty => write!(f, "empty"),
            PayloadStatus::Invalid { reason } => write!(f, "invalid: {}", reason),
            PayloadStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

/// Normalizes many saved payloads concurrently; each payload is still parsed in
/// one synchronous pass
pub struct Orchestrator {
    normalizer: Arc<Normalizer>,
    semaphore: Arc<Semaphore>,
    concurrency: usize,
}

impl Orchestrator {
    pub fn new(normalizer: Normalizer, concurrency: usize) -> Self {
        let concurrency = concurrency.max(1);
        Self {
            normalizer: Arc::new(normalizer),
            semaphore: Arc::new(Semaphore::new(concurrency)),
            concurrency,
        }
    }

    pub async fn run(
        &self,
        payloads: Vec<PathBuf>,
        input_dir: &Path,
        report_dir: &Path,
    ) -> Result<BatchReport, RunnerError> {
        let start = std::time::Instant::now();

        if payloads.is_empty() {
            return Err(RunnerError::NoPayloads(input_dir.to_path_buf()));
        }

        info!(
            "Normalizing {} payloads with concurrency {}",
            payloads.len(),
            self.concurrency
        );

        let mut futures = FuturesUnordered::new();

        for path in payloads {
            let permit = self.semaphore.clone().acquire_owned().await?;
            let normalizer = self.normalizer.clone();
            let payload_id = payload_id(input_dir, &path);

            let task_path = path.clone();
            let task_id = payload_id.clone();
            let handle = tokio::spawn(async move {
                let _permit = permit; // hold until done
                process_payload(&normalizer, payload_id, path).await
            });

            futures.push(async move { joined_result(handle.await, task_id, task_path) });
        }

        let mut results = Vec::new();
        while let Some(result) = futures.next().await {
            info!(
                "{}: {} ({} files)",
                result.payload_id,
                result.status,
                result.collection.len()
            );

            if matches!(
                result.status,
                PayloadStatus::Completed | PayloadStatus::Empty
            ) {
                if let Err(e) =
                    write_collection_report(report_dir, &result.payload_id, &result.collection)
                {
                    warn!("Failed to write report for {}: {}", result.payload_id, e);
                }
            }

            results.push(result);
        }

        results.sort_by(|a, b| a.payload_id.cmp(&b.payload_id));

        Ok(BatchReport {
            run_id: Uuid::new_v4().to_string(),
            results,
            total_duration: start.elapsed(),
        })
    }
}

async fn process_payload(
    normalizer: &Normalizer,
    payload_id: String,
    path: PathBuf,
) -> PayloadResult {
    let start = std::time::Instant::now();
    let source = FileSource { path: path.clone() };

    let (status, collection) = match load_payload(normalizer, &source).await {
        Ok(collection) if collection.is_empty() => (PayloadStatus::Empty, collection),
        Ok(collection) => (PayloadStatus::Completed, collection),
        Err(DuorevError::Payload(e)) => (
            PayloadStatus::Invalid {
                reason: e.to_string(),
            },
            ReviewCollection::empty(),
        ),
        Err(e) => (
            PayloadStatus::Failed {
                error: e.to_string(),
            },
            ReviewCollection::empty(),
        ),
    };

    PayloadResult {
        payload_id,
        path,
        status,
        collection,
        duration: start.elapsed(),
    }
}

/// A panicked task still shows up in the batch, as a failed payload
fn joined_result(
    joined: Result<PayloadResult, JoinError>,
    payload_id: String,
    path: PathBuf,
) -> PayloadResult {
    joined.unwrap_or_else(|e| {
        warn!("Task for {} panicked: {}", payload_id, e);
        PayloadResult {
            payload_id,
            path,
            status: PayloadStatus::Failed {
                error: format!("task panicked: {}", e),
            },
            collection: ReviewCollection::empty(),
            duration: Duration::ZERO,
        }
    })
}

async fn load_payload(
    normalizer: &Normalizer,
    source: &dyn PayloadSource,
) -> Result<ReviewCollection, DuorevError> {
    let body = source.fetch().await?;
    Ok(normalizer.normalize_str(&body)?)
}

/// Report file stem for a payload: its path under the input dir, extension
/// dropped, separators flattened
fn payload_id(input_dir: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(input_dir).unwrap_or(path);
    let rel = rel.with_extension("");
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_payload_id() {
        let dir = Path::new("/in");
        assert_eq!(payload_id(dir, Path::new("/in/a.json")), "a");
        assert_eq!(payload_id(dir, Path::new("/in/x/y.json")), "x__y");
    }

    #[tokio::test]
    async fn test_run_batch() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();

        let good = input.path().join("good.json");
        fs::write(
            &good,
            r#"{"review": {"a.py": "==== GROQ REVIEW ====\n**Bugs or Errors:**\n1. off-by-one\n"}}"#,
        )
        .unwrap();
        let empty = input.path().join("empty.json");
        fs::write(&empty, r#"{"review": null}"#).unwrap();
        let bad = input.path().join("bad.json");
        fs::write(&bad, r#"{"error": "Missing repo_url"}"#).unwrap();

        let orchestrator = Orchestrator::new(Normalizer::default(), 2);
        let report = orchestrator
            .run(vec![good, empty, bad], input.path(), output.path())
            .await
            .unwrap();

        assert_eq!(report.results.len(), 3);
        let ids: Vec<_> = report
            .results
            .iter()
            .map(|r| r.payload_id.as_str())
            .collect();
        assert_eq!(ids, vec!["bad", "empty", "good"]);
        assert!(matches!(
            report.results[0].status,
            PayloadStatus::Invalid { .. }
        ));
        assert_eq!(report.results[1].status, PayloadStatus::Empty);
        assert_eq!(report.results[2].status, PayloadStatus::Completed);
        assert_eq!(report.invalid_count(), 1);
        assert_eq!(report.totals().bugs, 1);

        assert!(output.path().join("good.md").exists());
        assert!(output.path().join("good.review.json").exists());
        assert!(output.path().join("empty.md").exists());
        assert!(!output.path().join("bad.md").exists());
    }

    #[tokio::test]
    async fn test_unreadable_payload_is_failed() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        let missing = input.path().join("gone.json");

        let orchestrator = Orchestrator::new(Normalizer::default(), 1);
        let report = orchestrator
            .run(vec![missing], input.path(), output.path())
            .await
            .unwrap();

        assert!(matches!(
            report.results[0].status,
            PayloadStatus::Failed { .. }
        ));
        assert_eq!(report.invalid_count(), 0);
        assert!(report.results[0].collection.is_empty());
    }

    #[tokio::test]
    async fn test_panicked_task_is_recorded_as_failed() {
        let joined = tokio::spawn(async {
            if true {
                panic!("normalizer blew up");
            }
            PayloadResult {
                payload_id: String::new(),
                path: PathBuf::new(),
                status: PayloadStatus::Completed,
                collection: ReviewCollection::empty(),
                duration: Duration::ZERO,
            }
        })
        .await;

        let result = joined_result(
            joined,
            "crashy".to_string(),
            PathBuf::from("in/crashy.json"),
        );
        assert_eq!(result.payload_id, "crashy");
        assert_eq!(result.path, PathBuf::from("in/crashy.json"));
        match result.status {
            PayloadStatus::Failed { error } => assert!(error.contains("panicked")),
            other => panic!("unexpected status: {}", other),
        }
    }

    #[tokio::test]
    async fn test_no_payloads() {
        let orchestrator = Orchestrator::new(Normalizer::default(), 1);
        let result = orchestrator
            .run(Vec::new(), Path::new("in"), Path::new("out"))
            .await;
        assert!(matches!(result, Err(RunnerError::NoPayloads(_))));
    }
}
