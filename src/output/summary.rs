use crate::error::OutputError;
use crate::parser::FindingCounts;
use crate::runner::{BatchReport, PayloadStatus};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub run_id: String,
    pub timestamp: String,
    pub input_dir: String,
    pub duration_sec: f64,
    pub payloads: Vec<PayloadSummary>,
    pub totals: CountSummary,
    pub invalid: Vec<String>,
    pub failed: Vec<String>,
    pub exit_code: i32,
    pub report_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PayloadSummary {
    pub id: String,
    pub path: PathBuf,
    pub status: String,
    pub duration_sec: f64,
    pub files: usize,
    pub findings: CountSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CountSummary {
    pub bugs: usize,
    pub code_style: usize,
    pub security: usize,
    pub suggestions: usize,
    pub code_blocks: usize,
    pub fast: usize,
    pub deep: usize,
}

impl From<FindingCounts> for CountSummary {
    fn from(c: FindingCounts) -> Self {
        Self {
            bugs: c.bugs,
            code_style: c.code_style,
            security: c.security,
            suggestions: c.suggestions,
            code_blocks: c.code_blocks,
            fast: c.fast,
            deep: c.deep,
        }
    }
}

pub fn write_summary(
    report_dir: &Path,
    batch: &BatchReport,
    input_dir: &Path,
) -> Result<SummaryReport, OutputError> {
    // Needed even when every payload was invalid
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(batch, report_dir.to_path_buf(), input_dir);

    let json_path = report_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = report_dir.join("summary.md");
    let md = build_summary_markdown(&summary);
    fs::write(&md_path, md).map_err(OutputError::WriteReport)?;

    Ok(summary)
}

fn build_summary(batch: &BatchReport, report_dir: PathBuf, input_dir: &Path) -> SummaryReport {
    let mut payloads = Vec::new();
    let mut invalid = Vec::new();
    let mut failed = Vec::new();

    for result in &batch.results {
        let (status_str, reason) = match &result.status {
            PayloadStatus::Completed => ("completed".to_string(), None),
            PayloadStatus::Empty => ("empty".to_string(), None),
            PayloadStatus::Invalid { reason } => {
                invalid.push(result.payload_id.clone());
                ("invalid".to_string(), Some(reason.clone()))
            }
            PayloadStatus::Failed { error } => {
                failed.push(result.payload_id.clone());
                ("failed".to_string(), Some(error.clone()))
            }
        };

        payloads.push(PayloadSummary {
            id: result.payload_id.clone(),
            path: result.path.clone(),
            status: status_str,
            duration_sec: result.duration.as_secs_f64(),
            files: result.collection.len(),
            findings: result.collection.counts().into(),
            reason,
        });
    }

    let exit_code = if invalid.is_empty() && failed.is_empty() {
        0
    } else {
        1
    };

    SummaryReport {
        run_id: batch.run_id.clone(),
        timestamp: Utc::now().to_rfc3339(),
        input_dir: input_dir.display().to_string(),
        duration_sec: batch.total_duration.as_secs_f64(),
        payloads,
        totals: batch.totals().into(),
        invalid,
        failed,
        exit_code,
        report_dir,
    }
}

fn build_summary_markdown(summary: &SummaryReport) -> String {
    let mut md = String::new();

    md.push_str("# duorev Summary\n\n");
    md.push_str(&format!("**Run:** {}\n", summary.run_id));
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!("**Input:** {}\n", summary.input_dir));
    md.push_str(&format!(
        "**Report Dir:** {}\n",
        summary.report_dir.display()
    ));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", summary.duration_sec));

    md.push_str("## Totals\n\n");
    md.push_str("| Category | Fast + Deep |\n");
    md.push_str("|----------|-------------|\n");
    md.push_str(&format!("| Bugs | {} |\n", summary.totals.bugs));
    md.push_str(&format!("| Code Style | {} |\n", summary.totals.code_style));
    md.push_str(&format!("| Security | {} |\n", summary.totals.security));
    md.push_str(&format!("| Suggestions | {} |\n", summary.totals.suggestions));
    md.push_str(&format!("| Code Blocks | {} |\n\n", summary.totals.code_blocks));

    md.push_str("## Payloads\n\n");
    md.push_str("| Payload | Status | Files | Findings |\n");
    md.push_str("|---------|--------|-------|----------|\n");

    for payload in &summary.payloads {
        let status_icon = match payload.status.as_str() {
            "completed" => "✅",
            "empty" => "⬜",
            "invalid" => "⚠️",
            "failed" => "❌",
            _ => "❓",
        };

        let status_str = if let Some(reason) = &payload.reason {
            format!("{} {} ({})", status_icon, payload.status, reason)
        } else {
            format!("{} {}", status_icon, payload.status)
        };

        md.push_str(&format!(
            "| {} | {} | {} | {} fast, {} deep |\n",
            payload.id, status_str, payload.files, payload.findings.fast, payload.findings.deep
        ));
    }

    if !summary.invalid.is_empty() {
        md.push_str("\n## Invalid Payloads\n\n");
        for id in &summary.invalid {
            md.push_str(&format!("- {}\n", id));
        }
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{Normalizer, ReviewCollection};
    use crate::runner::PayloadResult;
    use std::time::Duration;

    fn batch() -> BatchReport {
        let file = Normalizer::default().normalize_raw(
            "a.py",
            "==== GROQ REVIEW ====\n**Security Concerns:**\n* exposed key\n",
        );
        BatchReport {
            run_id: "run-1".to_string(),
            results: vec![
                PayloadResult {
                    payload_id: "good".to_string(),
                    path: PathBuf::from("in/good.json"),
                    status: PayloadStatus::Completed,
                    collection: ReviewCollection::new(vec![file]),
                    duration: Duration::from_millis(5),
                },
                PayloadResult {
                    payload_id: "bad".to_string(),
                    path: PathBuf::from("in/bad.json"),
                    status: PayloadStatus::Invalid {
                        reason: "missing `review` field".to_string(),
                    },
                    collection: ReviewCollection::empty(),
                    duration: Duration::from_millis(1),
                },
            ],
            total_duration: Duration::from_millis(7),
        }
    }

    #[test]
    fn test_write_summary() {
        let dir = tempfile::tempdir().unwrap();
        let summary = write_summary(dir.path(), &batch(), Path::new("in")).unwrap();

        assert_eq!(summary.totals.security, 1);
        assert_eq!(summary.invalid, vec!["bad".to_string()]);
        assert_eq!(summary.exit_code, 1);
        assert_eq!(summary.payloads[0].files, 1);

        let md = fs::read_to_string(dir.path().join("summary.md")).unwrap();
        assert!(md.contains("| Security | 1 |"));
        assert!(md.contains("## Invalid Payloads"));

        let json = fs::read_to_string(dir.path().join("summary.json")).unwrap();
        let parsed: SummaryReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.run_id, "run-1");
    }
}
