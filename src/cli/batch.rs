use crate::cli::BatchArgs;
use chrono::Local;
use duorev::config::Config;
use duorev::discovery::{find_payloads, FileFilter};
use duorev::output::write_summary;
use duorev::parser::Normalizer;
use duorev::runner::Orchestrator;
use std::path::Path;
use tracing::{error, info};

pub async fn execute(args: BatchArgs, config_path: &Path) -> anyhow::Result<()> {
    info!("Loading config from {:?}", config_path);
    let mut config = Config::load_or_default(config_path)?;

    // Apply CLI overrides
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(report_dir) = args.report_dir {
        config.report_dir = report_dir;
    }

    config.validate()?;

    let payload_filter = match &args.glob {
        Some(globs) => FileFilter::new(globs, &[])?,
        None => FileFilter::allow_all(),
    };
    let payloads = find_payloads(&args.input_dir, &payload_filter)?;
    info!(
        "Found {} payloads under {:?}",
        payloads.len(),
        args.input_dir
    );

    // Create dated report directory (reports/YYYY-MM-DD/)
    let date_str = Local::now().format("%Y-%m-%d").to_string();
    let report_dir = config.report_dir.join(&date_str);
    info!("Reports will be written to {:?}", report_dir);

    let orchestrator = Orchestrator::new(Normalizer::new(&config)?, config.concurrency);
    let batch = orchestrator
        .run(payloads, &args.input_dir, &report_dir)
        .await?;

    let summary = write_summary(&report_dir, &batch, &args.input_dir)?;

    let totals = batch.totals();
    info!(
        "Completed in {:.1}s: {} bugs, {} style, {} security, {} suggestions across {} payloads",
        batch.total_duration.as_secs_f64(),
        totals.bugs,
        totals.code_style,
        totals.security,
        totals.suggestions,
        batch.results.len()
    );
    println!("{}", report_dir.join("summary.md").display());

    if args.fail_on_invalid && summary.exit_code != 0 {
        error!(
            "Exiting with error: {} invalid, {} unreadable payloads",
            summary.invalid.len(),
            summary.failed.len()
        );
        std::process::exit(1);
    }

    Ok(())
}
