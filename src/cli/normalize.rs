use crate::cli::{NormalizeArgs, OutputFormat};
use duorev::config::Config;
use duorev::output::{render_html, render_markdown};
use duorev::parser::{Normalizer, ReviewCollection};
use duorev::source::{create_source, fetch_or_none};
use std::path::Path;
use tracing::{debug, info};

pub async fn execute(args: NormalizeArgs, config_path: &Path) -> anyhow::Result<()> {
    let mut config = Config::load_or_default(config_path)?;

    // Apply CLI overrides
    if let Some(command) = args.command {
        config.source.command = Some(command);
    }
    if let Some(include) = args.include {
        config.include = include;
    }
    if let Some(exclude) = args.exclude {
        config.exclude = exclude;
    }

    config.validate()?;
    let normalizer = Normalizer::new(&config)?;

    let source = create_source(&config, args.input);
    debug!("Reading payload from {} source", source.name());

    let collection = match fetch_or_none(source.as_ref()).await {
        Some(body) => match normalizer.normalize_str(&body) {
            Ok(collection) => collection,
            // Unparseable input must not look like "no findings"
            Err(e) => anyhow::bail!("{}", e),
        },
        None => ReviewCollection::empty(),
    };

    let counts = collection.counts();
    info!(
        "Normalized {} files: {} fast, {} deep findings",
        collection.len(),
        counts.fast,
        counts.deep
    );

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&collection)? + "\n",
        OutputFormat::Markdown => render_markdown(&collection),
        OutputFormat::Html => render_html(&collection),
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, rendered)?;
            info!("Wrote {:?}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}
