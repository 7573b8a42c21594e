//! Run the extraction pipeline over text or a file and render the
//! analysis as JSON or CSV.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use chrono::Utc;
use clap::{Args, ValueEnum};
use gleanrs_core::Analysis;
use gleanrs_engine::{Annotator, EngineConfig};
use tracing::info;

/// Inputs above this size are rejected before extraction.
const MAX_INPUT_BYTES: u64 = 16 * 1024 * 1024;

#[derive(Args)]
pub struct ExtractArgs {
    /// Text to analyze
    #[arg(short = 't', long, conflicts_with = "file")]
    text: Option<String>,

    /// Read input from a .txt or .csv file
    #[arg(short = 'f', long)]
    file: Option<PathBuf>,

    /// Rule domain to apply
    #[arg(short = 'd', long, default_value = "healthcare")]
    domain: String,

    /// Comma-separated entity types to keep (all types when omitted)
    #[arg(short = 'T', long, value_delimiter = ',')]
    types: Option<Vec<String>>,

    /// Minimum entity confidence
    #[arg(long, default_value_t = 0.5)]
    min_confidence: f64,

    /// Rule catalog file to use instead of the embedded one
    #[arg(short = 'r', long)]
    rules: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Write output to a file instead of stdout
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
}

pub fn run(args: &ExtractArgs) -> anyhow::Result<()> {
    let text = read_input(args)?;
    let annotator = Annotator::new(
        super::load_catalog(args.rules.as_deref())?,
        EngineConfig {
            min_confidence: args.min_confidence,
            ..EngineConfig::default()
        },
    );

    let analysis = annotator.analyze(&text, &args.domain, args.types.as_deref())?;
    info!(
        "extracted {} entities and {} events for domain {}",
        analysis.statistics.total_entities,
        analysis.statistics.total_events,
        analysis.domain
    );

    let rendered = match args.format {
        OutputFormat::Json => render_json(&analysis)?,
        OutputFormat::Csv => render_csv(&analysis)?,
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)
                .with_context(|| format!("cannot write output to {}", path.display()))?;
            info!("wrote {}", path.display());
        }
        None => println!("{rendered}"),
    }

    Ok(())
}

fn read_input(args: &ExtractArgs) -> anyhow::Result<String> {
    if let Some(text) = &args.text {
        return Ok(text.clone());
    }
    let Some(path) = &args.file else {
        bail!("either --text or --file is required");
    };
    read_file(path)
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    let extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .map(str::to_lowercase);
    match extension.as_deref() {
        Some("txt" | "csv") => {}
        _ => bail!(
            "unsupported file type {}: expected .txt or .csv",
            path.display()
        ),
    }

    let metadata =
        fs::metadata(path).with_context(|| format!("cannot read {}", path.display()))?;
    if metadata.len() > MAX_INPUT_BYTES {
        bail!("{} exceeds the 16 MiB input limit", path.display());
    }

    fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
}

/// The pretty-printed analysis with an export timestamp appended.
fn render_json(analysis: &Analysis) -> anyhow::Result<String> {
    let mut value = serde_json::to_value(analysis)?;
    if let Some(object) = value.as_object_mut() {
        object.insert(
            "exported_at".to_string(),
            serde_json::Value::String(Utc::now().to_rfc3339()),
        );
    }
    Ok(serde_json::to_string_pretty(&value)?)
}

/// One row per entity and per event. Event attributes are rendered as
/// compact JSON in the last column.
fn render_csv(analysis: &Analysis) -> anyhow::Result<String> {
    let mut out = String::from("Type,Category,Text,Start,End,Confidence,Attributes\n");
    for entity in &analysis.entities {
        out.push_str(&format!(
            "Entity,{},{},{},{},{},\n",
            csv_field(&entity.entity_type),
            csv_field(&entity.text),
            entity.start,
            entity.end,
            entity.confidence
        ));
    }
    for event in &analysis.events {
        let attributes = serde_json::to_string(&event.attributes)?;
        out.push_str(&format!(
            "Event,{},{},{},{},{},{}\n",
            csv_field(&event.event_type),
            csv_field(&event.trigger),
            event.start,
            event.end,
            event.confidence,
            csv_field(&attributes)
        ));
    }
    Ok(out)
}

/// Quote a field when it contains a delimiter, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
