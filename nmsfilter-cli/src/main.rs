use clap::Parser;
use nmsfilter::{Detection, PostProcessConfig, PostProcessor, Rect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "nmsfilter CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for each filtering stage.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FilterConfigJson {
    score_threshold: f32,
    iou_threshold: f32,
    class_aware: bool,
    max_detections: Option<usize>,
    parallel: bool,
}

impl Default for FilterConfigJson {
    fn default() -> Self {
        let cfg = PostProcessConfig::default();
        Self {
            score_threshold: cfg.score_threshold,
            iou_threshold: cfg.iou_threshold,
            class_aware: cfg.class_aware,
            max_detections: cfg.max_detections,
            parallel: cfg.parallel,
        }
    }
}

impl From<FilterConfigJson> for PostProcessConfig {
    fn from(value: FilterConfigJson) -> Self {
        Self {
            score_threshold: value.score_threshold,
            iou_threshold: value.iou_threshold,
            class_aware: value.class_aware,
            max_detections: value.max_detections,
            parallel: value.parallel,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct Config {
    input_path: String,
    output_path: Option<String>,
    filter: FilterConfigJson,
}

#[derive(Debug, Deserialize, Serialize)]
struct DetectionRecord {
    x1: f32,
    y1: f32,
    x2: f32,
    y2: f32,
    score: f32,
    #[serde(default)]
    class_id: usize,
}

impl From<DetectionRecord> for Detection {
    fn from(value: DetectionRecord) -> Self {
        Detection::from_rect(
            Rect::new(value.x1, value.y1, value.x2, value.y2),
            value.score,
            value.class_id,
        )
    }
}

impl From<Detection> for DetectionRecord {
    fn from(value: Detection) -> Self {
        Self {
            x1: value.rect.x1,
            y1: value.rect.y1,
            x2: value.rect.x2,
            y2: value.rect.y2,
            score: value.score,
            class_id: value.class_id,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    input_count: usize,
    kept_count: usize,
    kept: Vec<DetectionRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("nmsfilter=debug".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.input_path.is_empty() {
        return Err("input_path must be set in the config".into());
    }

    let input_text = fs::read_to_string(&config.input_path)?;
    let records: Vec<DetectionRecord> = serde_json::from_str(&input_text)?;
    let detections: Vec<Detection> = records.into_iter().map(Detection::from).collect();

    // Decoding is not used here, so the class count and input size are inert.
    let processor = PostProcessor::new(1, (1, 1)).with_config(config.filter.into());
    let kept = processor.filter(&detections)?;

    let output = Output {
        input_count: detections.len(),
        kept_count: kept.len(),
        kept: kept.into_iter().map(DetectionRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
