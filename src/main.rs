use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use roadnet_export::config::{DEFAULT_FEATURE_LAYER_URL, DEFAULT_OUTPUT_DIR, DEFAULT_TIMEOUT_SECS};
use roadnet_export::{
    ArcGisClient, CsvExporter, ExportConfig, Pipeline, RoadNetError, RoadNetworkService,
    TerminalConsole,
};

#[derive(Parser)]
#[command(name = "roadnet-export")]
#[command(about = "Export DPWH expressway / national road records to CSV")]
struct Args {
    /// FeatureServer root URL
    #[arg(long, env = "ROADNET_FEATURE_LAYER_URL", default_value = DEFAULT_FEATURE_LAYER_URL)]
    feature_layer_url: String,

    /// Directory the CSV file is written to
    #[arg(long, env = "ROADNET_OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, env = "ROADNET_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Keep repeated rows instead of collapsing them
    #[arg(long)]
    keep_duplicates: bool,
}

impl From<Args> for ExportConfig {
    fn from(args: Args) -> Self {
        ExportConfig::new()
            .with_feature_layer_url(args.feature_layer_url)
            .with_output_dir(args.output_dir)
            .with_timeout(Duration::from_secs(args.timeout_secs))
            .with_unique_roads_only(!args.keep_duplicates)
    }
}

async fn run(config: ExportConfig) -> Result<i32, RoadNetError> {
    let exporter = CsvExporter::new(&config.output_dir);
    let service = RoadNetworkService::new(ArcGisClient::new(config.clone())?)
        .with_unique_roads_only(config.unique_roads_only);

    let mut pipeline = Pipeline::new(service, TerminalConsole::new(), exporter);
    let outcome = pipeline.run().await?;
    Ok(outcome.exit_code())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // logs to stderr; stdout carries the prompts
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("roadnet_export=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config: ExportConfig = Args::parse().into();

    let code = tokio::select! {
        result = run(config) => match result {
            Ok(code) => code,
            Err(e) => {
                debug!("run failed: {:?}", e);
                println!("Error: {}", e);
                1
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\nInterrupted by user. Exiting.");
            1
        }
    };

    // The stdin reader may still be parked in a blocking read.
    std::process::exit(code)
}
