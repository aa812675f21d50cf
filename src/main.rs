//! netlog-indexer command line entry point

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use netlog_indexer::client::SearchClient;
use netlog_indexer::config::Config;
use netlog_indexer::models::IndexMapping;
use netlog_indexer::{provision, transform};

/// Top-level CLI entry point.
#[derive(Debug, Parser)]
#[command(
    name = "netlog-indexer",
    version,
    about = "Provision the network-logs index and convert CSV exports to bulk NDJSON"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Target index name (overrides INDEX_NAME).
    #[arg(global = true, long)]
    index: Option<String>,
    /// Increase logging verbosity (-v, -vv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
    /// Emit logs as JSON lines.
    #[arg(global = true, long)]
    json_logs: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the index with its field mapping (no-op if it already exists).
    Provision(ProvisionArgs),
    /// Convert a CSV export into bulk-ingest NDJSON.
    Transform(TransformArgs),
}

#[derive(Debug, Args)]
struct ProvisionArgs {
    /// Datastore base URL (overrides ES_URL).
    #[arg(long)]
    url: Option<String>,
}

#[derive(Debug, Args)]
struct TransformArgs {
    /// CSV input file (overrides INPUT_PATH).
    #[arg(long, short = 'i', value_name = "FILE")]
    input: Option<PathBuf>,
    /// NDJSON output file (overrides OUTPUT_PATH).
    #[arg(long, short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let mut config = Config::from_env();
    if let Some(index) = cli.index {
        config.index_name = index;
    }

    match cli.command {
        Commands::Provision(args) => {
            if let Some(url) = args.url {
                config.es_url = url;
            }
            config.validate()?;
            run_provision(&config).await
        }
        Commands::Transform(args) => {
            if let Some(input) = args.input {
                config.input_path = input;
            }
            if let Some(output) = args.output {
                config.output_path = output;
            }
            config.validate_index()?;
            transform::run(&config.input_path, &config.output_path, &config.index_name)
                .with_context(|| format!("transform of {} failed", config.input_path.display()))?;
            Ok(())
        }
    }
}

async fn run_provision(config: &Config) -> anyhow::Result<()> {
    let client = SearchClient::new(config)?;
    let result = provision::provision(&client, &config.index_name, &IndexMapping::network_logs()).await;
    client.close();

    result.with_context(|| format!("provisioning index '{}' failed", config.index_name))?;
    Ok(())
}

fn init_logging(verbose: u8, json: bool) {
    let default_filter = match verbose {
        0 => "netlog_indexer=info",
        1 => "netlog_indexer=debug",
        _ => "netlog_indexer=trace,reqwest=debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
