// Command-line front end: extract one order from a CSV export

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use order_extraction::{ExtractedOrder, ExtractorConfig, OrderExtractor, StructuredExtractor};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "extract-order", version, about = "Extract order data from a spreadsheet CSV export")]
struct Cli {
    /// CSV file to read (stdin when omitted)
    file: Option<PathBuf>,

    /// Model identifier (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Grand-total row label (overrides ORDER_GRAND_TOTAL_MARKER)
    #[arg(long)]
    marker: Option<String>,

    /// Print single-line JSON
    #[arg(long)]
    compact: bool,
}

/// Command-line flags win over the environment.
fn apply_overrides(config: &mut ExtractorConfig, cli: &Cli) {
    if let Some(model) = &cli.model {
        config.model = model.clone();
    }
    if let Some(marker) = &cli.marker {
        config.grand_total_marker = Some(marker.clone());
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render(order: &ExtractedOrder, compact: bool) -> Result<String> {
    let output = if compact {
        serde_json::to_string(order)?
    } else {
        serde_json::to_string_pretty(order)?
    };
    Ok(output)
}

/// Extract one order and render it for stdout.
async fn run<E: StructuredExtractor>(
    extractor: &OrderExtractor<E>,
    raw_table: &str,
    compact: bool,
) -> Result<String> {
    info!(bytes = raw_table.len(), model = extractor.model(), "Extracting order");

    let order = extractor.extract(raw_table).await?;
    info!(
        items = order.items.len(),
        total_quantity = order.total_quantity(),
        "Order extracted"
    );

    render(&order, compact)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,order_extraction=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ExtractorConfig::from_env().context("Failed to load configuration")?;
    apply_overrides(&mut config, &cli);

    let raw_table = read_input(cli.file.as_ref())?;
    let extractor = config.build_extractor();
    let output = run(&extractor, &raw_table, cli.compact).await?;
    println!("{}", output);

    Ok(())
}
