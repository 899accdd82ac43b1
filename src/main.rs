use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use commerce_scrubber::config::EngineConfig;
use commerce_scrubber::domain::{Datasets, Entity};
use commerce_scrubber::engine::ledger::CorrectionSummary;
use commerce_scrubber::engine::CorrectionEngine;
use commerce_scrubber::io::report::{self, EntityCounts};
use commerce_scrubber::io::{self, csv as csvio};
use commerce_scrubber::{logging, sampledata};

#[derive(Parser)]
#[command(name = "commerce_scrubber")]
#[command(about = "Rule-based data cleanup for commerce datasets")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the sample datasets with seeded defects
    Generate {
        /// Directory the CSV files are written to
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
    /// Correct datasets read from CSV files
    Correct {
        /// Directory containing customers.csv, products.csv, sales.csv and shipments.csv
        #[arg(long)]
        input: PathBuf,
        /// Directory the corrected files and reports are written to
        #[arg(long, default_value = "output")]
        output: PathBuf,
        /// Optional TOML file overriding the engine defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Generate sample data and correct it in one go
    Run {
        /// Directory the corrected files and reports are written to
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output } => {
            println!("🧪 Generating sample datasets...");
            let data = sampledata::generate();
            write_datasets(&data, &output)?;
            println!(
                "✅ Sample data written to {} ({} customers, {} products, {} sales, {} shipments)",
                output.display(),
                data.customers.len(),
                data.products.len(),
                data.sales.len(),
                data.shipments.len()
            );
        }
        Commands::Correct {
            input,
            output,
            config,
        } => {
            let config = load_config(config.as_deref())?;
            println!("🔧 Correcting datasets from {}...", input.display());
            let data = read_datasets(&input)?;
            scrub(&data, config, &output)?;
        }
        Commands::Run { output } => {
            println!("🚀 Running full cleanup (generate + correct)...");
            println!("\n📥 Step 1: Generating sample data...");
            let data = sampledata::generate();
            write_datasets(&data, &output.join("raw"))?;

            println!("\n🔧 Step 2: Correcting...");
            scrub(&data, EngineConfig::default(), &output)?;
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn read_datasets(input: &Path) -> anyhow::Result<Datasets> {
    let read = |file: &str| input.join(file);

    Ok(Datasets {
        customers: csvio::read_records(&read(io::CUSTOMERS_FILE))
            .with_context(|| format!("Failed to read {}", read(io::CUSTOMERS_FILE).display()))?,
        products: csvio::read_records(&read(io::PRODUCTS_FILE))
            .with_context(|| format!("Failed to read {}", read(io::PRODUCTS_FILE).display()))?,
        sales: csvio::read_records(&read(io::SALES_FILE))
            .with_context(|| format!("Failed to read {}", read(io::SALES_FILE).display()))?,
        shipments: csvio::read_records(&read(io::SHIPMENTS_FILE))
            .with_context(|| format!("Failed to read {}", read(io::SHIPMENTS_FILE).display()))?,
    })
}

fn write_datasets(data: &Datasets, output: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    csvio::write_records(&output.join(io::CUSTOMERS_FILE), &data.customers)?;
    csvio::write_records(&output.join(io::PRODUCTS_FILE), &data.products)?;
    csvio::write_records(&output.join(io::SALES_FILE), &data.sales)?;
    csvio::write_records(&output.join(io::SHIPMENTS_FILE), &data.shipments)?;
    Ok(())
}

/// Runs the engine over the datasets and writes the corrected files, the
/// correction ledger, the summary JSON and the Markdown report.
fn scrub(data: &Datasets, config: EngineConfig, output: &Path) -> anyhow::Result<()> {
    let mut engine = CorrectionEngine::with_config(config);
    let corrected = engine.correct_datasets(data);

    write_datasets(&corrected, output)?;

    let counts = [
        EntityCounts::new(Entity::Customers, data.customers.len(), corrected.customers.len()),
        EntityCounts::new(Entity::Products, data.products.len(), corrected.products.len()),
        EntityCounts::new(Entity::Sales, data.sales.len(), corrected.sales.len()),
        EntityCounts::new(
            Entity::Shipments,
            data.shipments.len(),
            corrected.shipments.len(),
        ),
    ];

    let summary = engine.summary();
    report::write_markdown(&output.join(io::REPORT_FILE), &counts, &summary)?;
    fs::write(
        output.join(io::SUMMARY_FILE),
        serde_json::to_string_pretty(&summary)?,
    )
    .with_context(|| format!("Failed to write {}", io::SUMMARY_FILE))?;

    let ledger = engine.into_ledger();
    if ledger.is_empty() {
        println!("✨ No corrections were necessary");
    } else {
        let ledger_path = output.join(io::LEDGER_FILE);
        let file = File::create(&ledger_path)
            .with_context(|| format!("Failed to create {}", ledger_path.display()))?;
        ledger.write_csv(file)?;
        info!("Correction ledger written to {}", ledger_path.display());
        print_summary(&counts, &summary);
    }

    println!("✅ Cleanup completed, results in {}", output.display());
    Ok(())
}

fn print_summary(counts: &[EntityCounts], summary: &CorrectionSummary) {
    println!("\n📊 Correction Results:");
    for count in counts {
        println!("   {}: {} -> {}", count.entity, count.before, count.after);
    }
    println!("\n   Corrections applied: {}", summary.total);
    for (kind, count) in &summary.by_kind {
        println!("   - {}: {}", kind, count);
    }
}
