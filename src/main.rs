//! Term Life Data CLI
//!
//! Generates the Secure20 Term Life policy dataset and writes it to a file

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use term_life_data::export::format_money;
use term_life_data::{write_dataset, ExportFormat, PolicyDataGenerator, ProductConfig};

const DEFAULT_OUTPUT: &str = "outputs/Secure20_Term_Life_Data.xlsx";

#[derive(Parser)]
#[command(name = "generate_policy_data", about = "Generate sample term life policy data")]
#[command(version)]
struct Cli {
    /// Number of policies to generate (defaults to the configured count)
    #[arg(short, long)]
    num_policies: Option<usize>,

    /// Random seed (defaults to the configured seed)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Output file path
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// JSON product configuration; Secure20 defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format (xlsx, csv or json); inferred from the output extension when omitted
    #[arg(long)]
    format: Option<ExportFormat>,

    /// Number of sample records to print
    #[arg(long, default_value_t = 5)]
    sample: usize,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ProductConfig::from_json_path(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => ProductConfig::secure20(),
    };

    let mut generator = PolicyDataGenerator::new(config);
    if let Some(n) = cli.num_policies {
        generator = generator.with_num_policies(n);
    }
    if let Some(seed) = cli.seed {
        generator = generator.with_seed(seed);
    }

    let dataset = generator.generate().context("generating policy data")?;

    if let Some(parent) = cli.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
    let format = cli.format.unwrap_or_else(|| ExportFormat::from_path(&cli.output));
    write_dataset(&dataset, &cli.output, format)
        .with_context(|| format!("writing {}", cli.output.display()))?;

    println!("Generated {} policy records", dataset.len());
    println!("Data saved to: {}", cli.output.display());

    let summary = dataset.summary();
    println!("\nSummary:");
    println!("  Product: {}", dataset.product_name);
    println!("  Seed: {}", dataset.seed);
    println!("  As of: {}", dataset.current_date);
    println!("  Death Claims: {} ({:.2}%)", summary.claim_count, summary.claim_rate * 100.0);
    println!("  Total Sum Assured: ${}", format_money(summary.total_sum_assured));
    println!("  Total Annual Premium: ${}", format_money(summary.total_annual_premium));
    for (term, count) in &summary.policies_by_term {
        println!("  Term {:>2}: {} policies", term, count);
    }

    if cli.sample > 0 {
        println!("\nSample Records:");
        println!(
            "{:<14} {:>9} {:>11} {:>14} {:>14} {:<12}",
            "Policy_Number",
            "Entry_Age",
            "Policy_Term",
            "Sum_Assured",
            "Annual_Premium",
            "Policy_Status",
        );
        println!("{}", "-".repeat(79));
        for record in dataset.iter().take(cli.sample) {
            println!(
                "{:<14} {:>9} {:>11} {:>14} {:>14} {:<12}",
                record.policy_number,
                record.entry_age,
                record.policy_term,
                format_money(record.sum_assured),
                format_money(record.annual_premium),
                record.status.as_str(),
            );
        }
    }

    Ok(())
}
