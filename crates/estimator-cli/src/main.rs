use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use estimator_core::{
    classify, summarize, Bill, CuttingPlanner, EstimationRequest, Estimator, EstimatorConfig,
    PlanRequest, StockOptions,
};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estimator")]
#[command(about = "Window Pipe Estimator - Plan stock pipe cuts and price aluminium profiles", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate pipes and cost for a window job
    Estimate {
        /// Input request file (YAML or JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Estimator settings file (YAML or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output file for the bill (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Treat cuts longer than every stock pipe as errors
        #[arg(long)]
        strict: bool,
    },

    /// Plan cuts for a single cut list
    Plan {
        /// Required cut lengths in inches
        #[arg(long, value_delimiter = ',', required = true)]
        cuts: Vec<f64>,

        /// Standard stock sizes to offer
        #[arg(long, value_delimiter = ',', default_values_t = StockOptions::default().sizes())]
        sizes: Vec<f64>,

        /// One-off stock lengths, each used at most once
        #[arg(long, value_delimiter = ',')]
        extra: Vec<f64>,

        /// Waste at or above which a pipe is partial
        #[arg(long, default_value_t = estimator_core::config::DEFAULT_MIN_WASTE)]
        min_waste: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Estimate {
            input,
            config,
            output,
            strict,
        } => {
            estimate_command(input, config, output, strict)?;
        }
        Commands::Plan {
            cuts,
            sizes,
            extra,
            min_waste,
        } => {
            plan_command(cuts, sizes, extra, min_waste)?;
        }
    }

    Ok(())
}

/// Reads YAML for `.yaml`/`.yml` files and JSON otherwise.
fn load_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_yaml = matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    );

    let value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?
    };

    Ok(value)
}

fn estimate_command(
    input: PathBuf,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    strict: bool,
) -> Result<()> {
    println!("{}", "🔍 Loading request...".bright_blue());

    let request: EstimationRequest = load_file(&input)?;
    let mut settings = match config {
        Some(path) => load_file::<EstimatorConfig>(&path)?,
        None => EstimatorConfig::default(),
    };
    if strict {
        settings = settings.with_strict(true);
    }

    println!(
        "  {} categories supplied for a {:?} window",
        request.categories.len().to_string().bright_white().bold(),
        request.track_type
    );
    println!(
        "  {} material rates loaded",
        request.materials.len().to_string().bright_white().bold()
    );
    println!();

    println!("{}", "🚀 Running estimation...".bright_blue());
    info!("Processing: {}", input.display());

    let estimator = Estimator::new(request, settings)?;
    let bill = estimator.estimate();

    println!();
    println!("{}", "✅ Estimation complete!".bright_green().bold());
    println!();

    print_bill(&bill);

    let json = serde_json::to_string_pretty(&bill)?;
    if let Some(output_path) = output {
        std::fs::write(&output_path, json)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        println!(
            "💾 Saved bill to {}",
            output_path.display().to_string().bright_white()
        );
    } else {
        println!("{}", json);
    }

    Ok(())
}

fn print_bill(bill: &Bill) {
    println!("{}", "📊 Results:".bright_yellow().bold());

    for (category, estimation) in &bill.estimations {
        let summary = &estimation.summary;
        println!(
            "  {} ({})",
            category.label().bright_white().bold(),
            estimation.pipe_type
        );
        println!(
            "    180\": {} full, {} partial ({:.2} in)",
            summary.small.full_pipes, summary.small.partial_pipes, summary.small.partial_inches
        );
        println!(
            "    192\": {} full, {} partial ({:.2} in)",
            summary.large.full_pipes, summary.large.partial_pipes, summary.large.partial_inches
        );
        if summary.extra.full_pipes + summary.extra.partial_pipes > 0 {
            println!(
                "    extra: {} full, {} partial ({:.2} in) from {:?}",
                summary.extra.full_pipes,
                summary.extra.partial_pipes,
                summary.extra.partial_inches,
                estimation.used_extra_sizes
            );
        }
        println!(
            "    {:.2} in, {:.2} kg, amount {}",
            summary.total_inches,
            estimation.total_weight,
            format!("{:.2}", estimation.total_amount).bright_white()
        );
        if !estimation.unassigned_cuts.is_empty() {
            println!(
                "    {} {:?}",
                "Unassigned cuts:".bright_red(),
                estimation.unassigned_cuts
            );
        }
    }

    for (category, reason) in &bill.failures {
        println!(
            "  {} {}: {}",
            "✗".bright_red(),
            category.label().bright_white(),
            reason
        );
    }

    println!();
    println!(
        "  Total pipes: {}",
        bill.total_pipes().to_string().bright_white().bold()
    );
    println!("  Total weight: {:.2} kg", bill.total_weight);
    println!(
        "  Grand total: {}",
        format!("{:.2}", bill.total_amount).bright_green().bold()
    );
    println!();
}

fn plan_command(cuts: Vec<f64>, sizes: Vec<f64>, extra: Vec<f64>, min_waste: f64) -> Result<()> {
    let request = PlanRequest {
        required_cuts: cuts,
        stock_sizes: sizes,
        extra_sizes: extra,
    };

    let plan = CuttingPlanner::new(request, EstimatorConfig::default())?.plan()?;
    let cuttings = classify(&plan.results, min_waste);
    let summary = summarize(&cuttings);

    println!("{}", "✂️  Cutting plan:".bright_yellow().bold());
    for (idx, cutting) in cuttings.iter().enumerate() {
        let kind = if cutting.full {
            "full".bright_green()
        } else {
            "partial".bright_yellow()
        };
        println!(
            "  #{} {}\" pipe [{}]: {:?}, waste {:.2}",
            idx + 1,
            cutting.pipe_length,
            kind,
            cutting.pipe_cuts,
            cutting.wastage
        );
    }

    if !plan.used_extra_sizes.is_empty() {
        println!("  Extra stock used: {:?}", plan.used_extra_sizes);
    }
    if !plan.unassigned_cuts.is_empty() {
        println!(
            "  {} {:?}",
            "Unassigned cuts:".bright_red(),
            plan.unassigned_cuts
        );
    }

    println!();
    println!(
        "  Total pipes: {}",
        summary.total_pipes().to_string().bright_white().bold()
    );
    println!("  Billed inches: {:.2}", summary.total_inches);

    Ok(())
}
