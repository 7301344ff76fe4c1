//! orderlens CLI - Compute the order analytics dashboard
//!
//! Usage:
//!   orderlens report [--data-dir <dir>] [--top-n <n>] [--category <label>]... [--format <fmt>]
//!   orderlens categories [--data-dir <dir>]
//!   orderlens bounds [--data-dir <dir>]
//!
//! Examples:
//!   orderlens report --data-dir Cleaned --top-n 5
//!   orderlens report --category toys --category books --metric refunds-by-category
//!   orderlens report --shipping-min 0 --shipping-max 20 --format json

use clap::{Args, Parser, Subcommand, ValueEnum};
use orderlens::config::{OutputFormat, Settings};
use orderlens::dataset::DatasetStore;
use orderlens::filter::{FilterContext, FilterParams};
use orderlens::{render, Dashboard, Metric};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "orderlens")]
#[command(about = "orderlens - Descriptive analytics over e-commerce order data")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dashboard for a filter selection
    Report {
        #[command(flatten)]
        data: DataArgs,

        /// Number of top categories to show
        #[arg(short = 'n', long)]
        top_n: Option<i64>,

        /// Restrict to a category (repeatable; "All Categories" for no restriction)
        #[arg(short, long = "category")]
        categories: Vec<String>,

        /// Lower bound of the shipping time range (days)
        #[arg(long)]
        shipping_min: Option<f64>,

        /// Upper bound of the shipping time range (days)
        #[arg(long)]
        shipping_max: Option<f64>,

        /// Lower bound of the review score range
        #[arg(long)]
        review_min: Option<i64>,

        /// Upper bound of the review score range
        #[arg(long)]
        review_max: Option<i64>,

        /// Only compute these metrics (repeatable)
        #[arg(short, long = "metric")]
        metrics: Vec<MetricArg>,

        /// Output format
        #[arg(short, long)]
        format: Option<FormatArg>,
    },

    /// List the product categories in the dataset
    Categories {
        #[command(flatten)]
        data: DataArgs,
    },

    /// Show the shipping time bounds of the dataset
    Bounds {
        #[command(flatten)]
        data: DataArgs,
    },
}

#[derive(Args)]
struct DataArgs {
    /// Path to a config file (defaults to ORDERLENS_CONFIG or ./orderlens.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the CSV tables (overrides the config file)
    #[arg(short, long)]
    data_dir: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum MetricArg {
    RevenueByCategory,
    RevenueTrend,
    ShippingTimeByCategory,
    ShippingTimeVsReview,
    RefundsByCategory,
    RefundReviewDistribution,
}

impl From<MetricArg> for Metric {
    fn from(arg: MetricArg) -> Self {
        match arg {
            MetricArg::RevenueByCategory => Metric::RevenueByCategory,
            MetricArg::RevenueTrend => Metric::RevenueTrend,
            MetricArg::ShippingTimeByCategory => Metric::ShippingTimeByCategory,
            MetricArg::ShippingTimeVsReview => Metric::ShippingTimeVsReview,
            MetricArg::RefundsByCategory => Metric::RefundsByCategory,
            MetricArg::RefundReviewDistribution => Metric::RefundReviewDistribution,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum FormatArg {
    /// Aligned text tables
    Text,
    /// JSON for a chart front end
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("orderlens=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            data,
            top_n,
            categories,
            shipping_min,
            shipping_max,
            review_min,
            review_max,
            metrics,
            format,
        } => {
            let Some((settings, store)) = load(&data) else {
                return ExitCode::FAILURE;
            };

            let mut params: FilterParams = settings.filters.to_params();
            if let Some(n) = top_n {
                params.top_n = n;
            }
            if !categories.is_empty() {
                params.categories = categories;
            }
            if shipping_min.is_some() || shipping_max.is_some() {
                let (min, max) = params
                    .shipping_time
                    .unwrap_or((f64::NEG_INFINITY, f64::INFINITY));
                params.shipping_time =
                    Some((shipping_min.unwrap_or(min), shipping_max.unwrap_or(max)));
            }
            if review_min.is_some() || review_max.is_some() {
                let (min, max) = params.review_score.unwrap_or((1, 5));
                params.review_score = Some((review_min.unwrap_or(min), review_max.unwrap_or(max)));
            }

            let metrics: Vec<Metric> = if metrics.is_empty() {
                Metric::ALL.to_vec()
            } else {
                metrics.into_iter().map(Metric::from).collect()
            };
            let format = format.map(OutputFormat::from).unwrap_or(settings.output.format);

            cmd_report(&store, FilterContext::new(params), &metrics, format)
        }
        Commands::Categories { data } => match load(&data) {
            Some((_, store)) => {
                for category in store.categories() {
                    println!("{}", category);
                }
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
        Commands::Bounds { data } => match load(&data) {
            Some((_, store)) => {
                match store.shipping_time_bounds() {
                    Some((min, max)) => println!("shipping_time: {}..={} days", min, max),
                    None => println!("shipping_time: no delivered orders"),
                }
                ExitCode::SUCCESS
            }
            None => ExitCode::FAILURE,
        },
    }
}

/// Read settings and the dataset, reporting failures on stderr.
fn load(data: &DataArgs) -> Option<(Settings, DatasetStore)> {
    let settings = match &data.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return None;
        }
    };

    let source = match &data.data_dir {
        Some(dir) => settings.dataset.source_in(dir),
        None => settings.dataset.source(),
    };
    let source = match source {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return None;
        }
    };

    match DatasetStore::load(&source) {
        Ok(store) => Some((settings, store)),
        Err(e) => {
            eprintln!("Failed to load dataset: {}", e);
            None
        }
    }
}

fn cmd_report(
    store: &DatasetStore,
    ctx: FilterContext,
    metrics: &[Metric],
    format: OutputFormat,
) -> ExitCode {
    info!(top_n = ctx.top_n(), metrics = metrics.len(), "computing dashboard");
    let report = Dashboard::compute_only(store, &ctx, metrics);

    match format {
        OutputFormat::Text => {
            print!("{}", render::text(&report));
            ExitCode::SUCCESS
        }
        OutputFormat::Json => match render::json(&report) {
            Ok(json) => {
                println!("{}", json);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Failed to serialize report: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}
