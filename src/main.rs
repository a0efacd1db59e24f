use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use insight_dashboard::config::{init_logging, resolve_data_paths};
use insight_dashboard::export::DEFAULT_EXPORT_LIMIT;
use insight_dashboard::pagination::{DEFAULT_LIMIT, DEFAULT_PAGE};
use insight_dashboard::{ChartKind, DatasetLoader, FilterCriteria, InsightService};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "insight-dashboard")]
#[command(about = "Query the insights dataset from the command line")]
struct Cli {
    /// Path to the JSON dataset (default: ./jsondata.json, then ../jsondata.json)
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summary statistics for the filtered subset
    Stats(FilterArgs),
    /// Chart series for one metric
    Chart {
        /// Chart type, e.g. intensityByRegion, topicDistribution, yearlyTrends
        #[arg(short, long, default_value = "intensityByRegion")]
        kind: String,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Distinct values available for each filter
    Options,
    /// One page of matching insights
    List {
        #[arg(long, default_value_t = DEFAULT_PAGE)]
        page: usize,
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
        #[command(flatten)]
        filters: FilterArgs,
    },
    /// Matching insights as CSV
    Export {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long, default_value_t = DEFAULT_EXPORT_LIMIT)]
        limit: usize,
        #[command(flatten)]
        filters: FilterArgs,
    },
}

#[derive(Args, Default)]
struct FilterArgs {
    #[arg(long)]
    end_year: Option<String>,
    #[arg(long)]
    topic: Option<String>,
    #[arg(long)]
    sector: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    pestle: Option<String>,
    #[arg(long)]
    source: Option<String>,
    #[arg(long)]
    swot: Option<String>,
    #[arg(long)]
    country: Option<String>,
    #[arg(long)]
    city: Option<String>,
}

impl From<FilterArgs> for FilterCriteria {
    fn from(args: FilterArgs) -> Self {
        FilterCriteria {
            end_year: args.end_year,
            topic: args.topic,
            sector: args.sector,
            region: args.region,
            pestle: args.pestle,
            source: args.source,
            swot: args.swot,
            country: args.country,
            city: args.city,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging(Some("warn"));

    let cli = Cli::parse();
    let service = InsightService::new(DatasetLoader::new(resolve_data_paths(cli.data)));

    match cli.command {
        Command::Stats(filters) => {
            print_json(&service.stats(&filters.into())?)?;
        }
        Command::Chart { kind, filters } => {
            let kind: ChartKind = kind.parse().map_err(anyhow::Error::msg)?;
            print_json(&service.chart(&filters.into(), kind)?)?;
        }
        Command::Options => {
            print_json(&service.filter_options()?)?;
        }
        Command::List { page, limit, filters } => {
            print_json(&service.list(&filters.into(), page, limit)?)?;
        }
        Command::Export { output, limit, filters } => {
            let csv = service.export_csv(&filters.into(), 1, limit)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .with_context(|| format!("Failed to write {}", path.display()))?;
                    info!("Exported insights to {}", path.display());
                }
                None => print!("{}", csv),
            }
        }
    }

    Ok(())
}
