//! Salesboard CLI
//!
//! Offline access to the dashboard without starting the server:
//! - Print dataset totals and filter options
//! - Run one update and print the chart data
//! - Print the rendered page
//! - Generate a default config file

use anyhow::Context;
use clap::{Parser, Subcommand};
use salesboard::api::dto::{SummaryResponse, UpdateResponse};
use salesboard::config::{generate_default_config, Config};
use salesboard::dashboard::{Dashboard, FilterSelection, UpdateInputs};
use salesboard::dataset::load_dataset;
use salesboard::geo::BoundaryDocument;
use salesboard::layout::{build_layout, format_currency, render_page};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "salesboard-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Inspect the sales dashboard from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: standard locations, then environment)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show dataset totals and dropdown options
    Summary,

    /// Run one dashboard update and print the charts as JSON
    Render {
        /// Order year
        #[arg(short, long)]
        year: Option<i32>,
        /// State name
        #[arg(short, long)]
        state: Option<String>,
        /// Product sub-category
        #[arg(long)]
        sub_category: Option<String>,
        /// Open-popup click count
        #[arg(long, default_value = "0")]
        open: u64,
        /// Close-popup click count
        #[arg(long, default_value = "0")]
        close: u64,
    },

    /// Print the rendered dashboard page
    Layout {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr so JSON output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "salesboard=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    match cli.command {
        Commands::Summary => {
            let dashboard = load_dashboard(&config)?;
            let summary = dashboard.summary();

            if cli.format == "json" {
                let response = SummaryResponse::from(summary);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("{}", config.page.title);
                println!();
                println!("Records:         {}", summary.record_count);
                println!("Total Sales:     {}", format_currency(summary.total_sales));
                println!("Total Profit:    {}", format_currency(summary.total_profit));
                println!("Total Customers: {}", summary.total_customers);
                println!();
                println!("Years:          {}", join(&summary.years));
                println!("States:         {}", summary.states.join(", "));
                println!("Sub-categories: {}", summary.sub_categories.join(", "));
            }
        }

        Commands::Render {
            year,
            state,
            sub_category,
            open,
            close,
        } => {
            let dashboard = load_dashboard(&config)?;

            let filter = FilterSelection {
                year,
                state,
                sub_category,
            }
            .normalized();
            let outputs = dashboard.update(&UpdateInputs::new(filter).clicks(open, close));

            if cli.format == "json" {
                let response = UpdateResponse::from(&outputs);
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                println!("Matching records: {}", outputs.record_count);
                println!("Popup: {}", outputs.modal.display());

                for chart in outputs.charts() {
                    println!();
                    println!("{} ({} points)", chart.title, chart.len());
                    println!("{}", "-".repeat(50));
                    for point in &chart.points {
                        println!("{:<35} {:>14.2}", point.label.to_string(), point.value);
                    }
                }
            }
        }

        Commands::Layout { output } => {
            let dashboard = load_dashboard(&config)?;
            let options = config.page.layout_options();
            let page = render_page(&build_layout(dashboard.summary(), &options), &options);

            match output {
                Some(path) => {
                    std::fs::write(&path, page)
                        .with_context(|| format!("writing page to {:?}", path))?;
                    println!("Page written to: {:?}", path);
                }
                None => print!("{}", page),
            }
        }

        Commands::Config { output } => {
            let content = generate_default_config();

            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing config to {:?}", path))?;
                    println!("Config written to: {:?}", path);
                }
                None => print!("{}", content),
            }
        }
    }

    Ok(())
}

fn load_dashboard(config: &Config) -> anyhow::Result<Dashboard> {
    let dataset = load_dataset(&config.data.dataset_path)
        .with_context(|| format!("loading dataset {:?}", config.data.dataset_path))?;
    let boundaries =
        BoundaryDocument::load(&config.data.boundaries_path, &config.data.feature_id_key)
            .with_context(|| format!("loading boundaries {:?}", config.data.boundaries_path))?;

    Ok(Dashboard::new(dataset, boundaries))
}

fn join(values: &[i32]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
