//! Sector stock comparison dashboard
//!
//! # Usage
//!
//! ```bash
//! # Interactive terminal dashboard
//! stockdash --sector finance
//!
//! # One report printed to stdout
//! stockdash --sector Technology --tickers AAPL,MSFT --once
//! stockdash --tickers NVDA --once --json
//! ```

mod app;
mod tui;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use stockdash_core::{Dashboard, DashboardConfig, Sector, Selection, formatter};
use stockdash_utils::{Settings, init_file_tracing, init_tracing};
use tracing::info;

use crate::app::App;

#[derive(Parser, Debug)]
#[command(name = "stockdash")]
#[command(about = "Compare stocks within an industry sector", long_about = None)]
struct Args {
    /// Sector to start in (technology, healthcare, finance, energy, utilities)
    #[arg(short, long, default_value = "technology")]
    sector: Sector,

    /// Comma-separated tickers from the sector to select
    #[arg(short, long, value_delimiter = ',')]
    tickers: Vec<String>,

    /// Print a single report and exit instead of opening the dashboard
    #[arg(long)]
    once: bool,

    /// Emit the one-shot report as JSON
    #[arg(long, requires = "once")]
    json: bool,

    /// Per-ticker fetch timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Number of tickers fetched at the same time
    #[arg(long)]
    concurrency: Option<usize>,

    /// Log file for the interactive dashboard
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Width of the text sparklines in one-shot mode
    #[arg(long, default_value_t = 60)]
    chart_width: usize,
}

impl Args {
    fn dashboard_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut builder = DashboardConfig::builder().with_env();
        if let Some(secs) = self.timeout_secs {
            builder = builder.fetch_timeout(Duration::from_secs(secs));
        }
        if let Some(n) = self.concurrency {
            builder = builder.max_concurrent_fetches(n);
        }
        Ok(builder.build()?)
    }

    fn selection(&self) -> anyhow::Result<Selection> {
        let tickers = self
            .tickers
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty());
        Ok(Selection::with_tickers(self.sector, tickers)?)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut settings = Settings::from_env();
    if let Some(path) = &args.log_file {
        settings = settings.with_log_file(path.clone());
    }

    if args.once {
        init_tracing(&settings.log_filter);
    } else {
        init_file_tracing(&settings.log_filter, &settings.log_file).with_context(|| {
            format!("Failed to open log file {}", settings.log_file.display())
        })?;
    }

    let config = args.dashboard_config()?;
    let selection = args.selection()?;
    info!(
        sector = %selection.sector(),
        tickers = ?selection.tickers(),
        once = args.once,
        "Starting stockdash"
    );

    let dashboard = Dashboard::yahoo(config);

    if args.once {
        let report = dashboard.run(&selection).await;
        if args.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print!(
                "{}",
                formatter::render_text(&settings.app_name, &report, args.chart_width)
            );
        }
        return Ok(());
    }

    tui::run(&dashboard, App::new(settings.app_name, selection)).await
}
