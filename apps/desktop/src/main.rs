use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use dashboard_core::{
    chart::ChartSpec, load_settings_from, Dashboard, DashboardEvent, Settings, ViewState,
};
use shared::protocol::BenchmarkRecord;
use tokio::sync::broadcast;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "vedabyte", about = "Command-line front end for the Vedabyte engine")]
struct Cli {
    /// Engine service base address; overrides config file and environment.
    #[arg(long, global = true)]
    backend_url: Option<String>,
    /// Config file to read instead of ./vedabyte.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the preprocessor over a comma separated digit list, e.g. "12, 45, 7".
    Process { digits: String },
    /// Fetch the engine comparison series.
    Benchmark {
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = resolve_settings(&cli);
    let dashboard = Dashboard::from_settings(&settings, ViewState::new())
        .context("failed to configure engine backend")?;
    let mut events = dashboard.subscribe_events();

    match cli.command {
        Command::Process { digits } => {
            dashboard.set_input(digits);
            info!(digits = ?dashboard.snapshot().digits(), "parsed input");
            dashboard
                .submit_input()
                .await
                .context("process task did not complete")?;

            if let Some(message) = first_alert(&mut events) {
                bail!(message);
            }
            match dashboard.snapshot().result_text() {
                Some(text) => println!("Processed Output: {text}"),
                None => bail!("engine returned no result"),
            }
        }
        Command::Benchmark { json } => {
            dashboard
                .fetch_benchmark()
                .await
                .context("benchmark task did not complete")?;

            if !benchmark_updated(&mut events) {
                bail!("benchmark unavailable; see log output for the cause");
            }
            let snapshot = dashboard.snapshot();
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot.benchmark)?);
            } else {
                print_benchmark(&snapshot.benchmark, &dashboard.chart_spec());
            }
        }
    }

    dashboard.shutdown();
    Ok(())
}

fn resolve_settings(cli: &Cli) -> Settings {
    let mut settings = load_settings_from(cli.config.as_deref());
    if let Some(url) = &cli.backend_url {
        settings.backend_url = url.clone();
    }
    // One-shot commands fetch explicitly.
    settings.fetch_benchmark_on_start = false;
    settings
}

fn first_alert(events: &mut broadcast::Receiver<DashboardEvent>) -> Option<String> {
    while let Ok(event) = events.try_recv() {
        if let DashboardEvent::Alert { message, .. } = event {
            return Some(message);
        }
    }
    None
}

fn benchmark_updated(events: &mut broadcast::Receiver<DashboardEvent>) -> bool {
    while let Ok(event) = events.try_recv() {
        if matches!(event, DashboardEvent::BenchmarkUpdated { .. }) {
            return true;
        }
    }
    false
}

fn print_benchmark(records: &[BenchmarkRecord], chart: &ChartSpec) {
    println!("{}", chart.title);
    println!(
        "{:>8}  {:>12}  {:>12}  {:>9}  {:>12}",
        "digits", "vedic (s)", "numpy (s)", "ratio", "vedic ops"
    );
    for record in records {
        let ratio = if record.numpy > 0.0 {
            format!("{:.2}x", record.vedic / record.numpy)
        } else {
            "-".to_string()
        };
        let ops = record
            .vedic_ops
            .map(|ops| ops.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:>8}  {:>12.3e}  {:>12.3e}  {:>9}  {:>12}",
            record.digits, record.vedic, record.numpy, ratio, ops
        );
    }

    let (x_lo, x_hi) = chart.x_axis.domain;
    let (y_lo, y_hi) = chart.y_axis.domain;
    println!(
        "x: {}..{} (linear)  y: {}..{} (log10)  points: {}",
        chart.x_axis.format_tick(x_lo),
        chart.x_axis.format_tick(x_hi),
        chart.y_axis.format_tick(y_lo),
        chart.y_axis.format_tick(y_hi),
        chart.point_count()
    );
}
