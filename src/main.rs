use clap::{Parser, Subcommand};
use projectdash::actions::ActionClient;
use projectdash::dashboard::{DashboardConfig, DashboardController, DashboardState};
use projectdash::environment::Environment;
use projectdash::format::{format_currency, format_percentage};
use projectdash::orm::OrmClient;
use projectdash::reporter::ErrorReporter;
use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
/// Command-line arguments
struct Args {
    /// Command to execute
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the dashboard once and print the snapshot
    Fetch {
        /// Host environment (local, staging, production)
        #[arg(long, value_name = "ENVIRONMENT")]
        environment: Option<String>,
    },
    /// Reload the dashboard periodically and print each snapshot
    Watch {
        /// Host environment (local, staging, production)
        #[arg(long, value_name = "ENVIRONMENT")]
        environment: Option<String>,

        /// Seconds between refreshes
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    match args.command {
        Command::Fetch { environment } => {
            let controller = build_controller(resolve_environment(environment));
            controller.initialize().await;
            print_snapshot(&controller.current_state());
            Ok(())
        }
        Command::Watch {
            environment,
            interval,
        } => {
            let controller = build_controller(resolve_environment(environment));
            controller.initialize().await;
            print_snapshot(&controller.current_state());

            loop {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => break,
                    _ = tokio::time::sleep(Duration::from_secs(interval)) => {
                        controller.refresh().await;
                        print_snapshot(&controller.current_state());
                    }
                }
            }
            Ok(())
        }
    }
}

/// Flag value wins over `PROJECTDASH_ENVIRONMENT`; unknown values fall back
/// to the default environment.
fn resolve_environment(flag: Option<String>) -> Environment {
    let name = flag
        .or_else(|| std::env::var("PROJECTDASH_ENVIRONMENT").ok())
        .unwrap_or_default();
    name.parse::<Environment>().unwrap_or_default()
}

fn build_controller(environment: Environment) -> DashboardController {
    DashboardController::new(
        Arc::new(OrmClient::new(environment)),
        Arc::new(ActionClient::new(environment)),
        ErrorReporter::new(),
        DashboardConfig::default(),
    )
}

fn print_snapshot(state: &DashboardState) {
    if let Some(error) = &state.last_error {
        println!(
            "Load failed during {} at {}: {}",
            error.phase, error.occurred_at, error.message
        );
    }

    println!("Aggregates:");
    for (name, value) in &state.aggregates {
        println!("  {name}: {}", format_metric(name, *value));
    }

    if !state.kpis.is_empty() {
        println!("KPIs:");
        for (name, value) in &state.kpis {
            println!("  {name}: {}", format_metric(name, *value));
        }
    }

    println!("Projects ({}):", state.records.len());
    for record in &state.records {
        println!(
            "  #{} {} [{}] customer={} manager={} tasks={}",
            record.id,
            record.display_name,
            record.stage,
            record.customer,
            record.manager,
            record.task_count,
        );
    }
}

/// Counts print as integers, margins as percentages, money as currency.
fn format_metric(name: &str, value: f64) -> String {
    if name.ends_with("_projects") || name.ends_with("_tasks") || name.ends_with("_count") {
        format!("{}", value as i64)
    } else if name.contains("margin") || name.contains("rate") || name.ends_with("_pct") {
        format_percentage(value)
    } else {
        format_currency(value, "$")
    }
}
