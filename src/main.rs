//! Command-line entry point for the circuit standings viewer
//!
//! Loads configuration and a data snapshot, then prints one report as text
//! or JSON.

use anyhow::{anyhow, Result};
use circuit_standings::config::{validate_config, AppConfig};
use circuit_standings::report::text::{
    render_circuit_list, render_class_standings, render_parent_view, render_student_report,
};
use circuit_standings::{
    CircuitList, ClassLevel, ClassStandings, InMemoryResultSource, ParentView, RoundId,
    RoundSelector, StudentReport,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info};

/// Circuit Standings - scores, history and class rankings for the abacus circuit
#[derive(Parser)]
#[command(name = "circuit-standings", version, about)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Snapshot override
    #[arg(long, value_name = "FILE", help = "Override the JSON data snapshot path")]
    snapshot: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)"
    )]
    log_level: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Dry run mode (validate config and exit)
    #[arg(
        long,
        help = "Validate configuration and exit without reading any data"
    )]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Command {
    /// List the most recent circuit rounds
    Circuits {
        /// Number of rounds to list (defaults to the configured limit)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show the standings of one class in one round
    Ranking {
        #[arg(long)]
        round: RoundId,
        /// Class level: F0, F1, F2 (or 0, 1, 2)
        #[arg(long = "class")]
        class_level: ClassLevel,
    },
    /// Show a student's result, rank and history
    Student {
        #[arg(long)]
        id: String,
        /// Round number or "latest"
        #[arg(long, default_value = "latest")]
        round: RoundSelector,
    },
    /// List a parent's children, or show the report of an only child
    Children {
        #[arg(long)]
        parent: String,
        /// Round number or "latest" for an only child's report
        #[arg(long, default_value = "latest")]
        round: RoundSelector,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if let Some(snapshot) = &args.snapshot {
        config.data.snapshot_path = Some(snapshot.clone());
    }

    validate_config(&config)?;
    Ok(config)
}

/// Display startup information
fn display_startup_banner(config: &AppConfig) {
    info!("Circuit Standings v{}", circuit_standings::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    match &config.data.snapshot_path {
        Some(path) => info!("   Snapshot: {}", path.display()),
        None => info!("   Snapshot: (none)"),
    }
    info!("   History limit: {}", config.reports.history_limit);
    info!("   Circuit list limit: {}", config.reports.circuit_list_limit);
}

fn emit<T: Serialize>(format: OutputFormat, report: &T, render: fn(&T) -> String) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", render(report)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
    }
    Ok(())
}

async fn run(args: &Args, config: &AppConfig, command: &Command) -> Result<()> {
    let snapshot_path = config.data.snapshot_path.as_ref().ok_or_else(|| {
        anyhow!("No snapshot configured; pass --snapshot or set SNAPSHOT_PATH")
    })?;
    let source = InMemoryResultSource::load(snapshot_path)?;

    match command {
        Command::Circuits { limit } => {
            let limit = limit.unwrap_or(config.reports.circuit_list_limit);
            let list = CircuitList::build(&source, limit).await?;
            emit(args.format, &list, render_circuit_list)
        }
        Command::Ranking { round, class_level } => {
            let standings = ClassStandings::build(&source, *round, *class_level).await?;
            emit(args.format, &standings, render_class_standings)
        }
        Command::Student { id, round } => {
            let report =
                StudentReport::build(&source, id, *round, config.reports.history_limit).await?;
            emit(args.format, &report, render_student_report)
        }
        Command::Children { parent, round } => {
            let view =
                ParentView::build(&source, parent, *round, config.reports.history_limit).await?;
            emit(args.format, &view, render_parent_view)
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });

    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    display_startup_banner(&config);

    if args.dry_run {
        info!("Configuration validation successful");
        return Ok(());
    }

    let Some(command) = args.command.clone() else {
        return Err(anyhow!("No command given; see --help"));
    };

    if let Err(e) = run(&args, &config, &command).await {
        error!("{:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ranking_command() {
        let args = Args::try_parse_from([
            "circuit-standings",
            "--snapshot",
            "data.json",
            "ranking",
            "--round",
            "12",
            "--class",
            "F1",
        ])
        .unwrap();

        assert_eq!(args.snapshot, Some(PathBuf::from("data.json")));
        assert_eq!(
            args.command,
            Some(Command::Ranking {
                round: 12,
                class_level: ClassLevel::F1
            })
        );
    }

    #[test]
    fn test_parse_student_defaults_to_latest() {
        let args =
            Args::try_parse_from(["circuit-standings", "--format", "json", "student", "--id", "s1"])
                .unwrap();

        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(
            args.command,
            Some(Command::Student {
                id: "s1".to_string(),
                round: RoundSelector::Latest
            })
        );
    }

    #[test]
    fn test_parse_children_command() {
        let args = Args::try_parse_from([
            "circuit-standings",
            "children",
            "--parent",
            "p-17",
            "--round",
            "12",
        ])
        .unwrap();

        assert_eq!(
            args.command,
            Some(Command::Children {
                parent: "p-17".to_string(),
                round: RoundSelector::Round(12)
            })
        );

        assert!(Args::try_parse_from(["circuit-standings", "children"]).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_class() {
        let result = Args::try_parse_from([
            "circuit-standings",
            "ranking",
            "--round",
            "1",
            "--class",
            "F9",
        ]);
        assert!(result.is_err());
    }
}
