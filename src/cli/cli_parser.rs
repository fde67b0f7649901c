use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::{
    config::load_config,
    errors::ReportError,
    logging,
    runner::{DailyCommand, ListCommand, Runner, ShowCommand},
    store::SqliteReportStore,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(long, short, default_value_t = false, help = "Log debug output")]
    verbose: bool,

    #[arg(long, help = "Config file, defaults to ~/.covreport/config")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Commands {
    /// Run coverage, store the summary and send the report
    Run {
        #[arg(long, default_value_t = false, help = "Run on weekends too")]
        force: bool,

        #[arg(
            long,
            default_value_t = false,
            help = "Print the report instead of mailing it"
        )]
        dry_run: bool,
    },
    /// Print the stored summary of a day
    Show {
        #[arg(value_parser = parse_date)]
        date: String,
    },
    /// List the days with a stored summary
    List,
}

fn parse_date(value: &str) -> Result<String, String> {
    if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(value.to_string())
    } else {
        Err(format!("expected YYYYMMDD, got '{}'", value))
    }
}

pub fn parse_cli() -> Result<Box<dyn Runner>, ReportError> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let store = SqliteReportStore::open(&config.store_path).map_err(|e| {
        ReportError::RuntimeError(format!(
            "cannot open report store {}: {}",
            config.store_path.display(),
            e
        ))
    })?;

    let command = cli.command.unwrap_or(Commands::Run {
        force: false,
        dry_run: false,
    });
    let runner: Box<dyn Runner> = match command {
        Commands::Run { force, dry_run } => {
            Box::new(DailyCommand::new(config, store, force, dry_run))
        }
        Commands::Show { date } => Box::new(ShowCommand::new(store, date)),
        Commands::List => Box::new(ListCommand::new(store)),
    };
    Ok(runner)
}
