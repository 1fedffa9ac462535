use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use booking_form::{
    config::{parse_today, Config},
    console::{validate_document, Console},
    form::{FormSession, LogSubmitter},
    validation::BookingSchema,
    AppResult,
};

/// Travel booking form: station selection and passenger details
#[derive(Parser, Debug)]
#[command(name = "booking-form")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Treat this date (YYYY-MM-DD) as today
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the selectable stations
    Stations,

    /// Validate a booking JSON document and submit it if valid
    Validate {
        /// Path to the booking JSON, or `-` for stdin
        #[arg(default_value = "-")]
        input: PathBuf,
    },

    /// Fill in a booking form with line commands
    Session {
        /// Path to a command script, or `-` for stdin
        #[arg(default_value = "-")]
        script: PathBuf,
    },
}

fn main() -> ExitCode {
    // Initialize tracing on stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booking_form=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> AppResult<ExitCode> {
    let mut config = Config::from_env()?;
    if let Some(today) = cli.today.as_deref() {
        config.today = Some(parse_today(today)?);
    }
    tracing::debug!(
        stations = config.stations.len(),
        today = ?config.today,
        "Configuration loaded"
    );

    match cli.command {
        Command::Stations => {
            for station in config.stations.iter() {
                println!("{}", station);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Validate { input } => validate(&config, &input),
        Command::Session { script } => {
            let clock = config.clock();
            let session = FormSession::new(
                BookingSchema::new(config.stations),
                clock,
                Box::new(LogSubmitter),
            );
            let mut console = Console::new(session, io::stdout().lock());
            console.run(open_input(&script)?)?;
            tracing::info!(submissions = console.submissions(), "Session finished");
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn validate(config: &Config, input: &Path) -> AppResult<ExitCode> {
    let mut raw = String::new();
    open_input(input)?.read_to_string(&mut raw)?;

    let schema = BookingSchema::new(config.stations.clone());
    let report = validate_document(&raw, &schema, config.clock().as_ref(), &mut LogSubmitter)?;
    println!("{}", report.output);
    Ok(ExitCode::from(report.exit_status()))
}

fn open_input(path: &Path) -> AppResult<Box<dyn BufRead>> {
    if path.as_os_str() == "-" {
        Ok(Box::new(BufReader::new(io::stdin())))
    } else {
        Ok(Box::new(BufReader::new(File::open(path)?)))
    }
}
