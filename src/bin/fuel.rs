//! Fuel CLI - Command-line interface for Yoga Fuel
//!
//! Commands:
//! - post-session: Recovery meals for a completed session
//! - pre-session: Light meals ahead of a scheduled session
//! - goal: Meals filtered for a nutrition goal
//! - search: Search the food catalog
//! - catalog: Print the catalog or one bucket
//! - doctor: Diagnose catalog and configuration

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use chrono::DateTime;
use tracing_subscriber::EnvFilter;

use yoga_fuel::{
    Clock, FixedClock, FoodCatalog, MealRecommender, MealType, RecommendError,
    SessionDescriptor, SystemClock, FUEL_VERSION, PRODUCER_NAME,
};

/// Fuel - Rule-based meal recommendations for yoga sessions
#[derive(Parser)]
#[command(name = "fuel")]
#[command(version = FUEL_VERSION)]
#[command(about = "Recommend Nepali meals around yoga sessions", long_about = None)]
struct Cli {
    /// Food catalog JSON file (defaults to the embedded catalog)
    #[arg(long, global = true, env = "FUEL_CATALOG")]
    catalog: Option<PathBuf>,

    /// Override the current time (RFC 3339)
    #[arg(long, global = true, env = "FUEL_NOW")]
    now: Option<String>,

    /// Log filter directive (e.g. "debug", "yoga_fuel=trace")
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Caller identity recorded in logs
    #[arg(long, global = true, default_value = "guest")]
    user_id: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend recovery meals for a completed session
    PostSession {
        /// Session JSON file path (use - for stdin)
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Suggest meals ahead of a scheduled session
    PreSession {
        /// Scheduled start time (ISO-8601)
        #[arg(long)]
        at: String,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Meals filtered and ordered for a nutrition goal
    Goal {
        /// Goal (weight_loss, weight_gain, muscle_gain)
        goal: String,

        /// Catalog bucket to filter
        #[arg(long, default_value = "lunch")]
        meal_type: String,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Search foods by name or local name
    Search {
        /// Search text
        query: String,

        /// Output format
        #[arg(long, default_value = "json")]
        output_format: OutputFormat,
    },

    /// Print the catalog, or one bucket of it
    Catalog {
        /// Bucket to print (breakfast, lunch, dinner, snacks)
        #[arg(long)]
        category: Option<String>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        output_format: OutputFormat,
    },

    /// Diagnose catalog and configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.log_level.as_deref());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", serde_json::to_string(&CliError::from(e)).unwrap_or_else(|_| "Unknown error".to_string()));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(log_level: Option<&str>) {
    let filter = log_level
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), FuelCliError> {
    let span = tracing::info_span!("fuel", user_id = %cli.user_id);
    let _guard = span.enter();

    if let Commands::Doctor { json } = cli.command {
        return cmd_doctor(cli.catalog.as_deref(), cli.now.as_deref(), json);
    }

    let recommender = build_recommender(cli.catalog.as_deref(), cli.now.as_deref())?;

    match cli.command {
        Commands::PostSession { input, output_format } => {
            cmd_post_session(&recommender, &input, &output_format)
        }

        Commands::PreSession { at, output_format } => {
            let report = recommender.recommend_pre_session(&at)?;
            emit(&report, &output_format)
        }

        Commands::Goal {
            goal,
            meal_type,
            output_format,
        } => {
            let meals = recommender.recommend_by_goal(&goal, Some(&meal_type));
            emit(&meals, &output_format)
        }

        Commands::Search { query, output_format } => {
            if query.is_empty() {
                return Err(RecommendError::MissingField("query".to_string()).into());
            }
            let results = recommender.search_foods(&query);
            emit(&results, &output_format)
        }

        Commands::Catalog {
            category,
            output_format,
        } => {
            let view = recommender.get_catalog(category.as_deref());
            emit(&view, &output_format)
        }

        Commands::Doctor { .. } => Ok(()),
    }
}

fn load_catalog(path: Option<&Path>) -> Result<FoodCatalog, RecommendError> {
    match path {
        Some(path) => FoodCatalog::from_path(path),
        None => FoodCatalog::builtin(),
    }
}

fn build_clock(now: Option<&str>) -> Result<Arc<dyn Clock>, FuelCliError> {
    match now {
        Some(now) => {
            let fixed = DateTime::parse_from_rfc3339(now)
                .map_err(|e| FuelCliError::InvalidNow(format!("{}: {}", now, e)))?;
            Ok(Arc::new(FixedClock::new(fixed)))
        }
        None => Ok(Arc::new(SystemClock)),
    }
}

fn build_recommender(
    catalog: Option<&Path>,
    now: Option<&str>,
) -> Result<MealRecommender, FuelCliError> {
    let catalog = load_catalog(catalog)?;
    let clock = build_clock(now)?;

    tracing::debug!(items = catalog.len(), "catalog loaded");

    Ok(MealRecommender::with_clock(Arc::new(catalog), clock))
}

fn cmd_post_session(
    recommender: &MealRecommender,
    input: &Path,
    output_format: &OutputFormat,
) -> Result<(), FuelCliError> {
    // Read input
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let session: SessionDescriptor = serde_json::from_str(&input_data)?;
    let report = recommender.recommend_post_session(&session);

    emit(&report, output_format)
}

fn cmd_doctor(catalog: Option<&Path>, now: Option<&str>, json: bool) -> Result<(), FuelCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "fuel_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Fuel version {}", FUEL_VERSION),
    });

    let source = match catalog {
        Some(path) => path.display().to_string(),
        None => "embedded".to_string(),
    };

    match load_catalog(catalog) {
        Ok(loaded) => {
            checks.push(DoctorCheck {
                name: "catalog".to_string(),
                status: CheckStatus::Ok,
                message: format!("Catalog loaded from {} ({} items)", source, loaded.len()),
            });

            for meal_type in MealType::ALL {
                let count = loaded.bucket(meal_type).len();
                checks.push(DoctorCheck {
                    name: format!("bucket_{}", meal_type.as_str()),
                    status: if count == 0 {
                        CheckStatus::Warning
                    } else {
                        CheckStatus::Ok
                    },
                    message: format!("{} items", count),
                });
            }
        }
        Err(e) => {
            checks.push(DoctorCheck {
                name: "catalog".to_string(),
                status: CheckStatus::Error,
                message: format!("Cannot load catalog from {}: {}", source, e),
            });
        }
    }

    if let Some(now) = now {
        checks.push(match build_clock(Some(now)) {
            Ok(_) => DoctorCheck {
                name: "clock".to_string(),
                status: CheckStatus::Ok,
                message: format!("Clock fixed at {}", now),
            },
            Err(e) => DoctorCheck {
                name: "clock".to_string(),
                status: CheckStatus::Error,
                message: CliError::from(e).message,
            },
        });
    }

    // post-session reads its session from stdin by default
    let stdin_check = if io::stdin().is_terminal() {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (pass --input for post-session)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (post-session input ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: FUEL_VERSION.to_string(),
        catalog_source: source,
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Fuel Doctor Report");
        println!("==================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("Catalog:  {}", report.catalog_source);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report.checks.iter().any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(FuelCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

fn emit<T: Serialize>(value: &T, format: &OutputFormat) -> Result<(), FuelCliError> {
    let output = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(value)?,
    };
    println!("{}", output);
    Ok(())
}

// Error handling

#[derive(Debug)]
enum FuelCliError {
    Io(io::Error),
    Recommend(RecommendError),
    Json(serde_json::Error),
    InvalidNow(String),
    DoctorFailed,
}

impl From<io::Error> for FuelCliError {
    fn from(e: io::Error) -> Self {
        FuelCliError::Io(e)
    }
}

impl From<RecommendError> for FuelCliError {
    fn from(e: RecommendError) -> Self {
        FuelCliError::Recommend(e)
    }
}

impl From<serde_json::Error> for FuelCliError {
    fn from(e: serde_json::Error) -> Self {
        FuelCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<FuelCliError> for CliError {
    fn from(e: FuelCliError) -> Self {
        match e {
            FuelCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            FuelCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            FuelCliError::Recommend(e) => {
                let (code, hint) = match &e {
                    RecommendError::JsonError(_) => ("JSON_ERROR", "Check JSON syntax"),
                    RecommendError::CatalogError(_) => (
                        "CATALOG_ERROR",
                        "Catalog must be an object with breakfast, lunch, dinner and snacks lists",
                    ),
                    RecommendError::MissingField(_) => {
                        ("MISSING_FIELD", "Provide a non-empty value")
                    }
                    RecommendError::InvalidScheduledTime(_) => (
                        "INVALID_SCHEDULED_TIME",
                        "Use an ISO-8601 time such as 2024-05-01T18:30:00+05:45",
                    ),
                    RecommendError::Io(_) => ("IO_ERROR", "Check file paths and permissions"),
                };
                CliError {
                    code: code.to_string(),
                    message: e.to_string(),
                    hint: Some(hint.to_string()),
                }
            }
            FuelCliError::InvalidNow(msg) => CliError {
                code: "INVALID_NOW".to_string(),
                message: format!("Invalid --now value: {}", msg),
                hint: Some("Use an RFC 3339 time such as 2024-05-01T07:30:00+05:45".to_string()),
            },
            FuelCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    catalog_source: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}
