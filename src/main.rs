use anyhow::{Context, Result};
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use serde_json::Value;
use statuspage_provider::config::{FileConfig, ProviderConfig};
use statuspage_provider::resource::{self, Operation, ResourceKind};
use statuspage_provider::statuspage::client::StatuspageClient;
use statuspage_provider::statuspage::http::{format_api_error, is_api_error};
use statuspage_provider::ProviderError;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Statuspage components and component groups as code
#[derive(Parser, Debug)]
#[command(name = "statuspage-provider", version, about, long_about = None)]
struct Args {
    /// Statuspage API token
    #[arg(long, env = "STATUSPAGE_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Statuspage API base URL
    #[arg(long, env = "STATUSPAGE_API_URL", global = true)]
    api_url: Option<String>,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the schema of every resource type
    Schema,
    /// Create a resource and print its state
    Create(StateArgs),
    /// Refresh a resource and print its state (null when gone)
    Read(StateArgs),
    /// Update a resource and print its state
    Update(StateArgs),
    /// Delete a resource
    Delete(StateArgs),
    /// Import an existing resource from `page_id/resource_id`
    Import {
        /// Resource type, e.g. statuspage_component
        resource_type: String,
        /// Import id in the form `page_id/resource_id`
        id: String,
    },
}

#[derive(ClapArgs, Debug)]
struct StateArgs {
    /// Resource type, e.g. statuspage_component
    resource_type: String,

    /// JSON state file (reads stdin when omitted)
    #[arg(long)]
    state: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Logs go to a file; stdout carries state for the host
fn setup_logging(level: LogLevel) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let tracing_level = level.to_tracing_level()?;

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Warning: cannot open log file {:?}: {}", log_path, e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("statuspage-provider started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Some(guard)
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("statuspage-provider")
            .join("statuspage-provider.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".statuspage-provider")
            .join("statuspage-provider.log");
    }
    PathBuf::from("statuspage-provider.log")
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("operation failed: {:#}", err);
            eprintln!("Error: {:#}", err);
            match err.downcast_ref::<ProviderError>() {
                Some(ProviderError::UnknownResourceType(_)) => eprintln!(
                    "Hint: supported resource types: {}",
                    resource::get_all_type_names().join(", ")
                ),
                Some(_) => {}
                None if is_api_error(&err) => eprintln!("Hint: {}", format_api_error(&err)),
                None => {}
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let (resource_type, operation) = match args.command {
        Command::Schema => {
            return print_json(&serde_json::to_value(resource::get_registry())?);
        }
        Command::Create(state) => (state.resource_type.clone(), Operation::Create(state.load()?)),
        Command::Read(state) => (state.resource_type.clone(), Operation::Read(state.load()?)),
        Command::Update(state) => (state.resource_type.clone(), Operation::Update(state.load()?)),
        Command::Delete(state) => (state.resource_type.clone(), Operation::Delete(state.load()?)),
        Command::Import { resource_type, id } => (resource_type, Operation::Import(id)),
    };
    let kind: ResourceKind = resource_type.parse()?;

    let file_config = match &args.config {
        Some(path) => FileConfig::load_from(path)?,
        None => FileConfig::load(),
    };
    let config = ProviderConfig::resolve(args.token, args.api_url, &file_config)?;
    tracing::info!("Using Statuspage API at {}", config.api_url);

    let client = StatuspageClient::new(&config)?;
    let result = resource::dispatch(kind, operation, &client).await?;

    print_json(&result)
}

impl StateArgs {
    fn load(&self) -> Result<Value> {
        read_state(self.state.as_deref())
    }
}

fn read_state(path: Option<&Path>) -> Result<Value> {
    let content = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read state file {:?}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read state from stdin")?;
            buffer
        }
    };

    serde_json::from_str(&content).context("State is not valid JSON")
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
