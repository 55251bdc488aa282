//! `extlog` command line.
//!
//! ```text
//! extlog [--config extlog.toml] log --level error "message" --detail "..."
//! extlog show
//! extlog configure --signature <sig> --log-clicks true --threshold 3
//! extlog tail -n 20
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};

use extlog::config::{load_settings, Settings};
use extlog::extension::{ConfigStore, ExtensionResolver, ResolutionOutcome};
use extlog::observability::logging::init_logging;
use extlog::{
    ErrorReporter, ExtensionConfig, JsonConfigStore, JsonLinesRecordStore, LogCall, LoggerBuilder,
    Severity,
};

#[derive(Parser)]
#[command(name = "extlog")]
#[command(about = "Extension-grouped leveled logger", long_about = None)]
struct Cli {
    /// Settings file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit one record
    Log(LogArgs),
    /// Print the resolved extension and its config
    Show,
    /// Update the stored config of an extension
    Configure(ConfigureArgs),
    /// Print the last records of the record store
    Tail {
        #[arg(short = 'n', long, default_value_t = 10)]
        lines: usize,
    },
}

#[derive(Args)]
struct LogArgs {
    message: String,

    /// Severity name or number; the logger threshold when omitted
    #[arg(short, long)]
    level: Option<Severity>,

    #[arg(long)]
    detail: Option<String>,

    #[arg(long)]
    incident: Option<String>,

    #[arg(long)]
    contact: Option<String>,

    #[arg(long)]
    source_file: Option<String>,

    #[arg(long)]
    function: Option<String>,
}

#[derive(Args)]
struct ConfigureArgs {
    /// Signature of the extension; the configured one when omitted
    #[arg(long)]
    signature: Option<String>,

    #[arg(long)]
    log_to_file: Option<bool>,

    #[arg(long)]
    log_to_database: Option<bool>,

    #[arg(long)]
    threshold: Option<Severity>,

    #[arg(long)]
    log_clicks: Option<bool>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let settings = match cli.config.as_deref() {
        Some(path) => load_settings(path)?,
        None => Settings::default(),
    };
    init_logging(&settings.observability.log_level);

    match cli.command {
        Commands::Log(args) => log(&settings, args)?,
        Commands::Show => show(&settings)?,
        Commands::Configure(args) => configure(&settings, args)?,
        Commands::Tail { lines } => {
            for row in JsonLinesRecordStore::tail(&settings.storage.records_path, lines)? {
                println!("{}", serde_json::to_string(&row)?);
            }
        }
    }
    Ok(())
}

fn open_store(settings: &Settings) -> Result<Arc<JsonConfigStore>, Box<dyn std::error::Error>> {
    Ok(Arc::new(JsonConfigStore::open(&settings.storage.extensions_path)?))
}

/// Read-mostly commands keep going on defaults when the store is damaged.
fn open_store_or_unavailable(settings: &Settings) -> Arc<dyn ConfigStore> {
    JsonConfigStore::open_or_unavailable(&settings.storage.extensions_path)
}

fn log(settings: &Settings, args: LogArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut logger = LoggerBuilder::from_settings(&settings.logger)
        .config_store(open_store_or_unavailable(settings))
        .record_sink(JsonLinesRecordStore::open(&settings.storage.records_path)?)
        .error_reporter(ErrorReporter::default())
        .build()?;

    let mut call = LogCall::new(args.message);
    if let Some(level) = args.level {
        call = call.severity(level);
    }
    if let Some(detail) = args.detail {
        call = call.detail(detail);
    }
    if let Some(incident) = args.incident {
        call = call.incident(incident);
    }
    if let Some(contact) = args.contact {
        call = call.contact(contact);
    }
    if let Some(file) = args.source_file {
        call = call.source_file(file);
    }
    if let Some(function) = args.function {
        call = call.function_name(function);
    }

    let outcome = logger.log(call);
    tracing::info!(
        loggable = outcome.loggable,
        stored = outcome.stored,
        filed = outcome.filed,
        failures = outcome.failures,
        "Record emitted"
    );
    logger.close();
    Ok(())
}

fn show(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store_or_unavailable(settings);
    let reporter = ErrorReporter::default();
    let resolved = ExtensionResolver::new(store.as_ref(), &reporter)
        .resolve(&settings.logger.extension_name, settings.logger.signature.as_deref());

    let view = serde_json::json!({
        "id": resolved.handle.as_ref().map(|h| h.id),
        "name": resolved.name,
        "signature": resolved.signature,
        "outcome": resolved.outcome.as_str(),
        "config": resolved.config,
    });
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn configure(settings: &Settings, args: ConfigureArgs) -> Result<(), Box<dyn std::error::Error>> {
    let store = open_store(settings)?;
    let signature = args
        .signature
        .or_else(|| settings.logger.signature.clone())
        .ok_or("no signature given or configured")?;

    // Resolving first creates the record when the signature is new.
    let reporter = ErrorReporter::default();
    let resolved = ExtensionResolver::new(store.as_ref(), &reporter)
        .resolve(&settings.logger.extension_name, Some(&signature));
    if matches!(resolved.outcome, ResolutionOutcome::Generic | ResolutionOutcome::Failed) {
        return Err(format!("extension {} cannot be configured", signature).into());
    }

    let mut record = store
        .find_by_signature(&signature)?
        .ok_or_else(|| format!("no extension with signature {}", signature))?;
    let mut config = ExtensionConfig::merge_blob(record.config_blob.as_deref());
    if let Some(value) = args.log_to_file {
        config.log_to_file = value;
    }
    if let Some(value) = args.log_to_database {
        config.log_to_database = value;
    }
    if let Some(value) = args.threshold {
        config.log_threshold = value;
    }
    if let Some(value) = args.log_clicks {
        config.log_clicks = value;
    }

    record.config_blob = Some(config.to_blob());
    store.update(&record)?;
    tracing::info!(id = record.id, name = %record.name, config = ?config, "Extension configured");
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
