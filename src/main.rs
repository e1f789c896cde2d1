use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{debug, error};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use expense_tracker::cli::{
    handle_audit_command, handle_backup_command, handle_category_command, handle_event_command,
    handle_expense_command, handle_export_command, BackupCommands, CategoryCommands,
    EventCommands, ExpenseCommands, ExportCommands,
};
use expense_tracker::config::{paths::TrackerPaths, settings::Settings};
use expense_tracker::storage::{init::initialize_storage, Storage};
use expense_tracker::TrackerError;

#[derive(Parser)]
#[command(
    name = "expenses",
    version,
    about = "Track monthly fixed expenses and calendar events",
    long_about = "Record fixed expenses per month, mark them paid or pending, group them \
                  by category and keep a simple calendar of events. Data lives in plain \
                  JSON files under the data directory (EXPENSE_TRACKER_DATA_DIR)."
)]
struct Cli {
    /// Log level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, global = true, default_value_t = LevelFilter::WARN)]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fixed expense commands
    #[command(subcommand)]
    Expense(ExpenseCommands),

    /// Category list commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Calendar event commands
    #[command(subcommand)]
    Event(EventCommands),

    /// Backup and restore
    #[command(subcommand)]
    Backup(BackupCommands),

    /// Export data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent changes from the audit log
    Audit {
        /// Number of entries to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Create the data directory, default settings and categories
    Init,

    /// Show paths and settings
    Config,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.log_level);
    debug!("Log level set to {}", cli.log_level.to_string().to_lowercase());

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => match e.downcast_ref::<TrackerError>() {
            // Rejected input: nothing was written
            Some(err) if err.is_warning() => {
                eprintln!("Warning: {}", err);
                ExitCode::SUCCESS
            }
            _ => {
                error!("Exiting with error: {e:#}");
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run(cli: Cli) -> Result<()> {
    let paths = TrackerPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let storage = Storage::new(paths.clone())?;

    match cli.command {
        Some(Commands::Expense(cmd)) => handle_expense_command(&storage, &settings, cmd)?,
        Some(Commands::Category(cmd)) => handle_category_command(&storage, cmd)?,
        Some(Commands::Event(cmd)) => handle_event_command(&storage, &settings, cmd)?,
        Some(Commands::Backup(cmd)) => handle_backup_command(&paths, &settings, cmd)?,
        Some(Commands::Export(cmd)) => handle_export_command(&storage, &settings, cmd)?,
        Some(Commands::Audit { limit }) => handle_audit_command(&storage, limit)?,
        Some(Commands::Init) => {
            println!("Initializing expense tracker at: {}", paths.base_dir().display());
            let report = initialize_storage(&paths)?;
            if !paths.is_initialized() {
                settings.save(&paths)?;
            }

            if report.seeded_categories {
                let categories = storage.categories.load();
                println!("Default categories created: {}", categories.names().join(", "));
            }
            if report.migrated_expenses > 0 || report.migrated_events > 0 {
                println!(
                    "Updated {} expense(s) and {} event(s) to the current format",
                    report.migrated_expenses, report.migrated_events
                );
            }
            println!("Initialization complete!");
        }
        Some(Commands::Config) => {
            println!("Base directory:   {}", paths.base_dir().display());
            println!("Data directory:   {}", paths.data_dir().display());
            println!("Backup directory: {}", paths.backup_dir().display());
            println!();
            println!("Months:   {}", settings.months.join(", "));
            println!("People:   {}", settings.people.join(", "));
            println!("Currency: {}", settings.currency_symbol);
            println!("Backups kept: {}", settings.backup_retention.count);
        }
        None => {
            println!("expenses - monthly fixed expenses and calendar events");
            println!();
            println!("Run 'expenses --help' for usage information.");
        }
    }

    Ok(())
}

/// Initializes the tracing subscriber.
fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => EnvFilter::from_default_env(),
        None => EnvFilter::new(format!(
            "expense_tracker={},{}={}",
            level,
            env!("CARGO_BIN_NAME"),
            level
        )),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
