//! CLI commands for data export

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::config::settings::Settings;
use crate::error::{TrackerError, TrackerResult};
use crate::export::{export_expenses_csv, export_expenses_json, export_full_json};
use crate::models::ExpenseScope;
use crate::storage::Storage;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export expenses
    Expenses {
        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Only export one month
        #[arg(short, long)]
        month: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Export expenses, categories and events as one JSON document
    All {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Handle export commands
pub fn handle_export_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ExportCommands,
) -> TrackerResult<()> {
    match cmd {
        ExportCommands::Expenses {
            format,
            month,
            output,
        } => {
            let expenses = match month {
                Some(month) => {
                    let scope = ExpenseScope::month(settings.resolve_month(&month)?);
                    storage.expenses.load_scope(&scope)
                }
                None => storage.expenses.load(),
            };

            let mut writer = open_output(output.as_ref())?;
            match format {
                ExportFormat::Csv => export_expenses_csv(&expenses, &mut writer)?,
                ExportFormat::Json => export_expenses_json(&expenses, &mut writer)?,
            }
            writer.flush()?;

            if let Some(path) = output {
                eprintln!("Exported {} expense(s) to {}", expenses.len(), path.display());
            }
        }

        ExportCommands::All { output } => {
            let mut writer = open_output(output.as_ref())?;
            export_full_json(storage, &mut writer)?;
            writer.flush()?;

            if let Some(path) = output {
                eprintln!("Exported all data to {}", path.display());
            }
        }
    }

    Ok(())
}

fn open_output(output: Option<&PathBuf>) -> TrackerResult<Box<dyn Write>> {
    match output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                TrackerError::Export(format!("Failed to create {}: {}", path.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}
