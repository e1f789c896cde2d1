//! Category CLI commands

use clap::Subcommand;

use crate::display::format_category_list;
use crate::error::TrackerResult;
use crate::services::CategoryService;
use crate::storage::Storage;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Add a category at the end of the list
    Add {
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        /// Current name
        old: String,
        /// New name
        new: String,
        /// Also rewrite expenses that use the old name
        #[arg(long)]
        cascade: bool,
    },

    /// Remove a category (expenses keep the name)
    Remove {
        /// Category name
        name: String,
    },
}

/// Handle a category command
pub fn handle_category_command(storage: &Storage, cmd: CategoryCommands) -> TrackerResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&service.list()));
        }

        CategoryCommands::Add { name } => {
            let name = service.add(&name)?;
            println!("Added category: {}", name);
        }

        CategoryCommands::Rename { old, new, cascade } => {
            let renamed = service.rename(&old, &new, cascade)?;
            println!("Renamed category: {} -> {}", renamed.old, renamed.new);
            if cascade {
                println!("  Updated {} expense(s)", renamed.expenses_updated);
            }
        }

        CategoryCommands::Remove { name } => {
            let name = service.remove(&name)?;
            println!("Removed category: {}", name);
        }
    }

    Ok(())
}
