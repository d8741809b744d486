//! `devotion` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging, open the journal.
//! - Run the interactive shell or a one-shot listing command.

mod render;
mod shell;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use devotion_core::view::list::list_screen;
use devotion_core::view::summary::summary_screen;
use devotion_core::{init_logging, open_journal, ConfigOverrides, EntryId, JournalConfig};
use log::info;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "devotion")]
#[command(version, about = "Daily devotion journal")]
#[command(long_about = r#"Keep scripture reflections and inspirational reading notes.

Without a subcommand an interactive session starts at the main menu.

EXAMPLES:
    # Start the interactive journal
    devotion

    # Use a specific database file
    devotion --db ~/journal.sqlite3

    # Print saved entries and exit
    devotion list

    # Print one entry's summary
    devotion show 1717171717171-k3j9x0

ENVIRONMENT:
    DEVOTION_DB_PATH    database file (overridden by --db)
    DEVOTION_LOG_DIR    log directory (overridden by --log-dir)
    DEVOTION_LOG_LEVEL  trace|debug|info|warn|error (overridden by --log-level)
"#)]
struct Cli {
    /// SQLite file holding the journal
    #[arg(long, value_name = "PATH")]
    db: Option<PathBuf>,

    /// Directory for rotated log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Log level
    #[arg(long, value_name = "LEVEL")]
    #[arg(value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print saved entries and exit
    List,
    /// Print the summary of one entry and exit
    Show {
        /// Entry id as shown by `devotion list`
        id: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = JournalConfig::resolve(ConfigOverrides {
        db_path: cli.db,
        log_dir: cli.log_dir,
        log_level: cli.log_level,
    })
    .context("failed to resolve configuration")?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    let journal = open_journal(&config.db_path).with_context(|| {
        format!("failed to open journal at {}", config.db_path.display())
    })?;
    info!(
        "event=cli_start module=cli status=ok entries={}",
        journal.entries().len()
    );

    let stdout = io::stdout();
    match cli.command {
        None => {
            let stdin = io::stdin();
            shell::Shell::new(journal, stdin.lock(), stdout.lock()).run()
        }
        Some(Command::List) => {
            let mut out = stdout.lock();
            render::write_list(&mut out, &list_screen(journal.entries(), None))?;
            for entry in journal.entries() {
                writeln!(out, "  id {} ({})", entry.id(), entry.date())?;
            }
            Ok(())
        }
        Some(Command::Show { id }) => {
            let Some(entry) = journal.entry(&EntryId::new(id.trim())) else {
                bail!("no entry with id `{}`", id.trim());
            };
            render::write_summary(&mut stdout.lock(), &summary_screen(entry))?;
            Ok(())
        }
    }
}
