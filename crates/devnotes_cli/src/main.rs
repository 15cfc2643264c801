//! `devnotes` command-line host.
//!
//! # Responsibility
//! - Resolve data/log locations and start logging.
//! - Open the local store and run a one-shot command or the interactive shell.

mod commands;
mod config;
mod markup;
mod render;
mod scheme;
mod shell;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use config::Paths;
use devnotes_core::{
    default_log_level, init_logging, open_db, ActiveView, App, SqliteKvRepository, SystemClock,
    Theme,
};
use log::info;
use render::Renderer;
use scheme::EnvColorScheme;
use shell::Shell;
use std::path::PathBuf;
use std::rc::Rc;

/// Categorized developer notes with a rich-text editor, in the terminal.
#[derive(Parser)]
#[command(name = "devnotes")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory holding the note database
    #[arg(long, global = true, env = "DEVNOTES_DIR")]
    data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, global = true, env = "DEVNOTES_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files (default: <data dir>/logs)
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive shell (default)
    Shell,

    /// List categories
    Categories {
        #[arg(long)]
        search: Option<String>,
    },

    /// List the notes of one category (position, id or name)
    Notes {
        category: String,
        #[arg(long)]
        search: Option<String>,
    },

    /// List favorite notes across all categories
    Favorites {
        #[arg(long)]
        search: Option<String>,
    },

    /// Write all categories and notes as JSON
    Export {
        /// Output file (default: devnotes-export.json)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Delete everything and restore the sample data
    Clear {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Show or set the color theme
    Theme {
        #[arg(value_parser = parse_theme)]
        theme: Option<Theme>,
    },

    /// Change the note text zoom level
    Zoom { direction: ZoomDirection },
}

#[derive(Clone, Copy, ValueEnum)]
enum ZoomDirection {
    In,
    Out,
}

fn parse_theme(value: &str) -> Result<Theme, String> {
    value.parse().map_err(|err| format!("{err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = Paths::resolve(cli.data_dir, cli.log_dir)
        .context("failed to resolve data directory")?;
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    init_logging(level, &paths.log_dir).map_err(|err| anyhow!("failed to start logging: {err}"))?;

    if cli.plain || std::env::var_os("NO_COLOR").is_some() {
        yansi::disable();
    }

    let conn = open_db(&paths.db_path)
        .with_context(|| format!("failed to open {}", paths.db_path.display()))?;
    let kv = SqliteKvRepository::try_new(&conn)?;
    let mut app = App::open(kv, Rc::new(SystemClock), Box::new(EnvColorScheme))?;
    info!(
        "event=cli_start module=cli status=ok data_dir={}",
        paths.data_dir().display()
    );

    let renderer = Renderer::for_scheme(app.resolved_scheme());
    match cli.command.unwrap_or(Command::Shell) {
        Command::Shell => Shell::new(app).run()?,
        Command::Categories { search } => {
            commands::list_view(&mut app, &renderer, ActiveView::Categories, search.as_deref())
        }
        Command::Notes { category, search } => {
            commands::list_notes(&mut app, &renderer, &category, search.as_deref())?
        }
        Command::Favorites { search } => {
            commands::list_view(&mut app, &renderer, ActiveView::Favorites, search.as_deref())
        }
        Command::Export { out } => commands::export(&mut app, &renderer, out.as_deref())?,
        Command::Clear { yes } => commands::clear(&mut app, &renderer, yes)?,
        Command::Theme { theme } => commands::theme(&mut app, &renderer, theme)?,
        Command::Zoom { direction } => {
            commands::zoom(&mut app, &renderer, matches!(direction, ZoomDirection::In))?
        }
    }
    Ok(())
}
