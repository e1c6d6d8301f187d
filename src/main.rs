//! To-do list - Main Entry Point
//!
//! Parses the command line, loads the store file and runs the interactive menu.
//! The actual implementation is in the `todo_list` library.

use anyhow::Result;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use todo_list::{Storage, StoreFormat, TaskStore, cli};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive
const LOG_ENV: &str = "TODO_LIST_LOG";

/// Terminal to-do list with priorities and due dates
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the task store file
    #[arg(default_value = "tasks.txt")]
    file: PathBuf,

    /// Store file format (default: inferred from the file extension)
    #[arg(long, value_enum)]
    format: Option<StoreFormat>,
}

fn main() -> Result<()> {
    if std::env::var_os(LOG_ENV).is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_env(LOG_ENV))
            .with_writer(io::stderr)
            .init();
    }

    let args = Args::parse();
    let storage = match args.format {
        Some(format) => Storage::with_format(&args.file, format),
        None => Storage::new(&args.file),
    };

    let mut store = TaskStore::new(storage);
    if let Err(e) = store.load() {
        // Continue with an empty list
        println!("{}", e);
    }

    cli::run(&mut store, io::stdin().lock(), io::stdout().lock())
}
