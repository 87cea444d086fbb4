//! Splitpad - a two-panel text utility, run headless.
//!
//! # Usage
//!
//! ```bash
//! splitpad --text '{"a":1}' --format json
//! splitpad --input notes.txt --stats
//! splitpad --paste --format html
//! ```
//!
//! Input, format, theme and layout persist between runs in the store file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use splitpad::app::{NotificationKind, Outcome, Store};
use splitpad::clipboard::CommandClipboard;
use splitpad::config::default_store_path;
use splitpad::format::{FormattedResult, ResultFormat};
use splitpad::storage::{FileStore, Persistence};

/// Format text and report statistics, keeping state between runs
#[derive(Parser, Debug)]
#[command(name = "splitpad", version, about, long_about = None)]
struct Cli {
    /// Result format (text, json or html)
    #[arg(long)]
    format: Option<String>,

    /// Theme to store (light or dark)
    #[arg(long)]
    theme: Option<String>,

    /// Left panel width in percent (10-90)
    #[arg(long)]
    ratio: Option<i64>,

    /// Read the input text from a file
    #[arg(long, value_name = "FILE", conflicts_with = "text")]
    input: Option<PathBuf>,

    /// Use this string as the input text
    #[arg(long)]
    text: Option<String>,

    /// Append the system clipboard to the input
    #[arg(long)]
    paste: bool,

    /// Clear the stored input before anything else
    #[arg(long)]
    clear: bool,

    /// Print input statistics after the result
    #[arg(long)]
    stats: bool,

    /// Store file (defaults to $SPLITPAD_STORE, then the per-user data dir)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,
}

fn store_path(cli: &Cli) -> PathBuf {
    cli.store.clone().unwrap_or_else(default_store_path)
}

fn open_persistence(path: &Path) -> Persistence {
    match FileStore::open(path) {
        Ok(store) => {
            tracing::debug!(path = %store.path().display(), "using store file");
            Persistence::new(store)
        }
        Err(err) => {
            tracing::warn!(error = %err, "falling back to in-memory storage");
            Persistence::in_memory()
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let path = store_path(&cli);
    let mut store = Store::new(open_persistence(&path));

    if cli.clear {
        store.clear_input();
    }
    if let Some(theme) = &cli.theme
        && store.set_theme(theme) == Outcome::Rejected
    {
        anyhow::bail!("Unknown theme: {theme}");
    }
    if let Some(ratio) = cli.ratio
        && store.set_panel_ratio(ratio) == Outcome::Rejected
    {
        anyhow::bail!("Panel ratio must be between 10 and 90, got {ratio}");
    }
    if let Some(format) = &cli.format
        && store.set_format(format) == Outcome::Rejected
    {
        let known = ResultFormat::ALL.map(ResultFormat::as_str).join(", ");
        anyhow::bail!("Unknown format: {format} (expected one of {known})");
    }

    let text = match (&cli.input, &cli.text) {
        (Some(file), _) => Some(
            std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?,
        ),
        (None, Some(text)) => Some(text.clone()),
        (None, None) => None,
    };
    if let Some(text) = text
        && store.set_input_text(text) == Outcome::Rejected
    {
        let limit = store.model().config().max_input_length;
        store.add_notification(
            format!("Input exceeds the {limit} character limit"),
            NotificationKind::Warning,
        );
    }

    if cli.paste {
        store.paste_from(&CommandClipboard).await;
    }

    let model = store.model();
    let result = FormattedResult::compute(model.input_text(), model.selected_format(), store.now());
    if !result.output.is_empty() {
        println!("{}", result.output);
    }

    if cli.stats {
        let stats = model.input_stats();
        println!();
        println!("Characters: {} / {}", stats.char_count, stats.max_length);
        println!("Words: {}", stats.word_count);
        println!("Lines: {}", stats.line_count);
        println!("Reading time: {} min", stats.reading_time_minutes);
        println!("Format: {}", model.selected_format());
        println!("Theme: {}", model.current_theme());
        println!("Panel ratio: {}%", model.panel_ratio());
    }

    for notification in model.notifications() {
        eprintln!("[{}] {}", notification.kind, notification.message);
    }

    if result.is_error {
        std::process::exit(1);
    }
    Ok(())
}
