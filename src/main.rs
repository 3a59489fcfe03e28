mod aggregate;
mod app;
mod config;
mod feedback;
mod form;
mod input;
mod store;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::App;
use config::Config;
use store::{JsonFileStore, MemoryStore, Store};
use ui::Theme;

#[derive(Parser, Debug)]
#[command(name = "feedback")]
#[command(about = "Rate a service 1-10, leave a review, see the running average")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(long, default_value = "~/.config/feedback-tui/config.toml")]
    config: String,

    /// Feedback file path (overrides the config)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep feedback in memory only, nothing is written to disk
    #[arg(long)]
    ephemeral: bool,

    /// Write logs to this file (stderr only logs when RUST_LOG is set)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Default filter level; stderr shares the screen with the UI, so it stays
/// silent unless `RUST_LOG` asks otherwise
fn default_log_level(to_file: bool) -> &'static str {
    if to_file {
        "info"
    } else {
        "off"
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> Result<()> {
    let default_level = default_log_level(log_file.is_some());
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("feedback_tui={default_level}").into());

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .init();
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
                .init();
        }
    }
    Ok(())
}

fn open_store(cli: &Cli, config: &Config) -> Box<dyn Store> {
    if cli.ephemeral {
        tracing::info!("Ephemeral mode, feedback will not be saved");
        return Box::new(MemoryStore::new());
    }

    let path = cli.store.clone().unwrap_or_else(|| config.store_path());
    tracing::info!("Using feedback file {}", path.display());
    Box::new(JsonFileStore::new(path))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.log_file.as_ref())?;

    // Load config
    let config = Config::load(&cli.config)?;
    let theme = config.resolve_theme();

    let store = open_store(&cli, &config);
    let mut app = App::new(store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app, &theme);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableBracketedPaste, LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    theme: &Theme,
) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app, theme))?;

        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = input::map_key(key, app.focus()) {
                    tracing::trace!("{:?}", action);
                    app.apply(action);
                }
            }
            Event::Paste(text) => app.paste(&text),
            _ => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stderr_logging_off_by_default() {
        assert_eq!(default_log_level(false), "off");
        assert_eq!(default_log_level(true), "info");
    }
}
