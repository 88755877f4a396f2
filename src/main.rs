//! Daily Quote - one motivational quote per day
//!
//! A small terminal panel that shows the quote of the day, refreshed at local
//! midnight. With `--print` it resolves the quote once and writes it to stdout.

use std::fs::OpenOptions;
use std::io;
use std::panic;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{info, LevelFilter};
use ratatui::{backend::CrosstermBackend, Terminal};

use daily_quote::app::App;
use daily_quote::bridge::QuoteBridge;
use daily_quote::cache::QuoteStore;
use daily_quote::cli::{Cli, OutputMode, StartupConfig};
use daily_quote::clock::{Clock, FixedClock, SystemClock};
use daily_quote::data::{OfflineSource, RemoteQuoteSource, ZenQuotesClient};
use daily_quote::refresh::{RefreshConfig, RefreshHandle};
use daily_quote::resolver::QuoteResolver;
use daily_quote::ui;

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Initializes logging; `RUST_LOG` overrides the default `warn` level
///
/// The panel owns the terminal, so in panel mode logs go to a file next to
/// the cached quote instead of stderr.
fn init_logging(mode: OutputMode, store: &QuoteStore) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(LevelFilter::Warn).parse_default_env();

    if mode == OutputMode::Panel {
        let log_file = store.ensure_dir().and_then(|_| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(store.log_path())
        });
        match log_file {
            Ok(file) => {
                builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(_) => {
                builder.filter_level(LevelFilter::Off);
            }
        }
    }

    let _ = builder.try_init();
}

/// Renders the panel and, on top of it, the help overlay when requested
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    ui::render_panel(frame, app);
    if app.show_help {
        ui::render_help_overlay(frame);
    }
}

async fn run_panel(
    resolver: Arc<QuoteResolver>,
    clock: Arc<dyn Clock>,
    position: Option<(u16, u16)>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let position = match position {
        Some(position) => position,
        None => ui::default_position(terminal.size()?.width),
    };

    let (bridge, shell_rx) = QuoteBridge::new(resolver);
    let mut app = App::new(bridge.clone(), shell_rx, position);
    let refresh = RefreshHandle::spawn(bridge, clock, RefreshConfig::default());

    // The loading state stays on screen until the first quote is pushed
    app.request_today();

    // Main event loop
    loop {
        app.process_events();

        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    refresh.shutdown().await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    };

    init_logging(config.mode, &config.store);
    info!("using quote data at {}", config.store.path().display());

    let source: Arc<dyn RemoteQuoteSource> = if config.offline {
        Arc::new(OfflineSource)
    } else {
        Arc::new(ZenQuotesClient::new())
    };
    let clock: Arc<dyn Clock> = match config.day {
        Some(day) => Arc::new(FixedClock::at_day(day)),
        None => Arc::new(SystemClock),
    };
    let resolver = Arc::new(QuoteResolver::new(config.store, source, clock.clone()));

    match config.mode {
        OutputMode::Panel => run_panel(resolver, clock, config.position).await?,
        OutputMode::Text => {
            let quote = resolver.resolve().await;
            println!("{}", quote);
        }
        OutputMode::Json => {
            let quote = resolver.resolve().await;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
    }

    Ok(())
}
