//! Application state management for the quote panel
//!
//! This module contains the panel's state, handles keyboard input, and applies
//! quote updates and window commands arriving from the bridge.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent};
use log::debug;
use tokio::sync::mpsc;

use crate::bridge::{QuoteBridge, ShellCommand, SubscriptionId};
use crate::data::Quote;

/// Which quote the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Waiting for the first quote
    Loading,
    /// Showing the quote of the day
    Today,
    /// Showing a random preview from the built-in table
    Preview,
}

/// Main application struct managing panel state
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Quote currently on screen
    pub quote: Option<Quote>,
    /// Whether the panel is shown
    pub visible: bool,
    /// Top-left corner of the panel, in terminal cells
    pub position: (u16, u16),
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// When the displayed quote last changed
    pub last_update: Option<DateTime<Local>>,
    /// State to enter when the next pushed quote arrives
    pending_state: AppState,
    bridge: QuoteBridge,
    subscription: SubscriptionId,
    quote_rx: mpsc::UnboundedReceiver<Quote>,
    shell_rx: mpsc::UnboundedReceiver<ShellCommand>,
}

impl App {
    /// Creates the panel and subscribes it to quote updates
    ///
    /// # Arguments
    /// * `bridge` - The bridge into the quote core
    /// * `shell_rx` - Window commands produced by the bridge
    /// * `position` - Initial panel position
    pub fn new(
        bridge: QuoteBridge,
        shell_rx: mpsc::UnboundedReceiver<ShellCommand>,
        position: (u16, u16),
    ) -> Self {
        let (quote_tx, quote_rx) = mpsc::unbounded_channel();
        let subscription = bridge.on_quote_update(move |quote| {
            let _ = quote_tx.send(quote.clone());
        });

        Self {
            state: AppState::Loading,
            quote: None,
            visible: true,
            position,
            should_quit: false,
            show_help: false,
            last_update: None,
            pending_state: AppState::Today,
            bridge,
            subscription,
            quote_rx,
            shell_rx,
        }
    }

    /// Starts resolving today's quote on a background task
    ///
    /// The quote arrives through the listener and is applied by the next
    /// `process_events`, so key handling never waits on the network.
    pub fn request_today(&mut self) {
        self.pending_state = AppState::Today;
        let bridge = self.bridge.clone();
        tokio::spawn(async move {
            bridge.show_today().await;
        });
    }

    fn set_quote(&mut self, quote: Quote, state: AppState) {
        self.quote = Some(quote);
        self.state = state;
        self.last_update = Some(Local::now());
    }

    /// Applies any pending quote updates and window commands
    pub fn process_events(&mut self) {
        while let Ok(quote) = self.quote_rx.try_recv() {
            let state = std::mem::replace(&mut self.pending_state, AppState::Today);
            self.set_quote(quote, state);
        }
        while let Ok(command) = self.shell_rx.try_recv() {
            self.apply_command(command);
        }
    }

    /// Executes a window command from the bridge
    pub fn apply_command(&mut self, command: ShellCommand) {
        debug!("shell command: {:?}", command);
        match command {
            ShellCommand::Show => self.visible = true,
            ShellCommand::Hide => self.visible = false,
            ShellCommand::Toggle => self.visible = !self.visible,
            ShellCommand::MoveTo { x, y } => {
                self.position = (clamp_cell(x), clamp_cell(y));
            }
        }
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - `q`: Quit the application
    /// - `Esc`: Hide the panel (close button)
    /// - `s`/`Space`: Show or hide the panel (tray toggle)
    /// - `r`: Preview a random quote
    /// - `t`: Reset to today's quote, showing the panel if hidden
    /// - Arrow keys / `hjkl`: Move the panel
    /// - `?`: Toggle help
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Handle help overlay - intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match key_event.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
            }
            KeyCode::Char('?') => {
                self.show_help = true;
            }
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                self.bridge.toggle_widget();
            }
            KeyCode::Char('t') => {
                self.bridge.show_widget();
                self.request_today();
            }
            // Everything below only makes sense while the panel is shown
            _ if !self.visible => {}
            KeyCode::Esc => {
                self.bridge.close_widget();
            }
            KeyCode::Char('r') => {
                self.pending_state = AppState::Preview;
                self.bridge.preview_random();
            }
            KeyCode::Up | KeyCode::Char('k') => self.nudge(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.nudge(0, 1),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(1, 0),
            _ => {}
        }
    }

    /// Requests a move relative to the current position
    fn nudge(&self, dx: i32, dy: i32) {
        let (x, y) = self.position;
        self.bridge
            .set_position(f64::from(i32::from(x) + dx), f64::from(i32::from(y) + dy));
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.bridge.remove_listener(self.subscription);
    }
}

fn clamp_cell(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}
