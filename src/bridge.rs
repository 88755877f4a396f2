//! Bridge between the quote core and the presentation shell
//!
//! The shell asks for quotes through `QuoteBridge`, and listens for pushed
//! updates by registering listeners. Window requests (hide, move) travel the
//! other way as `ShellCommand`s on a channel the shell drains.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use log::debug;
use tokio::sync::mpsc;

use crate::data::{random_quote, Quote};
use crate::resolver::QuoteResolver;

/// Requests the bridge forwards to the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellCommand {
    /// Show the panel
    Show,
    /// Hide the panel (it stays alive)
    Hide,
    /// Toggle panel visibility
    Toggle,
    /// Move the panel's top-left corner
    MoveTo { x: i32, y: i32 },
}

/// Handle returned by [`QuoteBridge::on_quote_update`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

type Listener = Arc<dyn Fn(&Quote) + Send + Sync>;

/// Entry point for the shell into the quote core
///
/// Cloning is cheap; all clones share the resolver and the listener list.
#[derive(Clone)]
pub struct QuoteBridge {
    resolver: Arc<QuoteResolver>,
    listeners: Arc<Mutex<BTreeMap<SubscriptionId, Listener>>>,
    next_id: Arc<AtomicU64>,
    shell_tx: mpsc::UnboundedSender<ShellCommand>,
}

impl QuoteBridge {
    /// Creates a bridge and the receiver the shell reads window commands from
    pub fn new(resolver: Arc<QuoteResolver>) -> (Self, mpsc::UnboundedReceiver<ShellCommand>) {
        let (shell_tx, shell_rx) = mpsc::unbounded_channel();
        let bridge = Self {
            resolver,
            listeners: Arc::new(Mutex::new(BTreeMap::new())),
            next_id: Arc::new(AtomicU64::new(0)),
            shell_tx,
        };
        (bridge, shell_rx)
    }

    /// Today's quote, possibly waiting on the network
    pub async fn get_quote(&self) -> Quote {
        self.resolver.resolve().await
    }

    /// Asks the shell to hide the panel
    pub fn close_widget(&self) {
        self.send(ShellCommand::Hide);
    }

    /// Asks the shell to show the panel
    pub fn show_widget(&self) {
        self.send(ShellCommand::Show);
    }

    /// Asks the shell to toggle the panel (tray "Show / Hide")
    pub fn toggle_widget(&self) {
        self.send(ShellCommand::Toggle);
    }

    /// Asks the shell to move the panel, rounding to whole cells
    pub fn set_position(&self, x: f64, y: f64) {
        self.send(ShellCommand::MoveTo {
            x: x.round() as i32,
            y: y.round() as i32,
        });
    }

    /// Registers a listener for pushed quote updates
    pub fn on_quote_update<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Quote) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock_listeners().insert(id, Arc::new(listener));
        id
    }

    /// Removes a listener; returns whether it was registered
    pub fn remove_listener(&self, id: SubscriptionId) -> bool {
        self.lock_listeners().remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    /// Pushes a quote to every registered listener
    ///
    /// Listeners run outside the lock, so they may subscribe or unsubscribe
    /// from inside the callback.
    pub fn publish(&self, quote: &Quote) {
        let listeners: Vec<Listener> = self.lock_listeners().values().cloned().collect();
        debug!("publishing quote to {} listener(s)", listeners.len());
        for listener in listeners {
            listener(quote);
        }
    }

    /// Publishes a random quote from the built-in table
    ///
    /// Does not touch the resolver or the stored record.
    pub fn preview_random(&self) -> Quote {
        let quote = random_quote();
        self.publish(&quote);
        quote
    }

    /// Re-resolves today's quote and publishes it
    pub async fn show_today(&self) -> Quote {
        let quote = self.get_quote().await;
        self.publish(&quote);
        quote
    }

    fn send(&self, command: ShellCommand) {
        // The shell may already be gone during shutdown
        if self.shell_tx.send(command).is_err() {
            debug!("shell closed, dropping {:?}", command);
        }
    }

    fn lock_listeners(&self) -> std::sync::MutexGuard<'_, BTreeMap<SubscriptionId, Listener>> {
        // A panicking listener poisons the lock but leaves the map intact
        self.listeners
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
