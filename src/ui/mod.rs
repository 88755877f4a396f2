//! UI rendering module for the quote panel
//!
//! This module contains the rendering logic for the terminal panel,
//! using the ratatui library for TUI components.

pub mod help_overlay;
pub mod panel;

pub use help_overlay::render as render_help_overlay;
pub use panel::{default_position, render as render_panel};
