//! Daily Quote Library
//!
//! Resolves one quote per calendar day: from the local cache when it was
//! written today, from the ZenQuotes service otherwise, and from a built-in
//! table when the service cannot be reached.

pub mod app;
pub mod bridge;
pub mod cache;
pub mod cli;
pub mod clock;
pub mod data;
pub mod refresh;
pub mod resolver;
pub mod ui;
