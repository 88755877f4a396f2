//! Persistent store for the day's quote
//!
//! This module provides the store that keeps the single cached quote record
//! on disk. A missing or unreadable file is reported to the caller, which
//! treats it as "no cache" rather than a failure.

mod manager;

pub use manager::{QuoteStore, StoreError};
