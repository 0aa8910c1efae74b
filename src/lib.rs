//! Synthetic network IDS simulator.
//!
//! A seeded generator produces labeled pseudo-packets on a fixed-interval
//! capture task; each record lands in a capped history window and in
//! all-time counters owned by the session. Text views project that state
//! for the terminal.

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod monitoring;
pub mod simulation;
pub mod views;

pub use error::{Result, SimError};
