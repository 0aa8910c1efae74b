//! Error types for the simulator.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    /// Scenario name that is not one of mixed/dos/scan
    #[error("Invalid scenario: '{0}' (expected mixed, dos or scan)")]
    InvalidScenario(String),

    /// Page name that the sidebar does not know about
    #[error("Invalid page: '{0}' (expected dashboard, live, visualizations, reports or help)")]
    InvalidPage(String),

    #[error("Unknown command: '{0}'")]
    UnknownCommand(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Capture thread panicked")]
    ThreadPanicked,
}

pub type Result<T> = std::result::Result<T, SimError>;
