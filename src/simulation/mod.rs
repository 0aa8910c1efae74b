pub mod generator;
pub mod history;
pub mod session;
pub mod stats;

pub use generator::{EventGenerator, Scenario};
pub use history::HistoryStore;
pub use session::Session;
pub use stats::TrafficStats;
