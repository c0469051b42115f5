mod error;
mod model;

pub use error::TrackerError;
pub use model::{AccountSummary, PortfolioSummary, StatsSnapshot, TIMESTAMP_FORMAT};
