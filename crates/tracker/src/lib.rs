pub mod config;
pub mod extractor;
pub mod logger;
pub mod pipeline;
pub mod publisher;
pub mod scheduler;

pub use config::{ConfigError, TrackerConfig};
pub use extractor::{extract, extract_now};
pub use pipeline::Tracker;
pub use publisher::{KafkaPublisher, Publisher};
pub use scheduler::{Cycle, Scheduler};
