pub mod config;
pub mod describe;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod record;
pub mod scheduler;
pub mod sink;
pub mod state;
pub mod time;

pub use config::{CrawlerConfig, Selectors};
pub use error::CrawlerError;
pub use record::JobRecord;
pub use scheduler::Scheduler;
