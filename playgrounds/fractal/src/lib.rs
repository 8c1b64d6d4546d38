pub mod config;
pub mod summary;

pub use config::{FractalConfig, Resolved};
pub use summary::SceneSummary;
