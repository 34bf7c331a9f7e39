pub mod config;
pub mod error;
pub mod format;
pub mod types;

pub use config::EngineConfig;
pub use error::*;
pub use format::{format_number, format_percent, round_to};
pub use types::*;
