//! Shared data types for the ART-2A clustering library.

pub mod component;
pub mod config;
pub mod error;

pub use component::{dot, Component};
pub use config::{load_config, Art2aConfig};
pub use error::{Art2aError, Art2aResult};

/// Default maximum number of epochs per clustering run.
pub const DEFAULT_MAX_EPOCHS: usize = 10;

/// Default ART-2A learning rate.
pub const DEFAULT_LEARNING_RATE: f64 = 0.01;

/// Default seed for epoch permutations.
pub const DEFAULT_SEED: u64 = 1;

/// Returns the current local time formatted for log headers.
pub fn now_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
