//! Deterministic generation of term life policy records

mod engine;
pub mod rng;

pub use engine::{draw_death_date, expiry_date, PolicyDataGenerator};
pub use rng::PolicyRng;

use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised by a generation run. Nothing is returned on failure.
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
