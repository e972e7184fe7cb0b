//! Term Life Data - deterministic policy dataset generator for the Secure20 Term Life product
//!
//! This library provides:
//! - Immutable product configuration with validation and JSON loading
//! - Seeded, reproducible generation of policy records
//! - Styled XLSX export of the generated table, plus flat CSV and JSON

pub mod config;
pub mod export;
pub mod generator;
pub mod policy;

// Re-export commonly used types
pub use config::{ConfigError, ProductConfig};
pub use export::{write_dataset, ExportError, ExportFormat};
pub use generator::{GeneratorError, PolicyDataGenerator};
pub use policy::{PolicyDataset, PolicyRecord, PolicyStatus};
