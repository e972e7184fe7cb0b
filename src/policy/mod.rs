//! Policy record structures and the generated dataset

mod data;
mod dataset;

pub use data::{PolicyRecord, PolicyStatus};
pub use dataset::{DatasetSummary, PolicyDataset};
pub(crate) use data::format_policy_number;
