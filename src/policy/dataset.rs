//! The generated table of policy records

use super::PolicyRecord;
use crate::config::StaticTerms;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Complete output of one generation run, in policy-number order
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyDataset {
    pub product_name: String,

    /// Seed the run was drawn from
    pub seed: u64,

    /// Valuation date the run was anchored to
    pub current_date: NaiveDate,

    /// Descriptive terms repeated on every exported row
    pub static_terms: StaticTerms,

    records: Vec<PolicyRecord>,
}

impl PolicyDataset {
    pub(crate) fn new(
        product_name: String,
        seed: u64,
        current_date: NaiveDate,
        static_terms: StaticTerms,
        records: Vec<PolicyRecord>,
    ) -> Self {
        Self {
            product_name,
            seed,
            current_date,
            static_terms,
            records,
        }
    }

    pub fn records(&self) -> &[PolicyRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PolicyRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get summary statistics
    pub fn summary(&self) -> DatasetSummary {
        let claim_count = self.records.iter().filter(|r| r.is_claim()).count();
        let total_sum_assured: f64 = self.records.iter().map(|r| r.sum_assured).sum();
        let total_annual_premium: f64 = self.records.iter().map(|r| r.annual_premium).sum();

        let mut policies_by_term = BTreeMap::new();
        for record in &self.records {
            *policies_by_term.entry(record.policy_term).or_insert(0) += 1;
        }

        let claim_rate = if self.records.is_empty() {
            0.0
        } else {
            claim_count as f64 / self.records.len() as f64
        };

        DatasetSummary {
            record_count: self.records.len(),
            claim_count,
            claim_rate,
            total_sum_assured,
            total_annual_premium,
            policies_by_term,
        }
    }
}

impl<'a> IntoIterator for &'a PolicyDataset {
    type Item = &'a PolicyRecord;
    type IntoIter = std::slice::Iter<'a, PolicyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Summary statistics for a dataset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
    pub record_count: usize,
    pub claim_count: usize,
    /// Share of records with a claim status
    pub claim_rate: f64,
    pub total_sum_assured: f64,
    pub total_annual_premium: f64,
    /// Record count per policy term (years)
    pub policies_by_term: BTreeMap<u32, usize>,
}
