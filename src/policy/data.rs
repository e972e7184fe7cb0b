//! Policy record structures matching the term life data layout

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a policy at the current date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyStatus {
    /// Premiums being paid, no claim
    #[serde(rename = "In Force")]
    InForce,
    /// Insured event has occurred
    #[serde(rename = "Death Claim")]
    DeathClaim,
}

impl PolicyStatus {
    /// Whether the status carries a death date
    pub fn is_claim(&self) -> bool {
        matches!(self, PolicyStatus::DeathClaim)
    }

    /// Label used in the output file
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::InForce => "In Force",
            PolicyStatus::DeathClaim => "Death Claim",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single generated policy record
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyRecord {
    /// Prefix plus 5-digit zero-padded sequence, e.g. S20TL00001
    pub policy_number: String,

    pub date_of_birth: NaiveDate,

    /// Age at the current date
    pub entry_age: u32,

    pub purchase_date: NaiveDate,

    /// Coverage term in years
    pub policy_term: u32,

    /// Always equal to the policy term
    pub premium_payment_term: u32,

    pub sum_assured: f64,

    pub annual_premium: f64,

    pub status: PolicyStatus,

    /// Present only for claim statuses
    pub death_date: Option<NaiveDate>,

    /// Purchase date plus term x 365 days
    pub expiry_date: NaiveDate,
}

impl PolicyRecord {
    /// Age in completed calendar years at `as_of`, by year difference
    pub fn age_at(&self, as_of: NaiveDate) -> i32 {
        as_of.year() - self.date_of_birth.year()
    }

    /// Whether the record carries a claim
    pub fn is_claim(&self) -> bool {
        self.status.is_claim()
    }
}

/// Format a 1-based sequence as a policy number
pub(crate) fn format_policy_number(prefix: &str, sequence: usize) -> String {
    format!("{}{:05}", prefix, sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_number_format() {
        assert_eq!(format_policy_number("S20TL", 1), "S20TL00001");
        assert_eq!(format_policy_number("S20TL", 1000), "S20TL01000");
        assert_eq!(format_policy_number("S20TL", 99_999), "S20TL99999");
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(PolicyStatus::InForce.to_string(), "In Force");
        assert_eq!(PolicyStatus::DeathClaim.to_string(), "Death Claim");
        assert!(PolicyStatus::DeathClaim.is_claim());
        assert!(!PolicyStatus::InForce.is_claim());
        assert_eq!(serde_json::to_string(&PolicyStatus::DeathClaim).unwrap(), "\"Death Claim\"");
    }

    #[test]
    fn test_age_at() {
        let record = PolicyRecord {
            policy_number: "S20TL00001".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1995, 11, 20).unwrap(),
            entry_age: 30,
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            policy_term: 5,
            premium_payment_term: 5,
            sum_assured: 10_000.0,
            annual_premium: 500.0,
            status: PolicyStatus::InForce,
            death_date: None,
            expiry_date: NaiveDate::from_ymd_opt(2028, 12, 30).unwrap(),
        };
        // Year difference, regardless of birthday not yet reached
        assert_eq!(record.age_at(NaiveDate::from_ymd_opt(2025, 4, 16).unwrap()), 30);
        assert!(!record.is_claim());
    }
}
