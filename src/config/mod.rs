//! Product configuration for policy data generation
//!
//! The defaults reproduce the Secure20 Term Life product. A configuration is an
//! immutable value handed to the generator; nothing here is process-global.

pub mod loader;

use crate::policy::PolicyStatus;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when checking that status probabilities sum to one
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Multiplier range applied to the base sum assured (inclusive)
pub const SUM_ASSURED_MULTIPLIER_MAX: u32 = 10;

/// Days per policy year (no leap-year adjustment)
pub const DAYS_PER_YEAR: u64 = 365;

/// Errors raised for invalid or inconsistent configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("number of policies must be at least 1")]
    NoPolicies,

    #[error("policy number prefix must not be empty")]
    EmptyPrefix,

    #[error("entry age must be positive")]
    ZeroEntryAge,

    #[error("purchase date lookback window must be positive")]
    ZeroLookback,

    #[error("at least one policy term is required")]
    EmptyTerms,

    #[error("policy terms must be positive")]
    ZeroTerm,

    #[error("base sum assured must be a positive amount, got {0}")]
    InvalidSumAssured(f64),

    #[error("premium rate must be a non-negative fraction, got {0}")]
    InvalidPremiumRate(f64),

    #[error("status probability mapping is empty")]
    EmptyStatusProbabilities,

    #[error("probability for '{status}' must lie in [0, 1], got {value}")]
    InvalidProbability { status: PolicyStatus, value: f64 },

    #[error("status '{0}' appears more than once in the probability mapping")]
    DuplicateStatus(PolicyStatus),

    #[error("status probabilities must sum to 1, got {sum}")]
    ProbabilitySum { sum: f64 },

    #[error("configured dates fall outside the supported calendar range")]
    DateOutOfRange,

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Probability of a single policy status
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusProbability {
    pub status: PolicyStatus,
    pub probability: f64,
}

/// Descriptive terms repeated identically on every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticTerms {
    pub premium_payment_timing: String,
    pub underwriting_class: String,
    pub surrender_value: String,
    pub reserve_basis: String,
}

impl Default for StaticTerms {
    fn default() -> Self {
        Self {
            premium_payment_timing: "Beginning of Year".to_string(),
            underwriting_class: "Ultimate Mortality".to_string(),
            surrender_value: "None (Pure Term Plan)".to_string(),
            reserve_basis: "Prospective Reserve".to_string(),
        }
    }
}

/// Fixed product parameter set driving the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductConfig {
    /// Marketing name of the product
    pub product_name: String,

    /// Prefix of every policy number (e.g. "S20TL")
    pub policy_prefix: String,

    /// Age of every policyholder at the current date
    pub entry_age: u32,

    /// Allowed policy terms in years
    pub terms: Vec<u32>,

    /// Sum assured unit, multiplied by 1..=10
    pub base_sum_assured: f64,

    /// Annual premium as a fraction of sum assured
    pub premium_rate: f64,

    /// Default number of records per run
    pub num_policies: usize,

    /// Default random seed
    pub seed: u64,

    /// Status draw weights, in draw order
    pub status_probabilities: Vec<StatusProbability>,

    /// Purchase dates fall within this many years before the current date
    pub purchase_lookback_years: u32,

    /// Fixed valuation date; never taken from the wall clock
    pub current_date: NaiveDate,

    pub static_terms: StaticTerms,
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self::secure20()
    }
}

impl ProductConfig {
    /// Secure20 Term Life parameters
    pub fn secure20() -> Self {
        Self {
            product_name: "Secure20 Term Life".to_string(),
            policy_prefix: "S20TL".to_string(),
            entry_age: 30,
            terms: vec![5, 10, 15],
            base_sum_assured: 10_000.0,
            premium_rate: 0.05, // 5% of SA
            num_policies: 1000,
            seed: 42,
            status_probabilities: vec![
                StatusProbability {
                    status: PolicyStatus::InForce,
                    probability: 0.95,
                },
                StatusProbability {
                    status: PolicyStatus::DeathClaim,
                    probability: 0.05,
                },
            ],
            purchase_lookback_years: 2,
            current_date: NaiveDate::from_ymd_opt(2025, 4, 16)
                .unwrap_or(NaiveDate::MIN),
            static_terms: StaticTerms::default(),
        }
    }

    /// Birth year implied by the entry age at the current date
    pub fn birth_year(&self) -> Result<i32, ConfigError> {
        let age = i32::try_from(self.entry_age).map_err(|_| ConfigError::DateOutOfRange)?;
        self.current_date
            .year()
            .checked_sub(age)
            .ok_or(ConfigError::DateOutOfRange)
    }

    /// Longest purchase offset in days
    pub fn lookback_days(&self) -> u64 {
        u64::from(self.purchase_lookback_years) * DAYS_PER_YEAR
    }

    /// Largest possible sum assured
    pub fn max_sum_assured(&self) -> f64 {
        self.base_sum_assured * f64::from(SUM_ASSURED_MULTIPLIER_MAX)
    }

    /// Check the configuration for a run of `num_policies` records
    pub fn validate_for(&self, num_policies: usize) -> Result<(), ConfigError> {
        if num_policies == 0 {
            return Err(ConfigError::NoPolicies);
        }
        if self.policy_prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix);
        }
        if self.entry_age == 0 {
            return Err(ConfigError::ZeroEntryAge);
        }
        if self.purchase_lookback_years == 0 {
            return Err(ConfigError::ZeroLookback);
        }
        if self.terms.is_empty() {
            return Err(ConfigError::EmptyTerms);
        }
        if self.terms.contains(&0) {
            return Err(ConfigError::ZeroTerm);
        }
        if !self.base_sum_assured.is_finite() || self.base_sum_assured <= 0.0 {
            return Err(ConfigError::InvalidSumAssured(self.base_sum_assured));
        }
        if !self.premium_rate.is_finite() || self.premium_rate < 0.0 {
            return Err(ConfigError::InvalidPremiumRate(self.premium_rate));
        }

        self.validate_status_probabilities()?;
        self.validate_date_range()
    }

    fn validate_status_probabilities(&self) -> Result<(), ConfigError> {
        if self.status_probabilities.is_empty() {
            return Err(ConfigError::EmptyStatusProbabilities);
        }

        for (i, entry) in self.status_probabilities.iter().enumerate() {
            if !entry.probability.is_finite() || !(0.0..=1.0).contains(&entry.probability) {
                return Err(ConfigError::InvalidProbability {
                    status: entry.status,
                    value: entry.probability,
                });
            }
            if self.status_probabilities[..i].iter().any(|e| e.status == entry.status) {
                return Err(ConfigError::DuplicateStatus(entry.status));
            }
        }

        let sum: f64 = self.status_probabilities.iter().map(|e| e.probability).sum();
        if (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(ConfigError::ProbabilitySum { sum });
        }
        Ok(())
    }

    /// Every derived date must be representable: birth dates, the earliest
    /// purchase date and the latest expiry date
    fn validate_date_range(&self) -> Result<(), ConfigError> {
        let birth_year = self.birth_year()?;
        NaiveDate::from_ymd_opt(birth_year, 1, 1).ok_or(ConfigError::DateOutOfRange)?;

        self.current_date
            .checked_sub_days(Days::new(self.lookback_days()))
            .ok_or(ConfigError::DateOutOfRange)?;

        let longest_term = self.terms.iter().copied().max().unwrap_or(0);
        self.current_date
            .checked_add_days(Days::new(u64::from(longest_term) * DAYS_PER_YEAR))
            .ok_or(ConfigError::DateOutOfRange)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure20_defaults_are_valid() {
        let config = ProductConfig::secure20();
        assert!(config.validate_for(config.num_policies).is_ok());
        assert_eq!(config.birth_year().unwrap(), 1995);
        assert_eq!(config.lookback_days(), 730);
        assert_eq!(config.max_sum_assured(), 100_000.0);
        assert_eq!(config.current_date, NaiveDate::from_ymd_opt(2025, 4, 16).unwrap());
    }

    #[test]
    fn test_zero_policies_rejected() {
        let config = ProductConfig::secure20();
        assert!(matches!(config.validate_for(0), Err(ConfigError::NoPolicies)));
    }

    #[test]
    fn test_probabilities_must_sum_to_one() {
        let mut config = ProductConfig::secure20();
        config.status_probabilities[0].probability = 0.85;

        match config.validate_for(10) {
            Err(ConfigError::ProbabilitySum { sum }) => assert!((sum - 0.9).abs() < 1e-12),
            other => panic!("expected ProbabilitySum error, got {:?}", other),
        }
    }

    #[test]
    fn test_float_noise_in_probabilities_tolerated() {
        let mut config = ProductConfig::secure20();
        config.status_probabilities = vec![
            StatusProbability {
                status: PolicyStatus::InForce,
                probability: 0.7,
            },
            StatusProbability {
                status: PolicyStatus::DeathClaim,
                probability: 0.1 + 0.2,
            },
        ];
        assert!(config.validate_for(1).is_ok());
    }

    #[test]
    fn test_malformed_probability_mappings() {
        let mut config = ProductConfig::secure20();
        config.status_probabilities.clear();
        assert!(matches!(config.validate_for(1), Err(ConfigError::EmptyStatusProbabilities)));

        let mut config = ProductConfig::secure20();
        config.status_probabilities[1].probability = -0.05;
        config.status_probabilities[0].probability = 1.05;
        assert!(matches!(config.validate_for(1), Err(ConfigError::InvalidProbability { .. })));

        let mut config = ProductConfig::secure20();
        config.status_probabilities[1].status = PolicyStatus::InForce;
        assert!(matches!(
            config.validate_for(1),
            Err(ConfigError::DuplicateStatus(PolicyStatus::InForce))
        ));
    }

    #[test]
    fn test_non_positive_parameters_rejected() {
        let mut config = ProductConfig::secure20();
        config.terms.clear();
        assert!(matches!(config.validate_for(1), Err(ConfigError::EmptyTerms)));

        let mut config = ProductConfig::secure20();
        config.terms.push(0);
        assert!(matches!(config.validate_for(1), Err(ConfigError::ZeroTerm)));

        let mut config = ProductConfig::secure20();
        config.entry_age = 0;
        assert!(matches!(config.validate_for(1), Err(ConfigError::ZeroEntryAge)));

        let mut config = ProductConfig::secure20();
        config.purchase_lookback_years = 0;
        assert!(matches!(config.validate_for(1), Err(ConfigError::ZeroLookback)));

        let mut config = ProductConfig::secure20();
        config.base_sum_assured = 0.0;
        assert!(matches!(config.validate_for(1), Err(ConfigError::InvalidSumAssured(_))));

        let mut config = ProductConfig::secure20();
        config.premium_rate = f64::NAN;
        assert!(matches!(config.validate_for(1), Err(ConfigError::InvalidPremiumRate(_))));

        let mut config = ProductConfig::secure20();
        config.policy_prefix.clear();
        assert!(matches!(config.validate_for(1), Err(ConfigError::EmptyPrefix)));
    }

    #[test]
    fn test_unrepresentable_dates_rejected() {
        let mut config = ProductConfig::secure20();
        config.entry_age = u32::MAX;
        assert!(matches!(config.validate_for(1), Err(ConfigError::DateOutOfRange)));

        let mut config = ProductConfig::secure20();
        config.current_date = NaiveDate::MAX;
        assert!(matches!(config.validate_for(1), Err(ConfigError::DateOutOfRange)));
    }
}
