//! Policy data generator
//!
//! Fields are drawn column by column in a fixed order from one seeded stream:
//! dates of birth, purchase dates, terms, sums assured, statuses, then death
//! dates. Policy numbers, premiums and expiry dates involve no randomness.
//! Changing this order changes every dataset for a given seed.

use super::rng::PolicyRng;
use super::GeneratorError;
use crate::config::{ConfigError, ProductConfig, DAYS_PER_YEAR, SUM_ASSURED_MULTIPLIER_MAX};
use crate::policy::{format_policy_number, PolicyDataset, PolicyRecord, PolicyStatus};
use chrono::{Days, NaiveDate};
use log::{debug, info, warn};

/// Last valid day drawn for dates of birth, valid in every month
const MAX_BIRTH_DAY: u32 = 28;

/// Generates term life policy datasets from a product configuration
#[derive(Debug, Clone)]
pub struct PolicyDataGenerator {
    config: ProductConfig,
    num_policies: usize,
    seed: u64,
}

impl PolicyDataGenerator {
    /// Create a generator using the configured record count and seed
    pub fn new(config: ProductConfig) -> Self {
        let num_policies = config.num_policies;
        let seed = config.seed;
        Self {
            config,
            num_policies,
            seed,
        }
    }

    /// Override the number of records
    pub fn with_num_policies(mut self, num_policies: usize) -> Self {
        self.num_policies = num_policies;
        self
    }

    /// Override the random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn config(&self) -> &ProductConfig {
        &self.config
    }

    pub fn num_policies(&self) -> usize {
        self.num_policies
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate the complete dataset.
    ///
    /// The configuration is validated before any draw. Each call seeds its
    /// own random stream, so repeated calls return identical datasets.
    pub fn generate(&self) -> Result<PolicyDataset, GeneratorError> {
        self.config.validate_for(self.num_policies)?;

        info!(
            "Generating {} {} policies (seed {}, as of {})",
            self.num_policies, self.config.product_name, self.seed, self.config.current_date
        );

        let mut rng = PolicyRng::new(self.seed);

        let policy_numbers = self.policy_numbers();
        let dates_of_birth = self.dates_of_birth(&mut rng)?;
        let purchase_dates = self.purchase_dates(&mut rng)?;
        let terms = self.terms(&mut rng);
        let sums_assured = self.sums_assured(&mut rng);
        let annual_premiums = self.annual_premiums(&sums_assured);
        let statuses = self.statuses(&mut rng);
        let death_dates = self.death_dates(&mut rng, &purchase_dates, &statuses);
        let expiry_dates = self.expiry_dates(&purchase_dates, &terms)?;

        let records: Vec<PolicyRecord> = policy_numbers
            .into_iter()
            .enumerate()
            .map(|(i, policy_number)| PolicyRecord {
                policy_number,
                date_of_birth: dates_of_birth[i],
                entry_age: self.config.entry_age,
                purchase_date: purchase_dates[i],
                policy_term: terms[i],
                premium_payment_term: terms[i],
                sum_assured: sums_assured[i],
                annual_premium: annual_premiums[i],
                status: statuses[i],
                death_date: death_dates[i],
                expiry_date: expiry_dates[i],
            })
            .collect();

        let claims = records.iter().filter(|r| r.is_claim()).count();
        info!("Generated {} records ({} death claims)", records.len(), claims);

        Ok(PolicyDataset::new(
            self.config.product_name.clone(),
            self.seed,
            self.config.current_date,
            self.config.static_terms.clone(),
            records,
        ))
    }

    fn policy_numbers(&self) -> Vec<String> {
        (1..=self.num_policies)
            .map(|seq| format_policy_number(&self.config.policy_prefix, seq))
            .collect()
    }

    /// Birth year is fixed by entry age; month and day are drawn per record
    fn dates_of_birth(&self, rng: &mut PolicyRng) -> Result<Vec<NaiveDate>, ConfigError> {
        let birth_year = self.config.birth_year()?;
        debug!("Drawing dates of birth in {}", birth_year);

        (0..self.num_policies)
            .map(|_| {
                let month = rng.range_inclusive_u32(1, 12);
                let day = rng.range_inclusive_u32(1, MAX_BIRTH_DAY);
                NaiveDate::from_ymd_opt(birth_year, month, day)
                    .ok_or(ConfigError::DateOutOfRange)
            })
            .collect()
    }

    fn purchase_dates(&self, rng: &mut PolicyRng) -> Result<Vec<NaiveDate>, ConfigError> {
        let max_days = self.config.lookback_days();
        debug!("Drawing purchase dates up to {} days back", max_days);

        (0..self.num_policies)
            .map(|_| {
                let offset = rng.range_inclusive_u64(1, max_days);
                self.config
                    .current_date
                    .checked_sub_days(Days::new(offset))
                    .ok_or(ConfigError::DateOutOfRange)
            })
            .collect()
    }

    fn terms(&self, rng: &mut PolicyRng) -> Vec<u32> {
        let terms = &self.config.terms;
        (0..self.num_policies)
            .map(|_| terms[rng.index(terms.len())])
            .collect()
    }

    fn sums_assured(&self, rng: &mut PolicyRng) -> Vec<f64> {
        (0..self.num_policies)
            .map(|_| {
                let multiplier = rng.range_inclusive_u32(1, SUM_ASSURED_MULTIPLIER_MAX);
                self.config.base_sum_assured * f64::from(multiplier)
            })
            .collect()
    }

    fn annual_premiums(&self, sums_assured: &[f64]) -> Vec<f64> {
        sums_assured
            .iter()
            .map(|sa| sa * self.config.premium_rate)
            .collect()
    }

    fn statuses(&self, rng: &mut PolicyRng) -> Vec<PolicyStatus> {
        let weights: Vec<f64> = self
            .config
            .status_probabilities
            .iter()
            .map(|e| e.probability)
            .collect();

        (0..self.num_policies)
            .map(|_| self.config.status_probabilities[rng.weighted_index(&weights)].status)
            .collect()
    }

    fn death_dates(
        &self,
        rng: &mut PolicyRng,
        purchase_dates: &[NaiveDate],
        statuses: &[PolicyStatus],
    ) -> Vec<Option<NaiveDate>> {
        purchase_dates
            .iter()
            .zip(statuses)
            .map(|(&purchase_date, status)| {
                status
                    .is_claim()
                    .then(|| draw_death_date(rng, purchase_date, self.config.current_date))
            })
            .collect()
    }

    fn expiry_dates(
        &self,
        purchase_dates: &[NaiveDate],
        terms: &[u32],
    ) -> Result<Vec<NaiveDate>, ConfigError> {
        purchase_dates
            .iter()
            .zip(terms)
            .map(|(purchase_date, &term)| expiry_date(*purchase_date, term))
            .collect()
    }
}

/// Death date strictly after purchase and no later than the current date.
///
/// With no whole day between purchase and current date the death date is the
/// current date, and no draw is consumed.
pub fn draw_death_date(
    rng: &mut PolicyRng,
    purchase_date: NaiveDate,
    current_date: NaiveDate,
) -> NaiveDate {
    let window = (current_date - purchase_date).num_days();
    if window <= 0 {
        warn!(
            "No elapsed days between purchase {} and {}; using current date as death date",
            purchase_date, current_date
        );
        return current_date;
    }

    let offset = rng.range_inclusive_u64(1, window as u64);
    purchase_date
        .checked_add_days(Days::new(offset))
        .unwrap_or(current_date)
}

/// Purchase date plus term x 365 days (no leap-year adjustment)
pub fn expiry_date(purchase_date: NaiveDate, term_years: u32) -> Result<NaiveDate, ConfigError> {
    purchase_date
        .checked_add_days(Days::new(u64::from(term_years) * DAYS_PER_YEAR))
        .ok_or(ConfigError::DateOutOfRange)
}
