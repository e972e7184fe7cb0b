//! JSON-based configuration loader
//!
//! Any field left out of the document keeps its Secure20 default.

use super::{ConfigError, ProductConfig};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

impl ProductConfig {
    /// Load a configuration from a JSON file
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path.as_ref())?;
        let config: ProductConfig = serde_json::from_reader(BufReader::new(file))?;
        log::debug!("Loaded product configuration from {}", path.as_ref().display());
        Ok(config)
    }

    /// Parse a configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyStatus;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = ProductConfig::from_json_str(r#"{ "seed": 7, "terms": [20] }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.terms, vec![20]);
        assert_eq!(config.entry_age, 30);
        assert_eq!(config.policy_prefix, "S20TL");
        assert_eq!(config.static_terms.reserve_basis, "Prospective Reserve");
    }

    #[test]
    fn test_full_document() {
        let json = r#"{
            "product_name": "Secure20 Term Life",
            "current_date": "2024-12-31",
            "status_probabilities": [
                { "status": "Death Claim", "probability": 0.1 },
                { "status": "In Force", "probability": 0.9 }
            ],
            "static_terms": { "underwriting_class": "Select Mortality" }
        }"#;
        let config = ProductConfig::from_json_str(json).unwrap();

        assert_eq!(config.current_date, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(config.status_probabilities[0].status, PolicyStatus::DeathClaim);
        assert_eq!(config.static_terms.underwriting_class, "Select Mortality");
        assert_eq!(config.static_terms.premium_payment_timing, "Beginning of Year");
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/secure20_term_life.json");
        let config = ProductConfig::from_json_path(path).expect("Failed to load configuration");
        assert_eq!(config, ProductConfig::secure20());
    }

    #[test]
    fn test_roundtrip_through_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let original = ProductConfig::secure20();
        write!(file, "{}", serde_json::to_string_pretty(&original).unwrap()).unwrap();

        let loaded = ProductConfig::from_json_path(file.path()).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_bad_input_is_config_error() {
        let unknown_status =
            r#"{ "status_probabilities": [{ "status": "Lapsed", "probability": 1.0 }] }"#;
        assert!(matches!(
            ProductConfig::from_json_str(unknown_status),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ProductConfig::from_json_path("does/not/exist.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
