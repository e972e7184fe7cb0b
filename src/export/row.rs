//! Row layouts written by the exporter
//!
//! Column order is fixed by field order here and matches `COLUMNS`.

use crate::config::StaticTerms;
use crate::policy::PolicyRecord;
use chrono::NaiveDate;
use serde::Serialize;

/// Output columns, in order
pub const COLUMNS: [&str; 15] = [
    "Policy_Number",
    "Date_of_Birth",
    "Entry_Age",
    "Purchase_Date",
    "Policy_Term",
    "Premium_Payment_Term",
    "Sum_Assured",
    "Annual_Premium",
    "Premium_Payment_Timing",
    "Policy_Status",
    "Death_Date",
    "Expiry_Date",
    "Underwriting_Class",
    "Surrender_Value",
    "Reserve_Basis",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// CSV row: money as `#,##0.00`, dates as `YYYY-MM-DD`, blank death date when absent
#[derive(Debug, Serialize)]
pub(crate) struct CsvRow<'a> {
    #[serde(rename = "Policy_Number")]
    policy_number: &'a str,
    #[serde(rename = "Date_of_Birth")]
    date_of_birth: String,
    #[serde(rename = "Entry_Age")]
    entry_age: u32,
    #[serde(rename = "Purchase_Date")]
    purchase_date: String,
    #[serde(rename = "Policy_Term")]
    policy_term: u32,
    #[serde(rename = "Premium_Payment_Term")]
    premium_payment_term: u32,
    #[serde(rename = "Sum_Assured")]
    sum_assured: String,
    #[serde(rename = "Annual_Premium")]
    annual_premium: String,
    #[serde(rename = "Premium_Payment_Timing")]
    premium_payment_timing: &'a str,
    #[serde(rename = "Policy_Status")]
    policy_status: &'static str,
    #[serde(rename = "Death_Date")]
    death_date: String,
    #[serde(rename = "Expiry_Date")]
    expiry_date: String,
    #[serde(rename = "Underwriting_Class")]
    underwriting_class: &'a str,
    #[serde(rename = "Surrender_Value")]
    surrender_value: &'a str,
    #[serde(rename = "Reserve_Basis")]
    reserve_basis: &'a str,
}

impl<'a> CsvRow<'a> {
    pub(crate) fn new(record: &'a PolicyRecord, terms: &'a StaticTerms) -> Self {
        Self {
            policy_number: &record.policy_number,
            date_of_birth: format_date(record.date_of_birth),
            entry_age: record.entry_age,
            purchase_date: format_date(record.purchase_date),
            policy_term: record.policy_term,
            premium_payment_term: record.premium_payment_term,
            sum_assured: format_money(record.sum_assured),
            annual_premium: format_money(record.annual_premium),
            premium_payment_timing: &terms.premium_payment_timing,
            policy_status: record.status.as_str(),
            death_date: record.death_date.map(format_date).unwrap_or_default(),
            expiry_date: format_date(record.expiry_date),
            underwriting_class: &terms.underwriting_class,
            surrender_value: &terms.surrender_value,
            reserve_basis: &terms.reserve_basis,
        }
    }
}

/// JSON row: money as numbers, death date `null` when absent
#[derive(Debug, Serialize)]
pub(crate) struct JsonRow<'a> {
    #[serde(rename = "Policy_Number")]
    policy_number: &'a str,
    #[serde(rename = "Date_of_Birth")]
    date_of_birth: NaiveDate,
    #[serde(rename = "Entry_Age")]
    entry_age: u32,
    #[serde(rename = "Purchase_Date")]
    purchase_date: NaiveDate,
    #[serde(rename = "Policy_Term")]
    policy_term: u32,
    #[serde(rename = "Premium_Payment_Term")]
    premium_payment_term: u32,
    #[serde(rename = "Sum_Assured")]
    sum_assured: f64,
    #[serde(rename = "Annual_Premium")]
    annual_premium: f64,
    #[serde(rename = "Premium_Payment_Timing")]
    premium_payment_timing: &'a str,
    #[serde(rename = "Policy_Status")]
    policy_status: &'static str,
    #[serde(rename = "Death_Date")]
    death_date: Option<NaiveDate>,
    #[serde(rename = "Expiry_Date")]
    expiry_date: NaiveDate,
    #[serde(rename = "Underwriting_Class")]
    underwriting_class: &'a str,
    #[serde(rename = "Surrender_Value")]
    surrender_value: &'a str,
    #[serde(rename = "Reserve_Basis")]
    reserve_basis: &'a str,
}

impl<'a> JsonRow<'a> {
    pub(crate) fn new(record: &'a PolicyRecord, terms: &'a StaticTerms) -> Self {
        Self {
            policy_number: &record.policy_number,
            date_of_birth: record.date_of_birth,
            entry_age: record.entry_age,
            purchase_date: record.purchase_date,
            policy_term: record.policy_term,
            premium_payment_term: record.premium_payment_term,
            sum_assured: record.sum_assured,
            annual_premium: record.annual_premium,
            premium_payment_timing: &terms.premium_payment_timing,
            policy_status: record.status.as_str(),
            death_date: record.death_date,
            expiry_date: record.expiry_date,
            underwriting_class: &terms.underwriting_class,
            surrender_value: &terms.surrender_value,
            reserve_basis: &terms.reserve_basis,
        }
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Currency display with thousands separators and two decimals, e.g. `12,500.00`
pub fn format_money(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{}{}.{}", sign, grouped, cents)
}
