//! Setting keys and their string encodings.
//!
//! The service stores every setting as a plain string; parsing happens here.

use chrono::NaiveDate;

pub const START_DATE: &str = "start_date";
pub const NUM_DAYS: &str = "num_days";
pub const BUDGET_TOTAL: &str = "budget_total";
pub const SCOUTING_CATEGORIES: &str = "scouting_categories";

pub const DEFAULT_NUM_DAYS: u32 = 5;
pub const MAX_NUM_DAYS: u32 = 60;

pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 5).unwrap_or_default()
}

pub fn parse_start_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parsed and clamped to `1..=MAX_NUM_DAYS`.
pub fn parse_num_days(raw: &str) -> Option<u32> {
    raw.trim()
        .parse::<u32>()
        .ok()
        .map(clamp_num_days)
}

pub fn clamp_num_days(n: u32) -> u32 {
    n.clamp(1, MAX_NUM_DAYS)
}

pub fn parse_budget_total(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Categories are stored as a JSON array of strings.
pub fn parse_categories(raw: &str) -> Option<Vec<String>> {
    serde_json::from_str::<Vec<String>>(raw).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_settings() {
        assert_eq!(
            parse_start_date("2026-02-01"),
            NaiveDate::from_ymd_opt(2026, 2, 1)
        );
        assert_eq!(parse_start_date("01/02/2026"), None);
        assert_eq!(parse_num_days("7"), Some(7));
        assert_eq!(parse_num_days("0"), Some(1));
        assert_eq!(parse_num_days("500"), Some(MAX_NUM_DAYS));
        assert_eq!(parse_num_days("seven"), None);
        assert_eq!(parse_budget_total("2500.50"), Some(2500.5));
        assert_eq!(parse_budget_total("-3"), None);
        assert_eq!(
            parse_categories(r#"["Rooftops","Autres"]"#),
            Some(vec!["Rooftops".to_string(), "Autres".to_string()])
        );
        assert_eq!(parse_categories("Rooftops"), None);
    }
}
