use std::sync::OnceLock;

use regex::Regex;

/// Per-day baseline rates keyed by destination substring, checked in order.
/// Rates come from the historical booking dataset the dashboard was tuned on.
const KEYWORD_RATES: [(&str, i64); 5] = [
    ("pond", 1800),
    ("bang", 2200),
    ("chennai", 1200),
    ("ooty", 3000),
    ("goa", 4000),
];

const DEFAULT_RATE: i64 = 2000;

pub struct CostEstimator;

impl CostEstimator {
    /// Predict a baseline trip cost for a destination and a duration like
    /// "2 Days". Always returns a number; unknown destinations fall back to
    /// the default rate and unparseable durations count as a single day.
    pub fn predicted_base_cost(destination: &str, duration: &str) -> i64 {
        Self::per_day_rate(destination) * Self::parse_days(duration)
    }

    pub fn per_day_rate(destination: &str) -> i64 {
        let normalized = destination.to_lowercase();
        KEYWORD_RATES
            .iter()
            .find(|(keyword, _)| normalized.contains(keyword))
            .map(|(_, rate)| *rate)
            .unwrap_or(DEFAULT_RATE)
    }

    /// Leading integer of the duration string, minimum 1.
    pub fn parse_days(duration: &str) -> i64 {
        day_pattern()
            .find(duration)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .unwrap_or(1)
            .max(1)
    }
}

fn day_pattern() -> &'static Regex {
    static DAY_PATTERN: OnceLock<Regex> = OnceLock::new();
    DAY_PATTERN.get_or_init(|| Regex::new(r"\d+").expect("valid literal pattern"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keywords_use_table_rates() {
        assert_eq!(CostEstimator::predicted_base_cost("Pondicherry", "2 Days"), 3600);
        assert_eq!(CostEstimator::predicted_base_cost("Bangalore", "1 Day"), 2200);
        assert_eq!(CostEstimator::predicted_base_cost("Chennai", "3 Days"), 3600);
        assert_eq!(CostEstimator::predicted_base_cost("Ooty", "2 Days"), 6000);
        assert_eq!(CostEstimator::predicted_base_cost("North Goa", "2 Days"), 8000);
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(CostEstimator::per_day_rate("GOA"), 4000);
        assert_eq!(CostEstimator::per_day_rate("pondicherry beach"), 1800);
    }

    #[test]
    fn unknown_destination_uses_default_rate() {
        assert_eq!(CostEstimator::predicted_base_cost("Hampi", "2 Days"), 4000);
    }

    #[test]
    fn unparseable_duration_counts_one_day() {
        assert_eq!(CostEstimator::parse_days("a weekend"), 1);
        assert_eq!(CostEstimator::parse_days(""), 1);
        assert_eq!(CostEstimator::parse_days("0 Days"), 1);
        assert_eq!(CostEstimator::predicted_base_cost("Hampi", "whenever"), 2000);
    }

    #[test]
    fn duration_takes_the_leading_integer() {
        assert_eq!(CostEstimator::parse_days("2 Days"), 2);
        assert_eq!(CostEstimator::parse_days("10 Days"), 10);
        assert_eq!(CostEstimator::parse_days("approx 4 days"), 4);
    }
}
