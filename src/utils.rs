// Utility functions
use chrono::{DateTime, Months, NaiveDate};

/// Parses a provider date, accepting both `YYYY-MM-DD` and RFC 3339 timestamps.
pub fn parse_api_date(date_str: &str) -> Option<NaiveDate> {
    let trimmed = date_str.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(trimmed).ok().map(|dt| dt.date_naive()))
}

/// Subtracts whole calendar months, clamping the day-of-month to the last
/// valid day of the resulting month (e.g. May 31 - 3 months = Feb 28/29).
pub fn months_before(date: NaiveDate, months: u32) -> NaiveDate {
    date.checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// `+` for true, `-` for false.
pub fn sign(positive: bool) -> char {
    if positive { '+' } else { '-' }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_months_before_clamps_day() {
        assert_eq!(months_before(date(2024, 5, 31), 3), date(2024, 2, 29));
        assert_eq!(months_before(date(2023, 3, 31), 1), date(2023, 2, 28));
        assert_eq!(months_before(date(2024, 1, 15), 12), date(2023, 1, 15));
    }

    #[test]
    fn test_parse_api_date_formats() {
        assert_eq!(parse_api_date("2024-02-29"), Some(date(2024, 2, 29)));
        assert_eq!(parse_api_date("2024-02-29T00:00:00Z"), Some(date(2024, 2, 29)));
        assert_eq!(parse_api_date("yesterday"), None);
    }
}
