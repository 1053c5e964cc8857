use crate::model::PriceRow;
use crate::utils::parse_api_date;
use serde::Deserialize;
use tracing::warn;

/// Price item as returned by the provider, prices in major currency units.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPrice {
    pub date: String,
    pub open: Option<f64>,
    pub close: Option<f64>,
}

pub fn normalize_all(ticker: &str, items: &[RawPrice]) -> Vec<PriceRow> {
    items
        .iter()
        .filter_map(|item| normalize_price(ticker, item))
        .collect()
}

fn normalize_price(ticker: &str, item: &RawPrice) -> Option<PriceRow> {
    let Some(day) = parse_api_date(&item.date) else {
        warn!("{}: skipping item with bad date {:?}", ticker, item.date);
        return None;
    };
    let (Some(open), Some(close)) = (item.open, item.close) else {
        warn!("{}: skipping {} without open/close", ticker, day);
        return None;
    };

    if !open.is_finite() || !close.is_finite() {
        warn!("{}: skipping {} with non-finite price", ticker, day);
        return None;
    }
    let (open, close) = (to_minor_units(open), to_minor_units(close));
    if open <= 0 || close <= 0 {
        warn!("{}: skipping {} with non-positive price ({} / {})", ticker, day, open, close);
        return None;
    }

    Some(PriceRow {
        ticker: ticker.to_string(),
        day,
        open,
        close,
    })
}

/// Converts a major-unit amount to minor units (cents).
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(date: &str, open: Option<f64>, close: Option<f64>) -> RawPrice {
        RawPrice { date: date.to_string(), open, close }
    }

    #[test]
    fn test_minor_units_round_instead_of_truncate() {
        assert_eq!(to_minor_units(19.99), 1999);
        assert_eq!(to_minor_units(0.29), 29);
        assert_eq!(to_minor_units(100.0), 10000);
    }

    #[test]
    fn test_normalize_skips_unusable_items() {
        let rows = normalize_all(
            "AAA",
            &[
                raw("2024-01-31", Some(10.5), Some(11.25)),
                raw("not a date", Some(1.0), Some(1.0)),
                raw("2024-02-29", Some(1.0), None),
                raw("2024-03-01", Some(1.0), Some(0.0)),
                raw("2024-03-04", Some(1.0), Some(-2.5)),
                raw("2024-03-05", Some(f64::NAN), Some(1.0)),
                raw("2024-03-06", Some(1.0), Some(f64::INFINITY)),
                raw("2024-03-07", Some(1.0), Some(0.004)),
            ],
        );
        assert_eq!(
            rows,
            vec![PriceRow {
                ticker: "AAA".into(),
                day: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
                open: 1050,
                close: 1125,
            }]
        );
    }
}
