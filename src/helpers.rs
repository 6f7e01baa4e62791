use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::DateTime;

/// Base units per display token for both pool assets (18 decimals).
const BASE_UNITS_PER_TOKEN: u64 = 1_000_000_000_000_000_000;

/// Converts an 18-decimal base-unit balance string into display units.
/// Missing, empty, or malformed values coerce to zero; this feeds charts
/// and cards, not a ledger.
pub fn display_units(raw: Option<&str>) -> f64 {
    let raw = raw.map(str::trim).unwrap_or("");
    if raw.is_empty() {
        return 0.0;
    }

    let Ok(value) = BigDecimal::from_str(raw) else {
        return 0.0;
    };

    (value / BigDecimal::from(BASE_UNITS_PER_TOKEN))
        .to_f64()
        .unwrap_or(0.0)
}

/// Pool TVL in display units: the two asset balances converted independently
/// and summed.
pub fn combined_tvl(usd0_balance: Option<&str>, usd0_plus_balance: Option<&str>) -> f64 {
    display_units(usd0_balance) + display_units(usd0_plus_balance)
}

/// Formats a value with thousands separators and a fixed number of decimals,
/// e.g. 1234567.891 -> "1,234,567.89".
pub fn format_number_with_commas(value: f64, decimals: usize) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let formatted = format!("{:.*}", decimals, value.abs());

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (count, digit) in int_part.chars().rev().enumerate() {
        if count > 0 && count % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if value < 0.0 {
        out.push('-');
    }
    out.extend(grouped.chars().rev());
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }

    out
}

/// UTC calendar-day label for a unix timestamp, e.g. "Jan 5, 2024".
pub fn format_date(timestamp: i64) -> String {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Shortens a wallet address to "0x1234...abcd" for table display.
pub fn format_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_owned();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}

/// Converts a subgraph share fraction string ("0.05") into percent (5.0).
/// Missing or malformed shares coerce to zero.
pub fn share_percent(share: Option<&str>) -> f64 {
    share
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
        * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_units_zero_and_missing() {
        assert_eq!(display_units(Some("0")), 0.0);
        assert_eq!(display_units(None), 0.0);
        assert_eq!(display_units(Some("")), 0.0);
        assert_eq!(display_units(Some("  ")), 0.0);
    }

    #[test]
    fn display_units_one_token() {
        assert_eq!(display_units(Some("1000000000000000000")), 1.0);
    }

    #[test]
    fn display_units_fractional() {
        assert_eq!(display_units(Some("1500000000000000000")), 1.5);
        assert_eq!(display_units(Some("1")), 1e-18);
    }

    #[test]
    fn display_units_malformed_coerces_to_zero() {
        assert_eq!(display_units(Some("not-a-number")), 0.0);
        assert_eq!(display_units(Some("12,5")), 0.0);
    }

    #[test]
    fn combined_tvl_sums_both_legs() {
        let tvl = combined_tvl(
            Some("2000000000000000000"),
            Some("3000000000000000000"),
        );
        assert_eq!(tvl, 5.0);
        assert_eq!(combined_tvl(None, Some("1000000000000000000")), 1.0);
    }

    #[test]
    fn commas_grouping() {
        assert_eq!(format_number_with_commas(0.0, 2), "0.00");
        assert_eq!(format_number_with_commas(999.0, 2), "999.00");
        assert_eq!(format_number_with_commas(1_000.0, 2), "1,000.00");
        assert_eq!(format_number_with_commas(1_234_567.891, 2), "1,234,567.89");
        assert_eq!(format_number_with_commas(4_750_000.0, 0), "4,750,000");
    }

    #[test]
    fn commas_negative_and_non_finite() {
        assert_eq!(format_number_with_commas(-1234.5, 2), "-1,234.50");
        assert_eq!(format_number_with_commas(f64::NAN, 2), "0.00");
    }

    #[test]
    fn date_labels_are_utc() {
        assert_eq!(format_date(0), "Jan 1, 1970");
        assert_eq!(format_date(1_704_067_200), "Jan 1, 2024");
        // 2024-01-01T23:59:59Z stays on Jan 1 regardless of local zone
        assert_eq!(format_date(1_704_153_599), "Jan 1, 2024");
    }

    #[test]
    fn address_shortening() {
        assert_eq!(
            format_address("0x742d35Cc6634C0532925a3b8D4C9db96C4b4d8b9"),
            "0x742d...d8b9"
        );
        assert_eq!(format_address("0xabc"), "0xabc");
        assert_eq!(format_address(""), "");
    }

    #[test]
    fn share_percent_parsing() {
        assert_eq!(share_percent(Some("0.05")), 5.0);
        assert_eq!(share_percent(Some("1")), 100.0);
        assert_eq!(share_percent(None), 0.0);
        assert_eq!(share_percent(Some("abc")), 0.0);
    }
}
