//! Display formatting helpers
//!
//! Shared by the headless printer; the embedding view layer is free to use
//! its own locale-aware formatting instead.

/// Format an amount as `$1,234.56` (two decimals, thousands grouping).
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", amount.abs());
    let (integer, fraction) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    format!("{sign}{symbol}{}.{fraction}", group_thousands(integer))
}

/// Format a ratio as a one-decimal percentage, e.g. `12.3%`.
pub fn format_percentage(value: f64) -> String {
    format!("{value:.1}%")
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_and_keeps_two_decimals() {
        assert_eq!(format_currency(0.0, "$"), "$0.00");
        assert_eq!(format_currency(1234.5, "$"), "$1,234.50");
        assert_eq!(format_currency(1_000_000.0, "$"), "$1,000,000.00");
        assert_eq!(format_currency(999.999, "$"), "$1,000.00");
    }

    #[test]
    fn negative_amounts_keep_the_symbol_after_the_sign() {
        assert_eq!(format_currency(-1234.56, "$"), "-$1,234.56");
    }

    #[test]
    fn percentages_round_to_one_decimal() {
        assert_eq!(format_percentage(0.0), "0.0%");
        assert_eq!(format_percentage(12.34), "12.3%");
        assert_eq!(format_percentage(99.96), "100.0%");
    }
}
