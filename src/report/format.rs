//! Display formatting for currency, percentages and multiples
//!
//! Anything that cannot be shown as a number (NaN, an unresolved IRR)
//! renders as [`PLACEHOLDER`].

/// Shown in place of values that are not numbers
pub const PLACEHOLDER: &str = "—";

/// Round half up, the way calculator displays round whole dollars
pub(crate) fn round_half_up(x: f64) -> f64 {
    (x + 0.5).floor()
}

/// Insert thousands separators into a non-negative whole number
fn group_thousands(whole: f64) -> String {
    let digits = format!("{:.0}", whole);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Whole dollars with separators: `$1,234`, `-$1,234`
///
/// The sign is taken after rounding, so amounts in (-0.5, 0) show as `$0`
/// rather than `-$0`.
pub fn format_currency(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let rounded = round_half_up(n);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs()))
}

/// Compact dollars: `$1.25M`, `$340K`, or whole dollars below a thousand
pub fn format_currency_short(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let sign = if n < 0.0 { "-" } else { "" };
    let abs = n.abs();
    if abs >= 1_000_000.0 {
        format!("{}${:.2}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.0}K", sign, (abs / 1_000.0).round())
    } else {
        format_currency(n)
    }
}

/// Fraction as a percentage: `0.04788` -> `4.79%`
pub fn format_percent(n: f64, decimals: usize) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.*}%", decimals, n * 100.0)
}

/// Ratio as a multiple: `1.85x`
pub fn format_multiple(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    format!("{:.2}x", n)
}

/// Debt service coverage; infinite when there is no debt
pub fn format_dscr(dscr: f64) -> String {
    if dscr == f64::INFINITY {
        "∞".to_string()
    } else {
        format_multiple(dscr)
    }
}

/// Whole number with separators for echoing back into an input field: `500,000`
pub fn format_input_currency(n: f64) -> String {
    if !n.is_finite() {
        return "0".to_string();
    }
    let rounded = round_half_up(n);
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}{}", sign, group_thousands(rounded.abs()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.4), "$999");
        assert_eq!(format_currency(1_234.5), "$1,235");
        assert_eq!(format_currency(1_234_567.0), "$1,234,567");
        assert_eq!(format_currency(-5_998.6), "-$5,999");
        assert_eq!(format_currency(-0.4), "$0");
        assert_eq!(format_currency(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_format_currency_short() {
        assert_eq!(format_currency_short(1_250_000.0), "$1.25M");
        assert_eq!(format_currency_short(-2_000_000.0), "-$2.00M");
        assert_eq!(format_currency_short(340_400.0), "$340K");
        assert_eq!(format_currency_short(23_940.0), "$24K");
        assert_eq!(format_currency_short(950.0), "$950");
        assert_eq!(format_currency_short(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.04788, 2), "4.79%");
        assert_eq!(format_percent(-0.048, 1), "-4.8%");
        assert_eq!(format_percent(0.1, 0), "10%");
        assert_eq!(format_percent(f64::NAN, 2), PLACEHOLDER);
    }

    #[test]
    fn test_format_multiples() {
        assert_eq!(format_multiple(1.8549), "1.85x");
        assert_eq!(format_dscr(f64::INFINITY), "∞");
        assert_eq!(format_dscr(0.7996), "0.80x");
        assert_eq!(format_dscr(f64::NAN), PLACEHOLDER);
    }

    #[test]
    fn test_format_input_currency() {
        assert_eq!(format_input_currency(500_000.0), "500,000");
        assert_eq!(format_input_currency(999.5), "1,000");
        assert_eq!(format_input_currency(-1_234.0), "-1,234");
        assert_eq!(format_input_currency(f64::NAN), "0");
    }
}
