//! Shared money arithmetic, German display formatting, and answer checking.
//!
//! The percentage identities used across the pricing modules live here so
//! that forward and reverse calculations agree on a single definition:
//!
//! | Identity | Formula | Used for |
//! |----------|---------|----------|
//! | [`percent_of`] | `base * p / 100` | markups, discounts taken off a gross amount |
//! | [`gross_up`] | `base * p / (100 - p)` | customer deductions in forward pricing |
//! | [`net_down`] | `base * p / (100 + p)` | removing a markup already contained in `base` |

/// Absolute tolerance (one cent) when comparing a student answer to the
/// computed value.
pub const GRADING_TOLERANCE: f64 = 0.01;

/// Standard German VAT rate in percent.
pub const DEFAULT_VAT_PERCENT: f64 = 19.0;

/// Reduced German VAT rate in percent.
pub const REDUCED_VAT_PERCENT: f64 = 7.0;

/// `p` percent of `base`.
pub fn percent_of(base: f64, percent: f64) -> f64 {
    base * percent / 100.0
}

/// Amount that, added to `base`, makes `percent` of the new total equal to
/// itself. Infinite when `percent == 100`.
pub fn gross_up(base: f64, percent: f64) -> f64 {
    base * percent / (100.0 - percent)
}

/// Share of `base` that a markup of `percent` contributed, when `base`
/// already includes that markup.
pub fn net_down(base: f64, percent: f64) -> f64 {
    base * percent / (100.0 + percent)
}

/// Round to whole cents (half away from zero).
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Whether a submitted value lies within `tolerance` of the expected one.
pub fn validate_calculation(expected: f64, actual: f64, tolerance: f64) -> bool {
    (expected - actual).abs() <= tolerance
}

/// Format as Euro in German notation, e.g. `1.234,56 €`.
pub fn format_currency(amount: f64) -> String {
    format!("{} €", format_german(amount, 2, 2))
}

/// Format a percentage value (19.0 means 19 %) with one to two fraction
/// digits, e.g. `19,0 %` or `2,25 %`.
pub fn format_percent(value: f64) -> String {
    format_percent_with(value, 1, 2)
}

/// Format a percentage with explicit fraction digit bounds. Trailing zeros
/// beyond `min_digits` are dropped.
pub fn format_percent_with(value: f64, min_digits: usize, max_digits: usize) -> String {
    format!("{} %", format_german(value, min_digits, max_digits))
}

fn format_german(value: f64, min_digits: usize, max_digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let min_digits = min_digits.min(max_digits);
    // Round half away from zero like `round_currency`; `{:.N}` would round ties to even
    let scale = 10f64.powi(max_digits as i32);
    let scaled = value.abs() * scale;
    let rounded = if scaled.is_finite() {
        scaled.round() / scale
    } else {
        value.abs()
    };
    let fixed = format!("{:.*}", max_digits, rounded);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));

    let mut frac = frac_part.to_string();
    while frac.len() > min_digits && frac.ends_with('0') {
        frac.pop();
    }

    // "-0,00" is not a thing
    let is_zero = fixed.chars().all(|c| c == '0' || c == '.');
    let mut out = String::with_capacity(fixed.len() + 4);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac.is_empty() {
        out.push(',');
        out.push_str(&frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_identities() {
        assert!((percent_of(200.0, 10.0) - 20.0).abs() < 1e-9);
        // 10 % gross-up of 90 gives 10, and 10 is 10 % of 100
        assert!((gross_up(90.0, 10.0) - 10.0).abs() < 1e-9);
        // 19 % VAT contained in 119
        assert!((net_down(119.0, 19.0) - 19.0).abs() < 1e-9);
    }

    #[test]
    fn test_gross_up_hundred_percent_is_infinite() {
        assert!(gross_up(50.0, 100.0).is_infinite());
    }

    #[test]
    fn test_round_currency() {
        assert_eq!(round_currency(93.199999), 93.2);
        assert_eq!(round_currency(1.234), 1.23);
        assert_eq!(round_currency(-2.345678), -2.35);
    }

    #[test]
    fn test_validate_calculation() {
        assert!(validate_calculation(93.2, 93.2, GRADING_TOLERANCE));
        assert!(validate_calculation(93.2, 93.205, GRADING_TOLERANCE));
        assert!(!validate_calculation(93.2, 93.25, GRADING_TOLERANCE));
        assert!(validate_calculation(100.0, 99.0, 1.5));
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(93.2), "93,20 €");
        assert_eq!(format_currency(1234.5), "1.234,50 €");
        assert_eq!(format_currency(1_234_567.891), "1.234.567,89 €");
        assert_eq!(format_currency(-15.0), "-15,00 €");
        assert_eq!(format_currency(0.0), "0,00 €");
    }

    #[test]
    fn test_format_currency_rounds_ties_like_round_currency() {
        assert_eq!(format_currency(0.125), "0,13 €");
        assert_eq!(format_currency(10.125), "10,13 €");
        assert_eq!(format_currency(-10.125), "-10,13 €");
        assert_eq!(round_currency(0.125), 0.13);
        assert_eq!(format_percent_with(2.5, 0, 0), "3 %");
    }

    #[test]
    fn test_format_currency_negative_zero() {
        assert_eq!(format_currency(-0.001), "0,00 €");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(19.0), "19,0 %");
        assert_eq!(format_percent(2.5), "2,5 %");
        assert_eq!(format_percent(33.333), "33,33 %");
        assert_eq!(format_percent(1500.0), "1.500,0 %");
    }

    #[test]
    fn test_format_percent_with_precision() {
        assert_eq!(format_percent_with(19.0, 0, 0), "19 %");
        assert_eq!(format_percent_with(12.5, 0, 3), "12,5 %");
        assert_eq!(format_percent_with(7.0, 2, 2), "7,00 %");
        // min larger than max is clamped
        assert_eq!(format_percent_with(7.0, 4, 1), "7,0 %");
    }

    #[test]
    fn test_format_non_finite() {
        assert_eq!(format_currency(f64::INFINITY), "∞ €");
        assert_eq!(format_currency(f64::NAN), "NaN €");
    }
}
