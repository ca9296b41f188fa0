/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dash_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return "n/a".to_string();
    }
    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by a relative epsilon so exact binary midpoints round up.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let grouped = group_thousands(&(rounded.trunc() as u64).to_string());

    let body = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // "0.50" → ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", body)
    } else {
        body
    }
}

/// Format a monetary amount as a USD string with cents and thousands
/// separators, e.g. the "Average Billing" header figure.
///
/// ```
/// use dash_core::formatting::format_currency;
///
/// assert_eq!(format_currency(25539.32), "$25,539.32");
/// assert_eq!(format_currency(-9.99), "$-9.99");
/// ```
pub fn format_currency(amount: f64) -> String {
    if amount < 0.0 {
        format!("$-{}", format_number(amount.abs(), 2))
    } else {
        format!("${}", format_number(amount, 2))
    }
}

/// Whole-dollar label used for slider marks: the amount is truncated toward
/// zero, then grouped (`12345.9` → `"$12,345"`).
pub fn format_whole_dollars(amount: f64) -> String {
    let whole = amount.trunc();
    if whole < 0.0 {
        format!("$-{}", format_number(whole.abs(), 0))
    } else {
        format!("${}", format_number(whole, 0))
    }
}

/// Short label for large axis values: `950`, `12.3k`, `4.56M`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", value / 1_000_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}

/// Calculate `(part / whole) * 100`, rounded to `decimal_places`.
///
/// Returns `0.0` if `whole` is zero to avoid division by zero.
pub fn percentage(part: f64, whole: f64, decimal_places: u32) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    let raw = (part / whole) * 100.0;
    let factor = 10_f64.powi(decimal_places as i32);
    (raw * factor).round() / factor
}

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    let len = s.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_zero() {
        assert_eq!(format_number(0.0, 0), "0");
        assert_eq!(format_number(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(5.0, 0), "5");
        assert_eq!(format_number(999.0, 0), "999");
        assert_eq!(format_number(1_000.0, 0), "1,000");
        assert_eq!(format_number(123_456.0, 0), "123,456");
        assert_eq!(format_number(1_234_567.0, 0), "1,234,567");
    }

    #[test]
    fn test_format_number_decimals() {
        assert_eq!(format_number(123.456, 2), "123.46");
        assert_eq!(format_number(1.005, 2), "1.01");
    }

    #[test]
    fn test_format_number_negative_and_negative_zero() {
        assert_eq!(format_number(-9_876.5, 1), "-9,876.5");
        assert_eq!(format_number(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::NAN, 2), "n/a");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(25_539.316), "$25,539.32");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-9.99), "$-9.99");
    }

    #[test]
    fn test_format_whole_dollars_truncates() {
        assert_eq!(format_whole_dollars(12_345.99), "$12,345");
        assert_eq!(format_whole_dollars(-2_008.49), "$-2,008");
        assert_eq!(format_whole_dollars(0.4), "$0");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(950.0), "950");
        assert_eq!(format_compact(12.34), "12.3");
        assert_eq!(format_compact(12_345.0), "12.3k");
        assert_eq!(format_compact(4_560_000.0), "4.56M");
    }

    #[test]
    fn test_percentage() {
        assert!((percentage(50.0, 200.0, 1) - 25.0).abs() < 1e-9);
        assert_eq!(percentage(10.0, 0.0, 2), 0.0);
        assert!((percentage(1.0, 3.0, 2) - 33.33).abs() < 1e-9);
    }
}
