//! Money formatting for tables.
//!
//! Amounts travel as decimal strings and are parsed to `f64` only here, for
//! display. Nothing is ever summed on the client.

/// Insert thousands separators into `value` rounded to `decimals` places.
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::new();
    for (i, c) in integer_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let mut integer = grouped.chars().rev().collect::<String>();

    let negative = value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if negative {
        integer.insert(0, '-');
    }

    match decimal_part {
        Some(d) => format!("{}.{}", integer, d),
        None => integer,
    }
}

/// `"1234.5"` -> `"$1,234.50"`; unparseable input renders as `"-"`.
pub fn format_money(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => {
            let formatted = format_number_with_decimals(value, 2);
            match formatted.strip_prefix('-') {
                Some(rest) => format!("-${}", rest),
                None => format!("${}", formatted),
            }
        }
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money("1234.5"), "$1,234.50");
        assert_eq!(format_money("1234567.891"), "$1,234,567.89");
        assert_eq!(format_money("0"), "$0.00");
        assert_eq!(format_money("-1234.56"), "-$1,234.56");
        assert_eq!(format_money(" 12 "), "$12.00");
    }

    #[test]
    fn test_format_money_rejects_garbage() {
        assert_eq!(format_money(""), "-");
        assert_eq!(format_money("abc"), "-");
        assert_eq!(format_money("NaN"), "-");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
    }

    #[test]
    fn test_format_number_with_decimals() {
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(1000.0, 0), "1,000");
        assert_eq!(format_number_with_decimals(1234.567, 1), "1,234.6");
    }
}
