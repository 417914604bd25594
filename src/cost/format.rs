//! Currency display helpers.

/// Format as dollars with thousands separators and at most three decimals,
/// e.g. `1234567.5` becomes `$1,234,567.5`.
pub fn format_currency(value: f64) -> String {
    format!("${}", format_number(value))
}

fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }

    let formatted = format!("{:.3}", value.abs());
    let (int_part, frac_part) = formatted
        .split_once('.')
        .unwrap_or((formatted.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*digit);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(format_currency(0.0), "$0");
        assert_eq!(format_currency(999.0), "$999");
        assert_eq!(format_currency(1000.0), "$1,000");
        assert_eq!(format_currency(1234567.0), "$1,234,567");
    }

    #[test]
    fn keeps_at_most_three_decimals() {
        assert_eq!(format_currency(2500.5), "$2,500.5");
        assert_eq!(format_currency(0.1 + 0.2), "$0.3");
        assert_eq!(format_currency(12.3456), "$12.346");
    }

    #[test]
    fn negative_values_keep_sign() {
        assert_eq!(format_currency(-4500.0), "$-4,500");
        assert_eq!(format_currency(-0.0001), "$0");
    }
}
