/// Format a rupee value with Indian digit grouping (last three digits,
/// then pairs): 1234567.5 -> "₹12,34,567.50"
pub fn format_rupees(value: f64) -> String {
    let abs_value = value.abs();
    let mut rupees = abs_value as i64;
    let mut paise = ((abs_value - rupees as f64) * 100.0).round() as i64;
    if paise == 100 {
        rupees += 1;
        paise = 0;
    }

    let grouped = group_indian(rupees);
    if value < 0.0 {
        format!("-₹{grouped}.{paise:02}")
    } else {
        format!("₹{grouped}.{paise:02}")
    }
}

/// Format a rupee value without paise (shorter format for tight columns)
pub fn format_rupees_short(value: f64) -> String {
    let abs_value = value.abs();
    let grouped = group_indian(abs_value.round() as i64);
    if value < 0.0 {
        format!("-₹{grouped}")
    } else {
        format!("₹{grouped}")
    }
}

/// Format a fraction as a percentage
pub fn format_percentage(value: f64) -> String {
    format!("{:.0}%", value * 100.0)
}

fn group_indian(n: i64) -> String {
    let digits = n.to_string();
    let len = digits.len();
    let mut result = String::with_capacity(len + len / 2);
    for (i, c) in digits.chars().enumerate() {
        result.push(c);
        let remaining = len - i - 1;
        if remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0) {
            result.push(',');
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indian_grouping() {
        assert_eq!(format_rupees(0.0), "₹0.00");
        assert_eq!(format_rupees(999.5), "₹999.50");
        assert_eq!(format_rupees(1_000.0), "₹1,000.00");
        assert_eq!(format_rupees(100_000.0), "₹1,00,000.00");
        assert_eq!(format_rupees(1_234_567.0), "₹12,34,567.00");
        assert_eq!(format_rupees(-2_500.25), "-₹2,500.25");
    }

    #[test]
    fn test_paise_rounding_carries() {
        assert_eq!(format_rupees(9.999), "₹10.00");
    }

    #[test]
    fn test_short_format() {
        assert_eq!(format_rupees_short(12_345.6), "₹12,346");
    }

    #[test]
    fn test_percentage() {
        assert_eq!(format_percentage(0.5), "50%");
        assert_eq!(format_percentage(0.125), "13%");
    }
}
