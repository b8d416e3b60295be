//! Number formatting for table cells and stat cards.
//!
//! Amounts use Indian digit grouping: the last three digits, then groups of
//! two (`12,34,567`).

pub const CURRENCY_SYMBOL: &str = "₹";

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

/// Formats `value` with `decimals` fraction digits and Indian grouping,
/// e.g. `1234567.891` with 2 decimals gives `12,34,567.89`.
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };
    let sign = if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        "-"
    } else {
        ""
    };
    let grouped = group_indian(integer_part);
    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

pub fn format_money(value: f64) -> String {
    let formatted = format_number_with_decimals(value, 2);
    match formatted.strip_prefix('-') {
        Some(abs) => format!("-{}{}", CURRENCY_SYMBOL, abs),
        None => format!("{}{}", CURRENCY_SYMBOL, formatted),
    }
}

pub fn format_number_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}
