//! FILENAME: core/model/src/number_format.rs
//! PURPOSE: Number formatting utilities for cell labels.
//! CONTEXT: Only US-dollar currency is localized; everything else is plain
//! decimal output. Non-finite inputs format as zero.

/// Format a number in general format (integers without a decimal point,
/// decimals with trailing zeros trimmed).
pub fn format_general(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }

    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{:.0}", value);
    }

    let formatted = format!("{:.10}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

/// Add thousands separators to a numeric string.
fn add_thousands_separator(s: &str) -> String {
    let parts: Vec<&str> = s.split('.').collect();
    let integer_part = parts[0];
    let decimal_part = parts.get(1);

    let negative = integer_part.starts_with('-');
    let digits: String = integer_part.chars().filter(|c| c.is_ascii_digit()).collect();

    let mut result = String::new();
    let len = digits.len();

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }

    if negative {
        result = format!("-{}", result);
    }

    if let Some(decimal) = decimal_part {
        result.push('.');
        result.push_str(decimal);
    }

    result
}

/// Format a number as currency, en-US style: `$1,235`, `-$1,235`.
pub fn format_currency(value: f64, decimal_places: u8, symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let digits = format!("{:.prec$}", value.abs(), prec = decimal_places as usize);
    let grouped = add_thousands_separator(&digits);

    // -0.4 rounds to "0"; don't print a sign in front of a zero.
    let is_zero = digits.chars().all(|c| c == '0' || c == '.');
    if value < 0.0 && !is_zero {
        format!("-{}{}", symbol, grouped)
    } else {
        format!("{}{}", symbol, grouped)
    }
}

/// Whole-dollar USD, as shown in the summary table.
pub fn format_usd(value: f64) -> String {
    format_currency(value, 0, "$")
}

/// Format an already-scaled percentage (`42.0` -> `"42.0%"` at one place).
pub fn format_percent(percentage: f64, decimal_places: u8) -> String {
    let percentage = if percentage.is_finite() { percentage } else { 0.0 };
    let text = format!("{:.prec$}", percentage, prec = decimal_places as usize);
    if text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.') {
        format!("{}%", &text[1..])
    } else {
        format!("{}%", text)
    }
}
