//! Display helpers for the human-readable reason strings.

use crate::known;

/// Group the integer part of `value` in thousands, keeping two decimals.
fn with_thousands(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

/// Compact dollar amount: `$1.23T`, `$4.56B`, `$7.89M`, `$1.20K`, `$999.00`.
/// Absent values render as `N/A`.
pub fn format_number(value: Option<f64>) -> String {
    let Some(num) = known(value) else {
        return "N/A".to_string();
    };

    if num >= 1e12 {
        format!("${:.2}T", num / 1e12)
    } else if num >= 1e9 {
        format!("${:.2}B", num / 1e9)
    } else if num >= 1e6 {
        format!("${:.2}M", num / 1e6)
    } else if num >= 1e3 {
        format!("${:.2}K", num / 1e3)
    } else {
        format!("${}", with_thousands(num))
    }
}

/// Fraction rendered as a percentage: `0.1234` -> `12.34%`.
pub fn format_percent(value: Option<f64>) -> String {
    match known(value) {
        Some(fraction) => format!("{:.2}%", fraction * 100.0),
        None => "N/A".to_string(),
    }
}

/// Round the exact binary value at `decimals` places, ties to even.
///
/// Rounds once through `{:.N}` formatting, so `1.115` (stored just below
/// the tie) becomes `1.11`.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let places = decimals.max(0) as usize;
    format!("{value:.places$}").parse().unwrap_or(value)
}
