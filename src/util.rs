// Utility helpers for parsing, rounding and number formatting.
//
// CSV cleanup lives here so the loader can assume typed values, and the
// rounding rules live here so every report rounds the same way.
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports.
///
/// - Trims whitespace.
/// - Rejects values that contain alphabetic characters.
/// - Strips thousands separators and a leading `$`.
/// - Returns `None` for anything that cannot be safely parsed.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.trim_start_matches('$').replace(',', "");
    s.parse::<f64>().ok()
}

pub fn parse_u32_safe(s: Option<&str>) -> Option<u32> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', "").parse::<u32>().ok()
}

pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.replace(',', "").parse::<i64>().ok()
}

/// Trimmed, non-empty text or `None`.
pub fn clean_text(s: Option<String>) -> Option<String> {
    s.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Round to the nearest integer with halves going up (`2.5 -> 3`,
/// `-2.5 -> -2`), the rounding every dashboard figure uses.
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    (value + 0.5).floor() as i64
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator
}

/// Rounded percentage of `part` in `whole`; a zero `whole` yields 0.
pub fn percentage(part: f64, whole: f64) -> i64 {
    round_half_up(ratio(part, whole) * 100.0)
}

/// Rounded mean; 0 for an empty slice.
pub fn rounded_mean(values: &[f64]) -> i64 {
    let sum: f64 = values.iter().copied().sum();
    round_half_up(ratio(sum, values.len() as f64))
}

/// Upper-case the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus locale-aware thousands separators
    // (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    n.to_formatted_string(&Locale::en)
}

/// Whole-number amounts print without decimals, fractional ones with two.
pub fn format_amount(n: f64) -> String {
    if n.fract() == 0.0 {
        format_number(n, 0)
    } else {
        format_number(n, 2)
    }
}
