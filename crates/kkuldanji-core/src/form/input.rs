//! Conversions from raw user input into report values.

use serde_json::Value;

/// Parses a progress percentage the way a number input does: leading
/// integer digits only, anything unparsable becomes 0, then clamped to
/// `[0, 100]`.
pub fn clamp_progress(raw: &str) -> u8 {
    let trimmed = raw.trim();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1i64, rest),
        None => (1i64, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let leading: String = digits.chars().take_while(|c| c.is_ascii_digit()).collect();
    let parsed = if leading.is_empty() {
        0
    } else {
        leading.parse::<i64>().unwrap_or(i64::MAX).saturating_mul(sign)
    };
    parsed.clamp(0, 100) as u8
}

/// Splits newline-separated text into a list of strings.
pub fn split_lines(raw: &str) -> Value {
    Value::Array(
        raw.split('\n')
            .map(|line| Value::String(line.trim_end_matches('\r').to_string()))
            .collect(),
    )
}

/// Interprets a yes/no style answer.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "y" | "yes" | "on" | "x" | "완료" | "예"
    )
}
