use rust_decimal::Decimal;
use tax_core::calculations::common::round_to_two;
use thiserror::Error;

/// Error returned when a string cannot be parsed as an income amount.
#[derive(Debug, Error)]
#[error("invalid income '{input}': {reason}")]
pub struct ParseIncomeError {
    input: String,
    reason: String,
}

impl ParseIncomeError {
    fn new(
        input: &str,
        reason: impl ToString,
    ) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Trims whitespace, a leading `$`, and comma thousands separators.
fn normalize_income_input(s: &str) -> String {
    let trimmed = s.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed);
    trimmed.replace(',', "")
}

/// Parses a single income amount such as `"75,000"` or `"$82500.50"`.
///
/// Empty input and amounts that are zero or negative are rejected.
pub fn parse_income(s: &str) -> Result<Decimal, ParseIncomeError> {
    let normalized = normalize_income_input(s);
    if normalized.is_empty() {
        return Err(ParseIncomeError::new(s, "empty value"));
    }
    let income: Decimal = normalized.parse().map_err(|e| {
        tracing::warn!(input = %s, "invalid income: {}", e);
        ParseIncomeError::new(s, e)
    })?;
    if income <= Decimal::ZERO {
        return Err(ParseIncomeError::new(s, "income must be positive"));
    }
    Ok(income)
}

/// Parses a comma-separated list of plain amounts, e.g. `"50000,75000"`.
///
/// Thousands separators are not allowed here since commas split the list.
pub fn parse_income_list(s: &str) -> Result<Vec<Decimal>, ParseIncomeError> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(parse_income)
        .collect()
}

/// Formats an amount as dollars with thousands separators, e.g. `$11,264.85`.
pub fn format_money(value: Decimal) -> String {
    let rounded = format!("{:.2}", round_to_two(value).abs());
    let (whole, cents) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if round_to_two(value) < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// Formats a percentage with two decimals, e.g. `5.10%`.
pub fn format_percentage(value: Decimal) -> String {
    format!("{:.2}%", round_to_two(value))
}
