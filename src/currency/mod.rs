//! Currency codes and the display formatting used in alert text and CLI output.

use std::fmt;

use serde::{Deserialize, Serialize};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }

    pub fn minor_units(&self) -> u8 {
        minor_units_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("USD")
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CurrencyCode {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for CurrencyCode {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<CurrencyCode> for String {
    fn from(value: CurrencyCode) -> Self {
        value.0
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "VND" => "₫".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        other => other.to_string(),
    }
}

pub fn minor_units_for(code: &str) -> u8 {
    match code {
        "JPY" | "VND" => 0,
        _ => 2,
    }
}

/// Renders `value` with comma-grouped thousands and `precision` decimals.
pub fn format_number(value: f64, precision: u8) -> String {
    let body = format!("{:.*}", precision as usize, value);
    let (sign, unsigned) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body.as_str()),
    };
    match unsigned.split_once('.') {
        Some((int_part, frac)) => format!("{}{}.{}", sign, group_digits(int_part, ','), frac),
        None => format!("{}{}", sign, group_digits(unsigned, ',')),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    let mut count = 0;
    for ch in digits.chars().rev() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
        count += 1;
    }
    grouped
}

/// Full currency rendering, e.g. `$1,234.56` or `-$50.00`.
pub fn format_currency(amount: f64, code: &CurrencyCode) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let body = format_number(amount.abs(), code.minor_units());
    // A value that rounds to zero prints without a sign.
    let is_zero = body.chars().all(|ch| !ch.is_ascii_digit() || ch == '0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };
    format!("{}{}{}", sign, code.symbol(), body)
}

/// Currency with an explicit direction sign, e.g. `+$100.00` for income.
pub fn format_signed(amount: f64, is_income: bool, code: &CurrencyCode) -> String {
    let sign = if is_income { '+' } else { '-' };
    format!("{}{}", sign, format_currency(amount.abs(), code))
}

/// Short form for large amounts: `$1.2K`, `$3.5M`.
pub fn format_compact(amount: f64, code: &CurrencyCode) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}{}{:.1}M", sign, code.symbol(), abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}{}{:.1}K", sign, code.symbol(), abs / 1_000.0)
    } else {
        format_currency(amount, code)
    }
}

/// Ratio as a whole percentage, `0.75` becomes `75%`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.0}%", ratio * 100.0)
}
