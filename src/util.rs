// Numeric coercion and formatting helpers.
//
// Every incident field arrives as text. The parsers here are total: they
// never fail, they report how they got their value so the loader can count
// and log what was defaulted.
use num_format::{Locale, ToFormattedString};

/// How a coerced value was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionOutcome {
    Parsed,
    /// Missing or whitespace-only input.
    Blank,
    /// Non-empty input that did not parse; the value is the zero default.
    Malformed,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coerced<T> {
    pub value: T,
    pub outcome: CoercionOutcome,
}

impl<T: Default> Coerced<T> {
    fn parsed(value: T) -> Self {
        Self { value, outcome: CoercionOutcome::Parsed }
    }

    fn defaulted(outcome: CoercionOutcome) -> Self {
        Self { value: T::default(), outcome }
    }
}

/// Parse a base-10 non-negative integer, defaulting to 0.
pub fn parse_integer(s: Option<&str>) -> Coerced<u64> {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return Coerced::defaulted(CoercionOutcome::Blank);
    };
    match s.parse::<u64>() {
        Ok(v) => Coerced::parsed(v),
        Err(_) => Coerced::defaulted(CoercionOutcome::Malformed),
    }
}

/// Parse a decimal written with a comma as the decimal separator and
/// spaces as thousands separators (`"1 234,50"` -> `1234.5`).
///
/// - Regular, no-break and narrow no-break spaces are all stripped.
/// - Values that still fail to parse, or parse to a non-finite number,
///   come back as `0.0` marked `Malformed`.
pub fn parse_locale_decimal(s: Option<&str>) -> Coerced<f64> {
    let Some(s) = s.map(str::trim).filter(|s| !s.is_empty()) else {
        return Coerced::defaulted(CoercionOutcome::Blank);
    };
    let clean: String = s
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}' | '\u{202f}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    match clean.parse::<f64>() {
        Ok(v) if v.is_finite() => Coerced::parsed(v),
        _ => Coerced::defaulted(CoercionOutcome::Malformed),
    }
}

/// Parse an optional integer such as a week number. Unlike the numeric
/// measures this does not default: absent or malformed input is `None`.
pub fn parse_i64_safe(s: Option<&str>) -> Option<i64> {
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<i64>().ok()
}

pub fn average(v: &[f64]) -> f64 {
    // Arithmetic mean; 0 for an empty slice to avoid NaNs.
    if v.is_empty() {
        return 0.0;
    }
    let sum: f64 = v.iter().copied().sum();
    sum / v.len() as f64
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed decimals plus thousands separators in the integer part
    // (e.g. `1,234,567.89`). Console output only; the export uses plain
    // `{:.2}` values.
    let neg = n.is_sign_negative() && n != 0.0;
    let s = format!("{:.*}", decimals, n.abs());
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    let sep = Locale::en.separator();
    let mut res = String::with_capacity(int_part.len() + int_part.len() / 3 + decimals + 2);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            res.push_str(sep);
        }
        res.push(digit);
    }
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
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
