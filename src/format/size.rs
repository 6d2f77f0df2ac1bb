//! Byte counts: display sizes and quota strings.
//!
//! Quota strings round-trip exactly: a string is only accepted when encoding
//! the parsed value yields the same string again.

use thiserror::Error;

const KB: u64 = 1024;
const MB: u64 = 1024 * KB;
const GB: u64 = 1024 * MB;
const TB: u64 = 1024 * GB;

/// Rejected quota size input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid size {input:?}, use a whole number with optional m, g or t suffix")]
pub struct InvalidSizeError {
    pub input: String,
}

/// Render a byte count for humans: "12 mb", "3 kb" or "10 bytes".
pub fn format_byte_size(n: u64) -> String {
    if n > 10 * MB {
        format!("{} mb", div_round(n, MB))
    } else if n > 500 {
        format!("{} kb", div_round(n, KB))
    } else {
        format!("{n} bytes")
    }
}

fn div_round(n: u64, unit: u64) -> u64 {
    n / unit + u64::from(n % unit >= unit / 2)
}

/// Canonical quota form: largest of t/g/m dividing `v` exactly, else digits.
pub fn encode_quota_size(v: u64) -> String {
    if v == 0 {
        return "0".to_string();
    }
    for (unit, suffix) in [(TB, 't'), (GB, 'g'), (MB, 'm')] {
        if v % unit == 0 {
            return format!("{}{}", v / unit, suffix);
        }
    }
    v.to_string()
}

/// Parse a quota string such as "1g", "512m" or "1500".
pub fn decode_quota_size(s: &str) -> Result<u64, InvalidSizeError> {
    let invalid = || InvalidSizeError {
        input: s.to_string(),
    };

    let lower = s.to_ascii_lowercase();
    let (digits, mult) = match lower.chars().last() {
        Some('k') => (&lower[..lower.len() - 1], KB),
        Some('m') => (&lower[..lower.len() - 1], MB),
        Some('g') => (&lower[..lower.len() - 1], GB),
        Some('t') => (&lower[..lower.len() - 1], TB),
        _ => (lower.as_str(), 1),
    };

    let v = digits
        .parse::<u64>()
        .ok()
        .and_then(|n| n.checked_mul(mult))
        .ok_or_else(invalid)?;

    if encode_quota_size(v) != s {
        return Err(invalid());
    }
    Ok(v)
}
