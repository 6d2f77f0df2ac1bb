//! IP address decoding and canonical rendering.
//!
//! # Responsibilities
//! - Decode the base64 transport form of an address (4 or 16 raw bytes)
//! - Render IPv4 and IPv4-mapped IPv6 as dotted decimal
//! - Render other IPv6 addresses with `::` compression of the longest zero run
//!
//! # Design Decisions
//! - Compression works on 16-bit groups, never on a single zero group
//! - Ties between equally long zero runs go to the first run

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

/// Prefix of an IPv4 address embedded in IPv6 (`::ffff:a.b.c.d`).
const V4_IN_V6_PREFIX: [u8; 12] = [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff];

/// Errors decoding an address from its transport encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The payload was not valid base64.
    #[error("invalid address encoding: {0}")]
    Encoding(String),

    /// The payload decoded to a byte count that is not an IP address.
    #[error("invalid address length {0}, expected 4 or 16 bytes")]
    Length(usize),
}

/// A decoded IP address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    V4([u8; 4]),
    V6([u8; 16]),
}

impl Address {
    /// Build an address from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        if let Ok(b) = <[u8; 4]>::try_from(bytes) {
            return Ok(Address::V4(b));
        }
        if let Ok(b) = <[u8; 16]>::try_from(bytes) {
            return Ok(Address::V6(b));
        }
        Err(DecodeError::Length(bytes.len()))
    }

    /// Returns the embedded IPv4 octets for IPv4 and IPv4-mapped IPv6.
    pub fn ipv4_octets(&self) -> Option<[u8; 4]> {
        match self {
            Address::V4(b) => Some(*b),
            Address::V6(b) if b[..12] == V4_IN_V6_PREFIX => Some([b[12], b[13], b[14], b[15]]),
            Address::V6(_) => None,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_address(self))
    }
}

/// Decode an address from its base64 transport encoding.
pub fn decode_address(encoded: &str) -> Result<Address, DecodeError> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| DecodeError::Encoding(e.to_string()))?;
    Address::from_bytes(&bytes)
}

/// Render an address in its canonical textual form.
pub fn format_address(addr: &Address) -> String {
    if let Some([a, b, c, d]) = addr.ipv4_octets() {
        return format!("{a}.{b}.{c}.{d}");
    }
    match addr {
        Address::V6(bytes) => format_ipv6(bytes),
        // Covered by ipv4_octets above.
        Address::V4(_) => String::new(),
    }
}

fn format_ipv6(bytes: &[u8; 16]) -> String {
    let mut groups = [0u16; 8];
    for (i, group) in groups.iter_mut().enumerate() {
        *group = u16::from_be_bytes([bytes[2 * i], bytes[2 * i + 1]]);
    }

    let run = longest_zero_run(&groups);

    let mut out = String::with_capacity(39);
    let mut i = 0;
    while i < groups.len() {
        if let Some((start, end)) = run {
            if i == start {
                out.push_str("::");
                i = end;
                continue;
            }
        }
        if !out.is_empty() && !out.ends_with(':') {
            out.push(':');
        }
        out.push_str(&format!("{:x}", groups[i]));
        i += 1;
    }
    out
}

/// Longest run of zero groups spanning at least two groups, as `[start, end)`.
fn longest_zero_run(groups: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < groups.len() {
        if groups[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < groups.len() && groups[i] == 0 {
            i += 1;
        }
        let len = i - start;
        let best_len = best.map_or(0, |(s, e)| e - s);
        if len >= 2 && len > best_len {
            best = Some((start, i));
        }
    }
    best
}
