//! Domain and address-or-domain names.

use super::address::{decode_address, format_address, DecodeError};
use crate::rpc::types::{Domain, IpDomain};

/// Unicode name when present, ASCII otherwise.
pub fn domain_name(d: &Domain) -> &str {
    if d.unicode.is_empty() {
        &d.ascii
    } else {
        &d.unicode
    }
}

/// Long form: "unicode (ascii)" for internationalized names, ASCII otherwise.
pub fn domain_string(d: &Domain) -> String {
    if d.unicode.is_empty() {
        d.ascii.clone()
    } else {
        format!("{} ({})", d.unicode, d.ascii)
    }
}

/// The address when set, the long domain form otherwise.
pub fn ip_domain_string(ipd: &IpDomain) -> Result<String, DecodeError> {
    if ipd.ip.is_empty() {
        Ok(domain_string(&ipd.domain))
    } else {
        Ok(format_address(&decode_address(&ipd.ip)?))
    }
}
