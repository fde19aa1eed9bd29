// Adapter Manager - Validation Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Input validation for addresses, masks, ports and profile names.

use once_cell::sync::Lazy;
use regex::Regex;

use super::error::{Error, Result};
use crate::network_utils::parse_octets;

static IPV4_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
        .expect("IPv4 pattern is valid")
});

static PROFILE_NAME_STRIP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s\-]").expect("profile name pattern is valid"));

static PORT_SPEC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]+(-[0-9]+)?(,[0-9]+(-[0-9]+)?)*$").expect("port pattern is valid")
});

/// Check that `s` is four dot-separated groups of 1-3 digits, each ≤ 255.
pub fn is_valid_ipv4(s: &str) -> bool {
    match IPV4_RE.captures(s) {
        Some(caps) => caps
            .iter()
            .skip(1)
            .flatten()
            .all(|group| group.as_str().parse::<u32>().map(|v| v <= 255).unwrap_or(false)),
        None => false,
    }
}

/// Check that `s` is a dotted-quad subnet mask with contiguous ones.
///
/// `255.0.255.0` is rejected because a one follows the first zero.
pub fn is_valid_mask(s: &str) -> bool {
    let Some(octets) = parse_octets(s) else {
        return false;
    };

    let bits = u32::from_be_bytes(octets);
    bits.leading_ones() + bits.trailing_zeros() == 32
}

/// Validate an IPv4 address, returning it unchanged.
pub fn validate_ipv4(s: &str) -> Result<&str> {
    if is_valid_ipv4(s) {
        Ok(s)
    } else {
        Err(Error::validation(format!("Invalid IP address: {}", s)))
    }
}

/// Validate a subnet mask, returning it unchanged.
pub fn validate_mask(s: &str) -> Result<&str> {
    if is_valid_mask(s) {
        Ok(s)
    } else {
        Err(Error::validation(format!("Invalid subnet mask: {}", s)))
    }
}

/// Validate an nmap port specification (`22`, `1-1024`, `22,80,443`).
pub fn validate_port_spec(s: &str) -> Result<&str> {
    let s = s.trim();
    if !PORT_SPEC_RE.is_match(s) {
        return Err(Error::validation(format!("Invalid port specification: {}", s)));
    }
    Ok(s)
}

/// Validate and sanitize a profile name.
///
/// Characters outside word characters, whitespace and `-` are removed first;
/// the remainder must be non-empty ASCII.
pub fn validate_profile_name(s: &str) -> Result<String> {
    let cleaned = PROFILE_NAME_STRIP_RE.replace_all(s, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || !cleaned.is_ascii() {
        return Err(Error::validation("Invalid profile name."));
    }
    if cleaned.len() > 100 {
        return Err(Error::validation(
            "Profile name must be 100 characters or less",
        ));
    }
    Ok(cleaned.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_ipv4() {
        assert!(is_valid_ipv4("192.168.1.10"));
        assert!(is_valid_ipv4("0.0.0.0"));
        assert!(is_valid_ipv4("255.255.255.255"));
        assert!(!is_valid_ipv4("192.168.1.999"));
        assert!(!is_valid_ipv4("1.2.3"));
        assert!(!is_valid_ipv4("1.2.3.4.5"));
        assert!(!is_valid_ipv4("1.2.3.1000"));
        assert!(!is_valid_ipv4("Interface:"));
        assert!(!is_valid_ipv4(" 1.2.3.4"));
    }

    #[test]
    fn test_is_valid_mask() {
        assert!(is_valid_mask("255.255.255.0"));
        assert!(is_valid_mask("255.255.255.255"));
        assert!(is_valid_mask("0.0.0.0"));
        assert!(is_valid_mask("255.255.254.0"));
        assert!(!is_valid_mask("255.0.255.0"));
        assert!(!is_valid_mask("255.255.255.256"));
        assert!(!is_valid_mask("255.255.255"));
        assert!(!is_valid_mask("0.255.255.255"));
    }

    #[test]
    fn test_validate_port_spec() {
        assert!(validate_port_spec("22").is_ok());
        assert!(validate_port_spec("1-1024").is_ok());
        assert!(validate_port_spec("22,80,443,8000-8100").is_ok());
        assert!(validate_port_spec("").is_err());
        assert!(validate_port_spec("ssh").is_err());
    }

    #[test]
    fn test_validate_profile_name() {
        assert_eq!(validate_profile_name("Office LAN").unwrap(), "Office LAN");
        assert_eq!(validate_profile_name("lab/bench#2").unwrap(), "labbench2");
        assert!(validate_profile_name("!!!").is_err());
        assert!(validate_profile_name("café").is_err());
    }
}
