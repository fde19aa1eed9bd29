// Adapter Manager - Network Utilities
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! IPv4 address arithmetic.
//!
//! Conversions between prefix lengths and dotted-quad subnet masks, and the
//! address range covered by a scan target.

use std::net::Ipv4Addr;

use crate::models::validation::is_valid_ipv4;
use crate::models::{Error, Result};

/// Convert a prefix length into a dotted-quad subnet mask.
///
/// `prefix_to_mask(24)` yields `"255.255.255.0"`, `prefix_to_mask(0)` yields
/// `"0.0.0.0"`.
pub fn prefix_to_mask(bits: u32) -> Result<String> {
    if bits > 32 {
        return Err(Error::validation(
            "Invalid number of bits. Must be between 0 and 32.",
        ));
    }

    Ok(Ipv4Addr::from(mask_bits(bits)).to_string())
}

/// Count the set bits of a dotted-quad subnet mask.
///
/// Contiguity is not checked here, `255.0.255.0` yields 16. Use
/// [`is_valid_mask`](crate::models::validation::is_valid_mask) to reject
/// non-contiguous masks.
pub fn mask_to_prefix(mask: &str) -> Result<u32> {
    let octets = parse_octets(mask).ok_or_else(|| {
        Error::validation("Invalid subnet mask octet(s). Must be between 0 and 255.")
    })?;

    Ok(octets.iter().map(|octet| octet.count_ones()).sum())
}

/// Split a dotted string into exactly four octets.
pub(crate) fn parse_octets(s: &str) -> Option<[u8; 4]> {
    let parts: Vec<&str> = s.split('.').collect();
    if parts.len() != 4 {
        return None;
    }

    let mut octets = [0u8; 4];
    for (slot, part) in octets.iter_mut().zip(&parts) {
        let value: u32 = part.trim().parse().ok()?;
        *slot = u8::try_from(value).ok()?;
    }
    Some(octets)
}

fn mask_bits(bits: u32) -> u32 {
    // A shift by 32 overflows u32, so widen first
    ((0xFFFF_FFFFu64 << (32 - bits)) & 0xFFFF_FFFF) as u32
}

/// Address range covered by an `ip/prefix` scan target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanRange {
    pub prefix: u32,
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl ScanRange {
    /// Number of addresses in the range.
    pub fn address_count(&self) -> u64 {
        u64::from(u32::from(self.last)) - u64::from(u32::from(self.first)) + 1
    }
}

impl std::fmt::Display for ScanRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.prefix >= 24 {
            if self.first == self.last {
                write!(f, "{}", self.first)
            } else {
                write!(f, "{}-{}", self.first, self.last.octets()[3])
            }
        } else {
            write!(f, "{} to {}", self.first, self.last)
        }
    }
}

/// Compute the network and broadcast addresses for `ip/prefix`.
pub fn scan_range(ip: &str, prefix: u32) -> Result<ScanRange> {
    if !is_valid_ipv4(ip) {
        return Err(Error::validation(format!("Invalid IP address: {}", ip)));
    }
    if prefix > 32 {
        return Err(Error::validation(
            "Invalid number of bits. Must be between 0 and 32.",
        ));
    }

    let octets = parse_octets(ip).ok_or_else(|| Error::validation("Invalid IP address"))?;
    let addr = u32::from(Ipv4Addr::from(octets));
    let mask = mask_bits(prefix);
    let network = addr & mask;

    Ok(ScanRange {
        prefix,
        first: Ipv4Addr::from(network),
        last: Ipv4Addr::from(network | !mask),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_to_mask_fixed_values() {
        assert_eq!(prefix_to_mask(0).unwrap(), "0.0.0.0");
        assert_eq!(prefix_to_mask(8).unwrap(), "255.0.0.0");
        assert_eq!(prefix_to_mask(24).unwrap(), "255.255.255.0");
        assert_eq!(prefix_to_mask(25).unwrap(), "255.255.255.128");
        assert_eq!(prefix_to_mask(32).unwrap(), "255.255.255.255");
    }

    #[test]
    fn test_prefix_to_mask_out_of_range() {
        assert!(matches!(prefix_to_mask(33), Err(Error::ValidationFailed(_))));
    }

    #[test]
    fn test_mask_prefix_round_trip() {
        for bits in 0..=32 {
            let mask = prefix_to_mask(bits).unwrap();
            assert_eq!(mask_to_prefix(&mask).unwrap(), bits, "mask {}", mask);
        }
    }

    #[test]
    fn test_mask_to_prefix_counts_bits_without_contiguity() {
        assert_eq!(mask_to_prefix("255.0.255.0").unwrap(), 16);
    }

    #[test]
    fn test_mask_to_prefix_rejects_bad_shapes() {
        assert!(matches!(mask_to_prefix("255.255.255"), Err(Error::ValidationFailed(_))));
        assert!(matches!(mask_to_prefix("255.255.255.256"), Err(Error::ValidationFailed(_))));
        assert!(matches!(mask_to_prefix("255.255.x.0"), Err(Error::ValidationFailed(_))));
    }

    #[test]
    fn test_scan_range_display() {
        let range = scan_range("192.168.1.77", 24).unwrap();
        assert_eq!(range.first, Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(range.last, Ipv4Addr::new(192, 168, 1, 255));
        assert_eq!(range.to_string(), "192.168.1.0-255");
        assert_eq!(range.address_count(), 256);

        let host = scan_range("10.0.0.5", 32).unwrap();
        assert_eq!(host.to_string(), "10.0.0.5");

        let wide = scan_range("10.20.30.40", 16).unwrap();
        assert_eq!(wide.to_string(), "10.20.0.0 to 10.20.255.255");
    }

    #[test]
    fn test_scan_range_rejects_invalid_input() {
        assert!(scan_range("10.0.0.256", 24).is_err());
        assert!(scan_range("10.0.0.1", 40).is_err());
    }
}
