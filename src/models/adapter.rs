// Adapter Manager - Adapter Records
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Reconciled per-adapter records.
//!
//! An [`AdapterRecord`] is rebuilt wholesale on every inventory refresh from
//! the four report readers. Every field is always present: text fields that no
//! report supplied are empty strings, never missing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Interface index reported by the platform, stable for one snapshot.
pub type AdapterIndex = u32;

/// Flat field-name → value view of one merged adapter.
pub type FieldMap = BTreeMap<String, String>;

/// Canonical field names of the merged adapter view.
pub mod fields {
    pub const NAME: &str = "name";
    pub const DESCRIPTION: &str = "desc";
    pub const STATUS: &str = "status";
    pub const MAC: &str = "mac";
    pub const IP: &str = "ip";
    pub const PREFIX_LENGTH: &str = "prefix_length";
    pub const MASK: &str = "mask";
    pub const PREFIX_ORIGIN: &str = "prefix_origin";
    pub const SUFFIX_ORIGIN: &str = "suffix_origin";
    pub const PREFERRED_DNS: &str = "pref_dns";
    pub const ALTERNATE_DNS: &str = "alt_dns";
    pub const GATEWAY: &str = "gateway";

    /// Every field a merged adapter carries.
    pub const CANONICAL: [&str; 12] = [
        NAME,
        DESCRIPTION,
        STATUS,
        MAC,
        IP,
        PREFIX_LENGTH,
        MASK,
        PREFIX_ORIGIN,
        SUFFIX_ORIGIN,
        PREFERRED_DNS,
        ALTERNATE_DNS,
        GATEWAY,
    ];
}

/// Operational status of an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterStatus {
    Up,
    Disconnected,
    Disabled,
    NotPresent,
    /// Unrecognized label, kept verbatim (empty when never reported).
    Other(String),
}

impl AdapterStatus {
    /// Parse the status label printed by `Get-NetAdapter`.
    pub fn from_report(label: &str) -> Self {
        match label.trim() {
            "Up" => Self::Up,
            "Disconnected" => Self::Disconnected,
            "Disabled" => Self::Disabled,
            "Not Present" | "NotPresent" => Self::NotPresent,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Up => "Up",
            Self::Disconnected => "Disconnected",
            Self::Disabled => "Disabled",
            Self::NotPresent => "Not Present",
            Self::Other(label) => label,
        }
    }

    /// Whether the adapter is administratively enabled.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// How the network part of an address was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefixOrigin {
    Manual,
    Dhcp,
    WellKnown,
    RouterAdvertisement,
    Other(String),
}

impl PrefixOrigin {
    pub fn from_report(label: &str) -> Self {
        match label.trim() {
            "Manual" => Self::Manual,
            "Dhcp" => Self::Dhcp,
            "WellKnown" => Self::WellKnown,
            "RouterAdvertisement" => Self::RouterAdvertisement,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "Manual",
            Self::Dhcp => "Dhcp",
            Self::WellKnown => "WellKnown",
            Self::RouterAdvertisement => "RouterAdvertisement",
            Self::Other(label) => label,
        }
    }
}

/// How the host part of an address was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuffixOrigin {
    Manual,
    Dhcp,
    WellKnown,
    Link,
    Random,
    Other(String),
}

impl SuffixOrigin {
    pub fn from_report(label: &str) -> Self {
        match label.trim() {
            "Manual" => Self::Manual,
            "Dhcp" => Self::Dhcp,
            "WellKnown" => Self::WellKnown,
            "Link" => Self::Link,
            "Random" => Self::Random,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Manual => "Manual",
            Self::Dhcp => "Dhcp",
            Self::WellKnown => "WellKnown",
            Self::Link => "Link",
            Self::Random => "Random",
            Self::Other(label) => label,
        }
    }
}

/// A fully reconciled network adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdapterRecord {
    /// Interface index.
    pub index: AdapterIndex,
    /// Interface alias (e.g., "Ethernet", "Wi-Fi").
    pub name: String,
    /// Driver-supplied description.
    pub description: String,
    /// Operational status.
    pub status: AdapterStatus,
    /// Hardware address, dash separated (e.g., "00-1A-2B-3C-4D-5E").
    pub mac: String,
    /// IPv4 address.
    pub ip: String,
    /// Prefix length, when an address is assigned.
    pub prefix_length: Option<u8>,
    /// Subnet mask derived from the prefix length.
    pub mask: String,
    /// Provenance of the network part of the address.
    pub prefix_origin: PrefixOrigin,
    /// Provenance of the host part of the address.
    pub suffix_origin: SuffixOrigin,
    /// Preferred DNS server.
    pub preferred_dns: String,
    /// Alternate DNS server.
    pub alternate_dns: String,
    /// Default gateway.
    pub gateway: String,
}

impl AdapterRecord {
    /// Build a record from a merged, back-filled field map.
    pub fn from_fields(index: AdapterIndex, values: &FieldMap) -> Self {
        let text = |key: &str| values.get(key).cloned().unwrap_or_default();

        Self {
            index,
            name: text(fields::NAME),
            description: text(fields::DESCRIPTION),
            status: AdapterStatus::from_report(&text(fields::STATUS)),
            mac: text(fields::MAC),
            ip: text(fields::IP),
            prefix_length: values
                .get(fields::PREFIX_LENGTH)
                .and_then(|value| value.trim().parse().ok()),
            mask: text(fields::MASK),
            prefix_origin: PrefixOrigin::from_report(&text(fields::PREFIX_ORIGIN)),
            suffix_origin: SuffixOrigin::from_report(&text(fields::SUFFIX_ORIGIN)),
            preferred_dns: text(fields::PREFERRED_DNS),
            alternate_dns: text(fields::ALTERNATE_DNS),
            gateway: text(fields::GATEWAY),
        }
    }

    /// Whether the current address was configured manually.
    pub fn is_static(&self) -> bool {
        matches!(self.prefix_origin, PrefixOrigin::Manual)
    }

    /// Whether the adapter currently holds an address.
    pub fn has_address(&self) -> bool {
        !self.ip.is_empty()
    }

    /// Display label combining alias and description.
    pub fn display_label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.description)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_map(pairs: &[(&str, &str)]) -> FieldMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(AdapterStatus::from_report("Up"), AdapterStatus::Up);
        assert_eq!(AdapterStatus::from_report("Not Present"), AdapterStatus::NotPresent);
        assert_eq!(
            AdapterStatus::from_report("Degraded"),
            AdapterStatus::Other("Degraded".to_string())
        );
        assert!(!AdapterStatus::Disabled.is_enabled());
    }

    #[test]
    fn test_record_from_fields() {
        let fields = field_map(&[
            ("name", "Ethernet"),
            ("desc", "Intel(R) Ethernet Connection"),
            ("status", "Up"),
            ("mac", "00-1A-2B-3C-4D-5E"),
            ("ip", "192.168.1.10"),
            ("prefix_length", "24"),
            ("mask", "255.255.255.0"),
            ("prefix_origin", "Manual"),
            ("suffix_origin", "Manual"),
            ("pref_dns", "1.1.1.1"),
            ("alt_dns", ""),
            ("gateway", "192.168.1.1"),
        ]);

        let record = AdapterRecord::from_fields(7, &fields);
        assert_eq!(record.index, 7);
        assert_eq!(record.status, AdapterStatus::Up);
        assert_eq!(record.prefix_length, Some(24));
        assert!(record.is_static());
        assert!(record.has_address());
        assert_eq!(record.display_label(), "Ethernet (Intel(R) Ethernet Connection)");
    }

    #[test]
    fn test_record_from_sparse_fields() {
        let record = AdapterRecord::from_fields(3, &field_map(&[("name", "Wi-Fi"), ("prefix_length", "")]));
        assert_eq!(record.prefix_length, None);
        assert_eq!(record.status, AdapterStatus::Other(String::new()));
        assert_eq!(record.prefix_origin, PrefixOrigin::Other(String::new()));
        assert!(!record.has_address());
    }
}
