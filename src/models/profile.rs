// Adapter Manager - Configuration Profiles
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Saved static IPv4 configurations.
//!
//! A profile bundles the values needed to put an adapter on a fixed address:
//! address, mask, gateway and up to two DNS servers. Profiles are keyed by a
//! user-chosen name in the profile store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::adapter::AdapterRecord;
use super::error::{Error, Result};
use super::validation::{is_valid_ipv4, is_valid_mask, validate_profile_name};

/// Gateway value meaning "no default gateway".
pub const NO_GATEWAY: &str = "0.0.0.0";

/// Default mask offered for new profiles.
pub const DEFAULT_MASK: &str = "255.255.255.0";

/// Profiles keyed by name, iterated in name order.
pub type ProfileMap = BTreeMap<String, ConfigurationProfile>;

/// A saved adapter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationProfile {
    pub ip: String,
    pub mask: String,
    /// Default gateway, `0.0.0.0` when none.
    pub gateway: String,
    #[serde(rename = "pref_dns", default)]
    pub preferred_dns: String,
    #[serde(rename = "alt_dns", default)]
    pub alternate_dns: String,
}

impl ConfigurationProfile {
    /// Capture the current configuration of an adapter.
    pub fn from_record(record: &AdapterRecord) -> Self {
        let gateway = if record.gateway.is_empty() {
            NO_GATEWAY.to_string()
        } else {
            record.gateway.clone()
        };
        let mask = if record.mask.is_empty() {
            DEFAULT_MASK.to_string()
        } else {
            record.mask.clone()
        };

        Self {
            ip: record.ip.clone(),
            mask,
            gateway,
            preferred_dns: record.preferred_dns.clone(),
            alternate_dns: record.alternate_dns.clone(),
        }
    }

    /// Whether the profile carries a default gateway.
    pub fn has_gateway(&self) -> bool {
        !self.gateway.is_empty() && self.gateway != NO_GATEWAY
    }

    /// Whether the profile sets any DNS server.
    pub fn has_dns(&self) -> bool {
        !self.preferred_dns.is_empty() || !self.alternate_dns.is_empty()
    }
}

/// Unvalidated user input for a new or edited profile.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub ip: String,
    pub mask: String,
    pub gateway: String,
    pub preferred_dns: String,
    pub alternate_dns: String,
}

impl ProfileDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mask: DEFAULT_MASK.to_string(),
            ..Self::default()
        }
    }

    /// Validate the draft into a sanitized name and a profile.
    ///
    /// An empty gateway becomes `0.0.0.0`; an alternate DNS server given
    /// without a preferred one is promoted to preferred.
    pub fn validate(&self) -> Result<(String, ConfigurationProfile)> {
        let name = validate_profile_name(&self.name)?;

        let ip = self.ip.trim();
        let mask = self.mask.trim();
        let gateway = self.gateway.trim();
        let mut preferred = self.preferred_dns.trim();
        let mut alternate = self.alternate_dns.trim();

        if !is_valid_ipv4(ip) {
            return Err(Error::validation("Invalid IP address."));
        }
        if !is_valid_mask(mask) {
            return Err(Error::validation("Invalid subnet mask."));
        }

        let gateway = if gateway.is_empty() {
            NO_GATEWAY
        } else if is_valid_ipv4(gateway) {
            gateway
        } else {
            return Err(Error::validation("Invalid default gateway."));
        };

        if !preferred.is_empty() && !is_valid_ipv4(preferred) {
            return Err(Error::validation("Invalid preferred DNS server."));
        }
        if !alternate.is_empty() && !is_valid_ipv4(alternate) {
            return Err(Error::validation("Invalid alternate DNS server."));
        }
        if !preferred.is_empty() && preferred == alternate {
            return Err(Error::validation(
                "The preferred and alternate DNS servers can not be the same.",
            ));
        }
        if preferred.is_empty() && !alternate.is_empty() {
            preferred = alternate;
            alternate = "";
        }

        Ok((
            name,
            ConfigurationProfile {
                ip: ip.to_string(),
                mask: mask.to_string(),
                gateway: gateway.to_string(),
                preferred_dns: preferred.to_string(),
                alternate_dns: alternate.to_string(),
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Office".to_string(),
            ip: "192.168.10.20".to_string(),
            mask: "255.255.255.0".to_string(),
            gateway: "192.168.10.1".to_string(),
            preferred_dns: "1.1.1.1".to_string(),
            alternate_dns: "8.8.8.8".to_string(),
        }
    }

    #[test]
    fn test_validate_complete_draft() {
        let (name, profile) = draft().validate().expect("draft should validate");
        assert_eq!(name, "Office");
        assert_eq!(profile.gateway, "192.168.10.1");
        assert!(profile.has_gateway());
        assert!(profile.has_dns());
    }

    #[test]
    fn test_empty_gateway_becomes_placeholder() {
        let mut d = draft();
        d.gateway.clear();
        let (_, profile) = d.validate().unwrap();
        assert_eq!(profile.gateway, NO_GATEWAY);
        assert!(!profile.has_gateway());
    }

    #[test]
    fn test_alternate_dns_is_promoted() {
        let mut d = draft();
        d.preferred_dns.clear();
        let (_, profile) = d.validate().unwrap();
        assert_eq!(profile.preferred_dns, "8.8.8.8");
        assert_eq!(profile.alternate_dns, "");
    }

    #[test]
    fn test_rejects_invalid_fields() {
        let mut d = draft();
        d.mask = "255.0.255.0".to_string();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.alternate_dns = d.preferred_dns.clone();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.gateway = "192.168.10.300".to_string();
        assert!(d.validate().is_err());

        let mut d = draft();
        d.name = "???".to_string();
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_profile_json_field_names() {
        let (_, profile) = draft().validate().unwrap();
        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["pref_dns"], "1.1.1.1");
        assert_eq!(json["alt_dns"], "8.8.8.8");
    }
}
