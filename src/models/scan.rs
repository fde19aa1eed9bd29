// Adapter Manager - Port Scan Results
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Port scan result types, split by transport protocol.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Transport protocol of a scanned port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

impl Protocol {
    /// Detect the protocol from a port token such as `22/tcp`.
    pub fn from_port_token(port: &str) -> Option<Self> {
        let proto = port.split_once('/').map(|(_, p)| p).unwrap_or(port);
        if proto.contains("tcp") {
            Some(Self::Tcp)
        } else if proto.contains("udp") {
            Some(Self::Udp)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }
}

/// One probed port of a host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortResult {
    /// Port and protocol (e.g., "22/tcp").
    pub port: String,
    /// Port state (e.g., "open", "filtered").
    pub state: String,
    /// Service name guess, empty when the scanner printed none.
    pub service: String,
}

/// Scan results of a single host for one protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostScanResult {
    pub ip: String,
    /// Vendor and/or reverse-DNS label of the device.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_label: Option<String>,
    /// Hardware address, dash separated.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac: Option<String>,
    /// Probed ports in report order.
    pub services: Vec<PortResult>,
}

impl HostScanResult {
    pub fn new(ip: impl Into<String>, device_label: Option<String>) -> Self {
        Self {
            ip: ip.into(),
            device_label,
            mac: None,
            services: Vec::new(),
        }
    }

    /// Ports reported as open.
    pub fn open_ports(&self) -> impl Iterator<Item = &PortResult> + '_ {
        self.services.iter().filter(|s| s.state == "open")
    }
}

/// Parsed scanner output, keyed by host address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub tcp: BTreeMap<String, HostScanResult>,
    pub udp: BTreeMap<String, HostScanResult>,
    /// When the report was parsed.
    pub scanned_at: DateTime<Utc>,
}

impl ScanReport {
    pub fn new() -> Self {
        Self {
            tcp: BTreeMap::new(),
            udp: BTreeMap::new(),
            scanned_at: Utc::now(),
        }
    }

    /// Host map for a protocol.
    pub fn hosts(&self, protocol: Protocol) -> &BTreeMap<String, HostScanResult> {
        match protocol {
            Protocol::Tcp => &self.tcp,
            Protocol::Udp => &self.udp,
        }
    }

    pub(crate) fn hosts_mut(&mut self, protocol: Protocol) -> &mut BTreeMap<String, HostScanResult> {
        match protocol {
            Protocol::Tcp => &mut self.tcp,
            Protocol::Udp => &mut self.udp,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tcp.is_empty() && self.udp.is_empty()
    }
}

impl Default for ScanReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_protocol_from_port_token() {
        assert_eq!(Protocol::from_port_token("22/tcp"), Some(Protocol::Tcp));
        assert_eq!(Protocol::from_port_token("161/udp"), Some(Protocol::Udp));
        assert_eq!(Protocol::from_port_token("Nmap"), None);
    }

    #[test]
    fn test_open_ports_filter() {
        let mut host = HostScanResult::new("10.0.0.1", None);
        host.services.push(PortResult {
            port: "22/tcp".into(),
            state: "open".into(),
            service: "ssh".into(),
        });
        host.services.push(PortResult {
            port: "23/tcp".into(),
            state: "closed".into(),
            service: "telnet".into(),
        });
        assert_eq!(host.open_ports().count(), 1);
    }
}
